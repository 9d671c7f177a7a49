//! Validation failures produced by the smart constructors.
//!
//! A `ValidationError` carries one message per failed field so composite
//! decoders can report every problem at once instead of the first one.

use std::borrow::Cow;

use thiserror::Error;

/// One or more field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .messages.join(", "))]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    /// Create a failure with a single message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// All collected messages, in field order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Convert into a `validator` field error so derive-based request
    /// validation reports the same message as the smart constructor.
    pub(crate) fn into_field_error(self, code: &'static str) -> validator::ValidationError {
        let mut error = validator::ValidationError::new(code);
        error.message = Some(Cow::Owned(self.to_string()));
        error
    }
}

/// Accumulates field failures while decoding a composite record.
#[derive(Debug, Default)]
pub struct FieldErrors {
    messages: Vec<String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the failure (if any) and hand back the value on success.
    pub fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.messages.extend(err.messages);
                None
            }
        }
    }

    /// Record an ad-hoc failure.
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// `Ok(())` when nothing failed, otherwise the union of all failures.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                messages: self.messages,
            })
        }
    }
}
