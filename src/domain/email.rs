//! Outgoing email message.

use super::types::{EmailAddress, NonEmptyString, NonEmptyString50};
use super::validation::ValidationError;

/// A fully validated message ready for a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    from: EmailAddress,
    to: Vec<EmailAddress>,
    cc: Vec<EmailAddress>,
    bcc: Vec<EmailAddress>,
    subject: NonEmptyString50,
    text: NonEmptyString,
    html: NonEmptyString,
}

impl EmailMessage {
    /// # Errors
    /// Fails when `to` is empty.
    pub fn new(
        from: EmailAddress,
        to: Vec<EmailAddress>,
        subject: NonEmptyString50,
        text: NonEmptyString,
        html: NonEmptyString,
    ) -> Result<Self, ValidationError> {
        if to.is_empty() {
            return Err(ValidationError::new("Email message has no recipients"));
        }
        Ok(Self {
            from,
            to,
            cc: Vec::new(),
            bcc: Vec::new(),
            subject,
            text,
            html,
        })
    }

    pub fn with_cc(mut self, cc: Vec<EmailAddress>) -> Self {
        self.cc = cc;
        self
    }

    pub fn with_bcc(mut self, bcc: Vec<EmailAddress>) -> Self {
        self.bcc = bcc;
        self
    }

    pub fn from(&self) -> &EmailAddress {
        &self.from
    }

    pub fn to(&self) -> &[EmailAddress] {
        &self.to
    }

    pub fn cc(&self) -> &[EmailAddress] {
        &self.cc
    }

    pub fn bcc(&self) -> &[EmailAddress] {
        &self.bcc
    }

    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn html(&self) -> &str {
        self.html.as_str()
    }
}
