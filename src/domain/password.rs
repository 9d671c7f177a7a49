//! Password value objects.
//!
//! `Password` holds validated plaintext and never prints it. `PasswordHash`
//! holds a bcrypt hash in modular crypt format.

use once_cell::sync::Lazy;
use regex::Regex;

use super::validation::ValidationError;
use crate::config::{BCRYPT_COST, MAX_PASSWORD_BYTES, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::errors::{AppError, AppResult};

static BCRYPT_HASH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$2[abxy]?\$(0[4-9]|[12][0-9]|3[01])\$[./0-9A-Za-z]{53}$")
        .expect("bcrypt pattern is valid")
});

/// Hash checked during login when the user does not exist, so both
/// failure paths pay for one bcrypt verification.
const DUMMY_HASH: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

/// Validated plaintext password.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

// Never expose plaintext in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Password").field(&"[REDACTED]").finish()
    }
}

impl Password {
    /// Accepts between 8 and 64 characters, inclusive, and at most 72 bytes
    /// so that every character takes part in the bcrypt hash.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let length = raw.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::new(format!(
                "Password of length {length} is too short, at least {MIN_PASSWORD_LENGTH} characters are required"
            )));
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(ValidationError::new(format!(
                "Password of length {length} is too long, at most {MAX_PASSWORD_LENGTH} characters are allowed"
            )));
        }
        if raw.len() > MAX_PASSWORD_BYTES {
            return Err(ValidationError::new(format!(
                "Password is too long, at most {MAX_PASSWORD_BYTES} bytes of UTF-8 are allowed"
            )));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hash with bcrypt on the blocking pool.
    ///
    /// # Errors
    /// Returns an internal error if bcrypt fails or the task is cancelled.
    pub async fn hash(&self) -> AppResult<PasswordHash> {
        let plain = self.0.clone();
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(plain, BCRYPT_COST))
            .await
            .map_err(|e| AppError::internal(format!("Password hash task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password hash failed: {e}")))?;

        PasswordHash::parse(hashed)
            .map_err(|e| AppError::internal(format!("bcrypt produced an unexpected hash: {e}")))
    }
}

/// bcrypt hash as stored in the database.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PasswordHash").field(&"[REDACTED]").finish()
    }
}

impl PasswordHash {
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if !BCRYPT_HASH_REGEX.is_match(&raw) {
            return Err(ValidationError::new("Password hash is not a valid bcrypt hash"));
        }
        Ok(Self(raw))
    }

    /// The hash compared against when no user matched.
    pub fn dummy() -> Self {
        Self(DUMMY_HASH.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True iff this hash was produced from `password`. Runs bcrypt
    /// synchronously; callers on the runtime should use `verify_blocking`.
    pub fn verify(&self, password: &Password) -> bool {
        bcrypt::verify(password.as_str(), &self.0).unwrap_or(false)
    }

    /// `verify` on the blocking pool.
    pub async fn verify_blocking(&self, password: &Password) -> AppResult<bool> {
        let hash = self.clone();
        let password = password.clone();
        tokio::task::spawn_blocking(move || hash.verify(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password verify task failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HASH: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

    #[test]
    fn test_password_length_bounds() {
        assert!(Password::parse("").is_err());
        assert!(Password::parse("a".repeat(7)).is_err());
        assert!(Password::parse("a".repeat(8)).is_ok());
        assert!(Password::parse("a".repeat(64)).is_ok());
        assert!(Password::parse("a".repeat(65)).is_err());
    }

    #[test]
    fn test_password_byte_limit_for_multibyte_characters() {
        // 20 characters but 74 bytes
        let wide = format!("{}aa", "😀".repeat(18));
        assert_eq!(wide.chars().count(), 20);
        assert!(Password::parse(wide).is_err());

        // 72 bytes exactly
        let fits = "😀".repeat(18);
        assert_eq!(fits.len(), MAX_PASSWORD_BYTES);
        assert!(Password::parse(fits).is_ok());
    }

    #[tokio::test]
    async fn test_passwords_sharing_a_long_prefix_do_not_verify() {
        let password = Password::parse(format!("{}a", "é".repeat(35))).unwrap();
        let other = Password::parse(format!("{}b", "é".repeat(35))).unwrap();
        let hash = password.hash().await.unwrap();
        assert!(hash.verify(&password));
        assert!(!hash.verify(&other));
    }

    #[test]
    fn test_password_round_trips() {
        let raw = "equinox-given-recoup-antique";
        assert_eq!(Password::parse(raw).unwrap().as_str(), raw);
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::parse("equinox-given-recoup-antique").unwrap();
        let debug = format!("{password:?}");
        assert!(!debug.contains("equinox"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_password_hash_format() {
        assert!(PasswordHash::parse(SAMPLE_HASH).is_ok());
        assert!(PasswordHash::parse("$2y$31$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy").is_ok());
        assert!(PasswordHash::parse("").is_err());
        assert!(PasswordHash::parse("plaintext").is_err());
        assert!(PasswordHash::parse("$2a$03$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy").is_err());
        assert!(PasswordHash::parse("$2a$10$tooshort").is_err());
        assert!(PasswordHash::parse("$argon2id$v=19$m=19456,t=2,p=1$abc$def").is_err());
    }

    #[test]
    fn test_dummy_hash_is_well_formed() {
        assert!(PasswordHash::parse(PasswordHash::dummy().as_str()).is_ok());
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let password = Password::parse("correct-horse-battery").unwrap();
        let hash = password.hash().await.unwrap();

        assert_ne!(hash.as_str(), password.as_str());
        assert!(hash.verify(&password));
        assert!(hash.verify_blocking(&password).await.unwrap());

        let other = Password::parse("incorrect-horse-battery").unwrap();
        assert!(!hash.verify(&other));
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let password = Password::parse("correct-horse-battery").unwrap();
        let first = password.hash().await.unwrap();
        let second = password.hash().await.unwrap();
        assert_ne!(first, second);
    }
}
