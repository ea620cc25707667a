use secrecy::{ExposeSecret, Secret};

use super::ValidationError;

/// A raw (not yet hashed) password, kept behind [`secrecy::Secret`] so it is
/// redacted from debug output and never serialized.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = ValidationError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().len() < 8 {
            return Err(ValidationError::InvalidPassword(
                "must be at least 8 characters long".to_string(),
            ));
        }
        Ok(Self(value))
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}
