use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use inkpress_core::TokenKind;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token has expired.")]
    Expired,
    #[error("Could not validate credentials.")]
    Invalid,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Signing material for both token kinds.
///
/// Access and refresh tokens share the algorithm but never a secret, so a
/// leaked access token cannot be replayed against the refresh endpoint and
/// vice versa.
#[derive(Clone)]
pub struct TokenConfig {
    pub access_secret: Secret<String>,
    pub refresh_secret: Secret<String>,
    pub algorithm: Algorithm,
    pub access_ttl: chrono::Duration,
    pub refresh_ttl: chrono::Duration,
}

impl TokenConfig {
    pub fn new(
        access_secret: Secret<String>,
        refresh_secret: Secret<String>,
        algorithm: &str,
        access_ttl_minutes: i64,
        refresh_ttl_minutes: i64,
    ) -> Result<Self, TokenError> {
        let algorithm = algorithm
            .parse::<Algorithm>()
            .map_err(|e| TokenError::Unexpected(format!("unsupported algorithm: {e}")))?;
        Ok(Self {
            access_secret,
            refresh_secret,
            algorithm,
            access_ttl: chrono::Duration::minutes(access_ttl_minutes),
            refresh_ttl: chrono::Duration::minutes(refresh_ttl_minutes),
        })
    }

    fn secret_for(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => self.access_secret.expose_secret().as_bytes(),
            TokenKind::Refresh => self.refresh_secret.expose_secret().as_bytes(),
        }
    }

    fn ttl_for(&self, kind: TokenKind) -> chrono::Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Issues and verifies signed, time-bound tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    config: TokenConfig,
}

impl TokenIssuer {
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    /// Sign a token of the given kind for `subject`, expiring after the
    /// kind's configured TTL.
    pub fn issue(&self, subject: &str, kind: TokenKind) -> Result<String, TokenError> {
        let exp = Utc::now()
            .checked_add_signed(self.config.ttl_for(kind))
            .ok_or_else(|| TokenError::Unexpected("expiry out of range".to_string()))?
            .timestamp();
        let exp: usize = exp
            .try_into()
            .map_err(|_| TokenError::Unexpected("expiry before epoch".to_string()))?;

        let claims = Claims {
            sub: subject.to_string(),
            exp,
        };

        encode(
            &jsonwebtoken::Header::new(self.config.algorithm),
            &claims,
            &EncodingKey::from_secret(self.config.secret_for(kind)),
        )
        .map_err(|e| TokenError::Unexpected(e.to_string()))
    }

    /// Verify signature and expiry against the given kind's secret.
    ///
    /// An expired-but-valid signature is reported distinctly; any other
    /// defect (wrong kind, garbage, tampering) collapses into `Invalid`.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret_for(kind)),
            &Validation::new(self.config.algorithm),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
    }
}
