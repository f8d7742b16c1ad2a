//! Authentication ports: token issuance/verification and password hashing.

use uuid::Uuid;

/// Claims recovered from a verified token: the subject and when the
/// assertion lapses. Role is deliberately absent - authorization always
/// reads the live user record.
#[derive(Debug, Clone, Copy)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub expires_at: i64,
}

/// Token service - issues and verifies signed identity assertions.
pub trait TokenService: Send + Sync {
    /// Sign a time-limited assertion for `user_id`.
    fn issue(&self, user_id: Uuid) -> Result<String, AuthError>;

    /// Verify a presented token. Every failure mode (malformed, bad
    /// signature, expired) collapses into [`AuthError::InvalidToken`];
    /// callers never learn which check failed.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Password hashing service - the irreversible credential transform.
pub trait PasswordService: Send + Sync {
    /// Hash a plaintext password into its stored form. Randomized: two
    /// calls on the same input produce different stored forms.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Check a plaintext against a stored form without recovering it.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    /// Deliberately opaque - covers malformed, forged and expired tokens.
    #[error("invalid or expired token")]
    InvalidToken,

    #[error("user for this token no longer exists")]
    UserGone,

    #[error("auth internal error: {0}")]
    Internal(String),
}
