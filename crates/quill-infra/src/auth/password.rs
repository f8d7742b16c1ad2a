//! Argon2 password hashing - the credential store.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use quill_core::ports::{AuthError, PasswordService};

/// Argon2-based credential store. Each hash gets a fresh random salt,
/// so hashing the same plaintext twice yields different stored forms;
/// verification recomputes from the embedded salt and compares in
/// constant time.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_the_right_password_only() {
        let service = Argon2PasswordService::new();
        let hash = service.hash("correct horse battery").unwrap();

        assert!(service.verify("correct horse battery", &hash).unwrap());
        assert!(!service.verify("wrong horse battery", &hash).unwrap());
    }

    #[test]
    fn same_plaintext_never_hashes_identically() {
        let service = Argon2PasswordService::new();
        let first = service.hash("hunter22").unwrap();
        let second = service.hash("hunter22").unwrap();

        assert_ne!(first, second);
        assert!(service.verify("hunter22", &first).unwrap());
        assert!(service.verify("hunter22", &second).unwrap());
    }

    #[test]
    fn stored_form_is_not_the_plaintext() {
        let service = Argon2PasswordService::new();
        let hash = service.hash("sup3rsecret").unwrap();
        assert!(!hash.contains("sup3rsecret"));
    }
}
