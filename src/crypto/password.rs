//! Argon2id password hashes stored as PHC strings
//! (`$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`), salt included.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::AppError;

/// Hash `password` under a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Crypto(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// `Ok(false)` on mismatch, `Err` if `hash` is not a valid PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Crypto(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify() {
        let hash = hash_password("Admin@123").unwrap();
        assert!(hash.starts_with("$argon2id$"));

        assert!(verify_password("Admin@123", &hash).unwrap());
        assert!(!verify_password("admin@123", &hash).unwrap());
    }

    #[test]
    fn test_salt_changes_hash() {
        let first = hash_password("Admin@123").unwrap();
        let second = hash_password("Admin@123").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("Admin@123", &second).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_rejected() {
        assert!(matches!(
            verify_password("Admin@123", "not-a-phc-string"),
            Err(AppError::Crypto(_))
        ));
    }
}
