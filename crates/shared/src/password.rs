//! Admin password hashing using Argon2id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Minimum length accepted for a new admin password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Error type for password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),

    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

/// Why a password change request was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordChangeError {
    #[error("Current password is incorrect")]
    WrongCurrentPassword,

    #[error("New password must have at least 8 characters")]
    TooShort,

    #[error("New password must differ from the current one")]
    Unchanged,
}

// OWASP 2024 baseline: 19 MiB memory, 2 iterations, 1 lane.
const MEMORY_COST: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

fn create_argon2() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| PasswordError::HashError(format!("Failed to create Argon2 params: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password and returns a PHC string (`$argon2id$...`).
///
/// ```
/// use shared::password::hash_password;
///
/// let hash = hash_password("festa-2025").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = create_argon2()?;

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored PHC hash.
///
/// The parameters embedded in the hash are used, so older hashes keep
/// verifying after the cost settings change.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

/// Checks a password change against the stored hash and returns the new hash.
///
/// The current password must verify, the new one must be long enough and
/// must not verify against the stored hash.
pub fn change_password(
    current_password: &str,
    new_password: &str,
    stored_hash: &str,
) -> Result<Result<String, PasswordChangeError>, PasswordError> {
    if !verify_password(current_password, stored_hash)? {
        return Ok(Err(PasswordChangeError::WrongCurrentPassword));
    }
    if new_password.chars().count() < MIN_PASSWORD_LENGTH {
        return Ok(Err(PasswordChangeError::TooShort));
    }
    if verify_password(new_password, stored_hash)? {
        return Ok(Err(PasswordChangeError::Unchanged));
    }

    hash_password(new_password).map(Ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_returns_phc_format() {
        let hash = hash_password("test_password").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
    }

    #[test]
    fn test_hash_password_salts_differ() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("password", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }

    #[test]
    fn test_change_password_success() {
        let stored = hash_password("old-password").unwrap();
        let new_hash = change_password("old-password", "brand-new-pass", &stored)
            .unwrap()
            .unwrap();
        assert!(verify_password("brand-new-pass", &new_hash).unwrap());
        assert!(!verify_password("old-password", &new_hash).unwrap());
    }

    #[test]
    fn test_change_password_wrong_current() {
        let stored = hash_password("old-password").unwrap();
        let result = change_password("not-it", "brand-new-pass", &stored).unwrap();
        assert_eq!(result, Err(PasswordChangeError::WrongCurrentPassword));
    }

    #[test]
    fn test_change_password_too_short() {
        let stored = hash_password("old-password").unwrap();
        let result = change_password("old-password", "short", &stored).unwrap();
        assert_eq!(result, Err(PasswordChangeError::TooShort));
    }

    #[test]
    fn test_change_password_same_as_current() {
        let stored = hash_password("old-password").unwrap();
        let result = change_password("old-password", "old-password", &stored).unwrap();
        assert_eq!(result, Err(PasswordChangeError::Unchanged));
    }
}
