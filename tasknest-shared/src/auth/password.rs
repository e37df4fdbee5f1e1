/// Password hashing using Argon2id
///
/// Passwords are stored in PHC string format, which embeds the algorithm,
/// parameters, and salt alongside the digest. Verification is constant-time.
///
/// # Example
///
/// ```
/// use tasknest_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("hunter2!")?;
/// assert!(verify_password("hunter2!", &hash)?);
/// assert!(!verify_password("hunter3!", &hash)?);
/// # Ok(())
/// # }
/// ```
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Hashes a password with Argon2id and a fresh random salt
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored hash
///
/// Returns `Ok(false)` for a wrong password; an `Err` only indicates a
/// malformed stored hash or an internal failure.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` when the stored hash cannot be parsed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!(
            "Verification failed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_phc_format() {
        let hash = hash_password("test_password_123").expect("Hash should succeed");
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let hash1 = hash_password("same_password").expect("Hash 1 should succeed");
        let hash2 = hash_password("same_password").expect("Hash 2 should succeed");

        // Different salts = different hashes
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("correct_password").expect("Hash should succeed");
        let result = verify_password("correct_password", &hash).expect("Verify should succeed");
        assert!(result, "Correct password should verify");
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("correct_password").expect("Hash should succeed");
        let result = verify_password("wrong_password", &hash).expect("Verify should succeed");
        assert!(!result, "Wrong password should not verify");
    }

    #[test]
    fn test_verify_password_empty() {
        let hash = hash_password("password").expect("Hash should succeed");
        let result = verify_password("", &hash).expect("Verify should succeed");
        assert!(!result, "Empty password should not verify");
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("password", "not_a_phc_string");
        assert!(result.is_err(), "Invalid hash should return error");
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let passwords = vec![
            "simple",
            "with spaces",
            "with-special-chars!@#$%",
            "unicode-лозинка-パスワード",
        ];

        for password in passwords {
            let hash = hash_password(password).expect("Hash should succeed");
            let verified = verify_password(password, &hash).expect("Verify should succeed");
            assert!(verified, "Password '{}' should verify", password);
        }
    }
}
