//! Argon2id password hashing, verification, and strength validation.
//!
//! Hashes are stored as PHC strings, so the salt and parameters travel with
//! the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a plaintext password with Argon2id and a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// `Ok(false)` means the password is wrong; `Err` means the stored hash is
/// unreadable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Reject passwords shorter than [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}
