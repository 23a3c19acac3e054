//! Password hashing for stored user credentials.
//!
//! Passwords are stored as Argon2id PHC strings; the plaintext never reaches
//! the database or any response body.

use crate::errors::ServerResult;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

pub fn hash_password(password: &str) -> ServerResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Checks `password` against a stored PHC string. Errors only when `hash` is
/// not a valid PHC string; a mismatch is `Ok(false)`.
pub fn verify_password(password: &str, hash: &str) -> ServerResult<bool> {
    let parsed_hash = PasswordHash::new(hash)?;
    let argon2 = Argon2::default();
    Ok(argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok())
}

/// Hashes on the blocking pool so the Argon2 work does not stall the runtime.
pub async fn hash_password_blocking(password: String) -> ServerResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}
