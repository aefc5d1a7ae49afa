//! Password and client-secret hashing using Argon2id.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::error::AuthError;

fn peppered<'a>(secret: &'a str, pepper: Option<&str>) -> std::borrow::Cow<'a, str> {
    match pepper {
        Some(p) => format!("{p}{secret}").into(),
        None => secret.into(),
    }
}

/// Hash a plaintext secret to an Argon2id PHC-format string.
///
/// If `pepper` is provided it is prepended to the secret before
/// hashing — the same pepper must be passed at verification time.
/// Salt is randomly generated per hash.
pub fn hash_password(secret: &str, pepper: Option<&str>) -> Result<String, AuthError> {
    let input = peppered(secret, pepper);
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(input.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Crypto(format!("hash error: {e}")))
}

/// Verify a plaintext secret against an Argon2id PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
/// `Err(AuthError::Crypto)` if the stored hash is malformed.
pub fn verify_password(
    secret: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let input = peppered(secret, pepper);

    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    let argon2 = Argon2::default();
    match argon2.verify_password(input.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}
