use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Hash a password with the server-wide pepper appended.
///
/// Argon2 with default parameters and a fresh random salt; the
/// resulting PHC string embeds both, so verification needs only the
/// pepper.
pub fn hash_password(plain: &str, pepper: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let peppered = format!("{plain}{pepper}");
    let hash = argon2
        .hash_password(peppered.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Constant-time verification of a peppered password against a stored
/// PHC hash. A mismatch is `Ok(false)`; a hash that cannot be parsed is
/// an error and must not be treated as a mismatch.
pub fn verify_password(plain: &str, pepper: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    let peppered = format!("{plain}{pepper}");
    Ok(Argon2::default()
        .verify_password(peppered.as_bytes(), &parsed)
        .is_ok())
}
