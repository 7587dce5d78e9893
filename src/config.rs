use serde::Deserialize;

/// Process-wide secrets and connection settings.
///
/// Loaded once at startup and read-only afterwards, so both secrets are
/// safe for unsynchronized concurrent reads. Rotating `hmac_key`
/// invalidates every outstanding remember and reset token; rotating
/// `pepper` invalidates every stored password hash.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub database_url: String,
    /// Appended to every password before hashing.
    pub pepper: String,
    /// Key for the deterministic token hasher.
    pub hmac_key: String,
}

impl AuthConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")?,
            pepper: std::env::var("AUTH_PEPPER")?,
            hmac_key: std::env::var("AUTH_HMAC_KEY")?,
        })
    }
}
