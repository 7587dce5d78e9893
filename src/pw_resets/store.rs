use async_trait::async_trait;

use crate::error::Error;
use crate::pw_resets::types::PwReset;

/// Storage port for password-reset records.
///
/// Lookups return `Ok(None)` for "no such record"; the caller decides
/// what absence means (the service collapses it into `TokenInvalid`).
/// Adapters persist `created_at` exactly as given — the validator
/// stamps it, and the expiry window is computed from it on every use.
#[async_trait]
pub trait PwResetStore: Send + Sync {
    async fn by_token_hash(&self, token_hash: &str) -> Result<Option<PwReset>, Error>;
    /// Assigns `id` on the given record.
    async fn create(&self, pw_reset: &mut PwReset) -> Result<(), Error>;
    async fn delete(&self, id: i64) -> Result<(), Error>;
}
