use async_trait::async_trait;

use crate::error::Error;
use crate::users::types::User;

/// Storage port for user records.
///
/// Lookups return `Ok(None)` for "no such user" so callers can tell
/// absence apart from infrastructure failure. `create` and `update`
/// must enforce email uniqueness atomically and report a duplicate as
/// [`Error::EmailTaken`]: the validation layer runs its own
/// availability check first, but that check-then-act sequence cannot
/// win a race between two concurrent writers — the adapter's constraint
/// is the authority.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn by_id(&self, id: i64) -> Result<Option<User>, Error>;
    /// `email` arrives already normalized (lowercased, trimmed).
    async fn by_email(&self, email: &str) -> Result<Option<User>, Error>;
    async fn by_remember_hash(&self, remember_hash: &str) -> Result<Option<User>, Error>;
    /// Assigns `id` and `created_at` on the given record.
    async fn create(&self, user: &mut User) -> Result<(), Error>;
    async fn update(&self, user: &User) -> Result<(), Error>;
    async fn delete(&self, id: i64) -> Result<(), Error>;
}
