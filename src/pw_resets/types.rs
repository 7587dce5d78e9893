use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Duration, OffsetDateTime};

/// How long a reset token stays usable after issuance.
pub const RESET_TOKEN_TTL: Duration = Duration::hours(12);

/// Ephemeral credential-recovery record.
///
/// Expiry is a computed predicate over `created_at`, never a stored
/// flag: an expired row stays in storage until external housekeeping
/// removes it, but every use re-evaluates the window. The transient
/// `token` is handed to the issuing caller exactly once and never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PwReset {
    pub id: i64,
    pub user_id: i64,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing, default)]
    #[sqlx(default)]
    pub token: String,
}

impl PwReset {
    /// Candidate for the create pipeline; the token, its hash and the
    /// timestamp are filled in downstream.
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now - self.created_at > RESET_TOKEN_TTL
    }
}

impl Default for PwReset {
    fn default() -> Self {
        Self {
            id: 0,
            user_id: 0,
            token_hash: String::new(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            token: String::new(),
        }
    }
}
