use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User identity record.
///
/// `password` and `remember` are transient, request-scoped values: the
/// validation pipeline turns them into `password_hash` and
/// `remember_hash` before any write, and no store ever persists them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub remember_hash: String,
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing, default)]
    #[sqlx(default)]
    pub password: String,
    #[serde(skip_serializing, default)]
    #[sqlx(default)]
    pub remember: String,
}

impl User {
    /// Candidate for the create pipeline. The id, hashes and timestamp
    /// are filled in downstream.
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            ..Self::default()
        }
    }
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            email: String::new(),
            password_hash: String::new(),
            remember_hash: String::new(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            password: String::new(),
            remember: String::new(),
        }
    }
}
