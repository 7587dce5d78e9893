use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// Open a connection pool against the configured database.
pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("connect to database")
}

/// Apply this crate's schema migrations.
///
/// The unique indexes they install (users.email, pw_resets.token_hash)
/// are the storage-level backstop behind the validator's availability
/// checks.
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("run migrations")
}
