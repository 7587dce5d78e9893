use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Error;
use crate::pw_resets::store::PwResetStore;
use crate::pw_resets::types::PwReset;

/// Postgres-backed [`PwResetStore`].
pub struct PgPwResetStore {
    pool: PgPool,
}

impl PgPwResetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PwResetStore for PgPwResetStore {
    async fn by_token_hash(&self, token_hash: &str) -> Result<Option<PwReset>, Error> {
        let pw_reset = sqlx::query_as::<_, PwReset>(
            r#"
            SELECT id, user_id, token_hash, created_at
            FROM pw_resets
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Internal(e.into()))?;
        Ok(pw_reset)
    }

    async fn create(&self, pw_reset: &mut PwReset) -> Result<(), Error> {
        let row = sqlx::query_as::<_, PwReset>(
            r#"
            INSERT INTO pw_resets (user_id, token_hash, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token_hash, created_at
            "#,
        )
        .bind(pw_reset.user_id)
        .bind(&pw_reset.token_hash)
        .bind(pw_reset.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Error::Internal(e.into()))?;
        pw_reset.id = row.id;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        sqlx::query("DELETE FROM pw_resets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Internal(e.into()))?;
        Ok(())
    }
}
