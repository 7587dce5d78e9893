use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Error;
use crate::users::store::UserStore;
use crate::users::types::User;

const UNIQUE_VIOLATION: &str = "23505";

/// Postgres-backed [`UserStore`].
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// The UNIQUE index on users.email is the authoritative uniqueness
/// check; a violation surfaces as [`Error::EmailTaken`] no matter which
/// writer lost the race.
fn map_write_err(e: sqlx::Error) -> Error {
    if let sqlx::Error::Database(ref db) = e {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return Error::EmailTaken;
        }
    }
    Error::Internal(e.into())
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn by_id(&self, id: i64) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, remember_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Internal(e.into()))?;
        Ok(user)
    }

    async fn by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, remember_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Internal(e.into()))?;
        Ok(user)
    }

    async fn by_remember_hash(&self, remember_hash: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, remember_hash, created_at
            FROM users
            WHERE remember_hash = $1
            "#,
        )
        .bind(remember_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Internal(e.into()))?;
        Ok(user)
    }

    async fn create(&self, user: &mut User) -> Result<(), Error> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, remember_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, remember_hash, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.remember_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_err)?;
        user.id = row.id;
        user.created_at = row.created_at;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3, password_hash = $4, remember_hash = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.remember_hash)
        .execute(&self.pool)
        .await
        .map_err(map_write_err)?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Internal(e.into()))?;
        Ok(())
    }
}
