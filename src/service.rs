use std::sync::Arc;

use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::config::AuthConfig;
use crate::email::EmailDelivery;
use crate::error::Error;
use crate::hash::HmacHasher;
use crate::password;
use crate::pw_resets::{PgPwResetStore, PwReset, PwResetStore, PwResetValidator};
use crate::token;
use crate::users::{PgUserStore, User, UserStore, UserValidator};

/// Top-level authentication facade.
///
/// Owns the validated user and reset pipelines and adds what sits above
/// them: password verification, remember-token issuance, and the reset
/// lifecycle. Construct one per process and share it; the secrets
/// inside are read-only after construction.
pub struct UserService<U, P> {
    users: UserValidator<U>,
    pw_resets: PwResetValidator<P>,
    mailer: Arc<dyn EmailDelivery>,
    pepper: String,
}

impl<U: UserStore, P: PwResetStore> UserService<U, P> {
    pub fn new(
        user_store: U,
        pw_reset_store: P,
        config: &AuthConfig,
        mailer: Arc<dyn EmailDelivery>,
    ) -> Self {
        let hmac = HmacHasher::new(&config.hmac_key);
        Self {
            users: UserValidator::new(user_store, hmac.clone(), &config.pepper),
            pw_resets: PwResetValidator::new(pw_reset_store, hmac),
            mailer,
            pepper: config.pepper.clone(),
        }
    }

    /// Validated user operations (lookups, create, update, delete).
    pub fn users(&self) -> &UserValidator<U> {
        &self.users
    }

    /// Verify an email/password pair.
    ///
    /// An unknown email propagates as [`Error::NotFound`] unchanged; a
    /// known email with the wrong password is
    /// [`Error::PasswordIncorrect`]. Any other verification failure
    /// (such as a corrupted stored hash) propagates as-is.
    pub async fn authenticate(&self, email: &str, password_plain: &str) -> Result<User, Error> {
        let user = self.users.by_email(email).await?;
        let ok = password::verify_password(password_plain, &self.pepper, &user.password_hash)?;
        if !ok {
            warn!(user_id = user.id, "authentication failed: wrong password");
            return Err(Error::PasswordIncorrect);
        }
        debug!(user_id = user.id, "authentication succeeded");
        Ok(user)
    }

    /// Ensure the user carries a remember token, persisting its keyed
    /// hash through the update pipeline.
    ///
    /// Returns the plaintext for the caller to transport (typically a
    /// cookie value); at the moment of return the stored hash matches
    /// it. When the user already holds a plaintext, it is returned
    /// untouched.
    pub async fn issue_remember(&self, user: &mut User) -> Result<String, Error> {
        if user.remember.is_empty() {
            user.remember = token::generate_token()?;
            self.users.update(user).await?;
            debug!(user_id = user.id, "remember token rotated");
        }
        Ok(user.remember.clone())
    }

    /// Start a password reset for the account behind `email`.
    ///
    /// Issues a single-use token, persists only its hash, and hands the
    /// plaintext to the mail port. Delivery failure fails the
    /// initiation. The plaintext is also returned to the caller.
    pub async fn initiate_reset(&self, email: &str) -> Result<String, Error> {
        let user = self.users.by_email(email).await?;
        let mut pw_reset = PwReset::for_user(user.id);
        self.pw_resets.create(&mut pw_reset).await?;
        self.mailer
            .deliver_reset(&user.email, &pw_reset.token)
            .await?;
        info!(user_id = user.id, "password reset initiated");
        Ok(pw_reset.token)
    }

    /// Complete a password reset.
    ///
    /// Unknown and expired tokens are both [`Error::TokenInvalid`], by
    /// design indistinguishable. On success the new password runs
    /// through the full update pipeline and the consumed record is
    /// deleted, making the token single-use.
    pub async fn complete_reset(&self, token: &str, new_password: &str) -> Result<User, Error> {
        let pw_reset = match self.pw_resets.by_token(token).await {
            Ok(p) => p,
            Err(Error::NotFound) => {
                warn!("password reset attempted with unknown token");
                return Err(Error::TokenInvalid);
            }
            Err(e) => return Err(e),
        };
        if pw_reset.is_expired(OffsetDateTime::now_utc()) {
            warn!(
                user_id = pw_reset.user_id,
                "password reset attempted with expired token"
            );
            return Err(Error::TokenInvalid);
        }

        let mut user = self.users.by_id(pw_reset.user_id).await?;
        user.password = new_password.to_string();
        self.users.update(&mut user).await?;
        self.pw_resets.delete(pw_reset.id).await?;
        info!(user_id = user.id, "password reset completed");
        Ok(user)
    }
}

impl UserService<PgUserStore, PgPwResetStore> {
    /// Composition root for the Postgres-backed stack.
    pub fn with_postgres(pool: PgPool, config: &AuthConfig, mailer: Arc<dyn EmailDelivery>) -> Self {
        Self::new(
            PgUserStore::new(pool.clone()),
            PgPwResetStore::new(pool),
            config,
            mailer,
        )
    }
}
