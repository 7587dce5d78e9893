use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::Error;
use crate::hash::HmacHasher;
use crate::password;
use crate::token;
use crate::users::store::UserStore;
use crate::users::types::User;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,16}$").unwrap();
}

const PASSWORD_MIN_CHARS: usize = 8;
const REMEMBER_MIN_BYTES: usize = 32;

type UserValFn<S> = fn(&UserValidator<S>, &mut User) -> Result<(), Error>;

/// Validation layer over a [`UserStore`].
///
/// Each operation runs an ordered chain of normalization and validation
/// steps and stops at the first error; only then does the call reach
/// the wrapped store. Order is load-bearing: later steps rely on
/// earlier normalization (the format check assumes a lowercased email,
/// the hash-presence checks assume hashing already ran).
pub struct UserValidator<S> {
    store: S,
    hmac: HmacHasher,
    pepper: String,
}

impl<S: UserStore> UserValidator<S> {
    pub fn new(store: S, hmac: HmacHasher, pepper: impl Into<String>) -> Self {
        Self {
            store,
            hmac,
            pepper: pepper.into(),
        }
    }

    fn run(&self, user: &mut User, fns: &[UserValFn<S>]) -> Result<(), Error> {
        for f in fns {
            f(self, user)?;
        }
        Ok(())
    }

    pub async fn by_id(&self, id: i64) -> Result<User, Error> {
        if id <= 0 {
            return Err(Error::IdInvalid);
        }
        self.store.by_id(id).await?.ok_or(Error::NotFound)
    }

    /// Lookup by email; normalizes before delegating, mutates nothing.
    pub async fn by_email(&self, email: &str) -> Result<User, Error> {
        let mut probe = User {
            email: email.to_string(),
            ..User::default()
        };
        self.run(&mut probe, &[Self::normalize_email])?;
        self.store
            .by_email(&probe.email)
            .await?
            .ok_or(Error::NotFound)
    }

    /// Lookup by remember-token plaintext; only the keyed hash ever
    /// reaches the store.
    pub async fn by_remember(&self, token: &str) -> Result<User, Error> {
        let mut probe = User {
            remember: token.to_string(),
            ..User::default()
        };
        self.run(&mut probe, &[Self::hmac_remember])?;
        self.store
            .by_remember_hash(&probe.remember_hash)
            .await?
            .ok_or(Error::NotFound)
    }

    pub async fn create(&self, user: &mut User) -> Result<(), Error> {
        self.run(
            user,
            &[
                Self::password_required,
                Self::password_min_length,
                Self::hash_password,
                Self::password_hash_required,
                Self::set_remember_if_unset,
                Self::remember_min_bytes,
                Self::hmac_remember,
                Self::remember_hash_required,
                Self::normalize_email,
                Self::email_required,
                Self::email_format,
            ],
        )?;
        self.email_available(user).await?;
        self.store.create(user).await
    }

    /// Same chain as create, minus the steps that force a password or a
    /// fresh remember token: an empty password means "no change", an
    /// empty remember keeps the stored hash.
    pub async fn update(&self, user: &mut User) -> Result<(), Error> {
        self.run(
            user,
            &[
                Self::password_min_length,
                Self::hash_password,
                Self::password_hash_required,
                Self::remember_min_bytes,
                Self::hmac_remember,
                Self::remember_hash_required,
                Self::normalize_email,
                Self::email_required,
                Self::email_format,
            ],
        )?;
        self.email_available(user).await?;
        self.store.update(user).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        if id <= 0 {
            return Err(Error::IdInvalid);
        }
        self.store.delete(id).await
    }

    fn password_required(&self, user: &mut User) -> Result<(), Error> {
        if user.password.is_empty() {
            return Err(Error::PasswordRequired);
        }
        Ok(())
    }

    fn password_min_length(&self, user: &mut User) -> Result<(), Error> {
        if user.password.is_empty() {
            return Ok(());
        }
        if user.password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(Error::PasswordTooShort);
        }
        Ok(())
    }

    /// Turns the transient password into its hash and clears the
    /// plaintext. Skipped when the password is empty — the "no change"
    /// signal on update.
    fn hash_password(&self, user: &mut User) -> Result<(), Error> {
        if user.password.is_empty() {
            return Ok(());
        }
        user.password_hash = password::hash_password(&user.password, &self.pepper)?;
        user.password.clear();
        Ok(())
    }

    fn password_hash_required(&self, user: &mut User) -> Result<(), Error> {
        if user.password_hash.is_empty() {
            return Err(Error::PasswordRequired);
        }
        Ok(())
    }

    fn set_remember_if_unset(&self, user: &mut User) -> Result<(), Error> {
        if !user.remember.is_empty() {
            return Ok(());
        }
        user.remember = token::generate_token()?;
        Ok(())
    }

    fn remember_min_bytes(&self, user: &mut User) -> Result<(), Error> {
        if user.remember.is_empty() {
            return Ok(());
        }
        if token::decoded_len(&user.remember)? < REMEMBER_MIN_BYTES {
            return Err(Error::RememberTooShort);
        }
        Ok(())
    }

    fn hmac_remember(&self, user: &mut User) -> Result<(), Error> {
        if user.remember.is_empty() {
            return Ok(());
        }
        user.remember_hash = self.hmac.hash(&user.remember);
        Ok(())
    }

    fn remember_hash_required(&self, user: &mut User) -> Result<(), Error> {
        if user.remember_hash.is_empty() {
            return Err(Error::RememberRequired);
        }
        Ok(())
    }

    fn normalize_email(&self, user: &mut User) -> Result<(), Error> {
        user.email = user.email.trim().to_lowercase();
        Ok(())
    }

    fn email_required(&self, user: &mut User) -> Result<(), Error> {
        if user.email.is_empty() {
            return Err(Error::EmailRequired);
        }
        Ok(())
    }

    fn email_format(&self, user: &mut User) -> Result<(), Error> {
        if user.email.is_empty() {
            return Ok(());
        }
        if !EMAIL_RE.is_match(&user.email) {
            return Err(Error::EmailInvalid);
        }
        Ok(())
    }

    /// Absent ⇒ available. Present with the same id ⇒ available, so an
    /// update that keeps its email never conflicts with itself. Present
    /// under a different id ⇒ taken.
    async fn email_available(&self, user: &User) -> Result<(), Error> {
        let existing = match self.store.by_email(&user.email).await? {
            None => return Ok(()),
            Some(u) => u,
        };
        if existing.id != user.id {
            debug!(email = %user.email, "email already taken");
            return Err(Error::EmailTaken);
        }
        Ok(())
    }
}
