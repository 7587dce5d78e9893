use time::OffsetDateTime;

use crate::error::Error;
use crate::hash::HmacHasher;
use crate::pw_resets::store::PwResetStore;
use crate::pw_resets::types::PwReset;
use crate::token;

type PwResetValFn<S> = fn(&PwResetValidator<S>, &mut PwReset) -> Result<(), Error>;

/// Validation layer over a [`PwResetStore`]; same ordered,
/// short-circuiting shape as the user pipeline.
pub struct PwResetValidator<S> {
    store: S,
    hmac: HmacHasher,
}

impl<S: PwResetStore> PwResetValidator<S> {
    pub fn new(store: S, hmac: HmacHasher) -> Self {
        Self { store, hmac }
    }

    fn run(&self, pw_reset: &mut PwReset, fns: &[PwResetValFn<S>]) -> Result<(), Error> {
        for f in fns {
            f(self, pw_reset)?;
        }
        Ok(())
    }

    /// Lookup by plaintext token; only the keyed hash reaches the
    /// store. Absence is reported as [`Error::NotFound`] — the service
    /// boundary turns it into `TokenInvalid`.
    pub async fn by_token(&self, token: &str) -> Result<PwReset, Error> {
        let mut probe = PwReset {
            token: token.to_string(),
            ..PwReset::default()
        };
        self.run(&mut probe, &[Self::hmac_token])?;
        self.store
            .by_token_hash(&probe.token_hash)
            .await?
            .ok_or(Error::NotFound)
    }

    /// Issues the record: generates a token when the caller supplied
    /// none, hashes it, stamps `created_at`, persists. The plaintext
    /// stays on the record for the caller to deliver out-of-band.
    pub async fn create(&self, pw_reset: &mut PwReset) -> Result<(), Error> {
        self.run(
            pw_reset,
            &[
                Self::require_user_id,
                Self::set_token_if_unset,
                Self::hmac_token,
                Self::stamp_created_at,
            ],
        )?;
        self.store.create(pw_reset).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        if id <= 0 {
            return Err(Error::IdInvalid);
        }
        self.store.delete(id).await
    }

    fn require_user_id(&self, pw_reset: &mut PwReset) -> Result<(), Error> {
        if pw_reset.user_id <= 0 {
            return Err(Error::UserIdRequired);
        }
        Ok(())
    }

    fn set_token_if_unset(&self, pw_reset: &mut PwReset) -> Result<(), Error> {
        if !pw_reset.token.is_empty() {
            return Ok(());
        }
        pw_reset.token = token::generate_token()?;
        Ok(())
    }

    fn hmac_token(&self, pw_reset: &mut PwReset) -> Result<(), Error> {
        if pw_reset.token.is_empty() {
            return Ok(());
        }
        pw_reset.token_hash = self.hmac.hash(&pw_reset.token);
        Ok(())
    }

    fn stamp_created_at(&self, pw_reset: &mut PwReset) -> Result<(), Error> {
        pw_reset.created_at = OffsetDateTime::now_utc();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pw_resets::mem::InMemoryPwResetStore;

    fn validator() -> PwResetValidator<InMemoryPwResetStore> {
        PwResetValidator::new(
            InMemoryPwResetStore::default(),
            HmacHasher::new("reset-test-key"),
        )
    }

    #[tokio::test]
    async fn create_requires_a_user_id() {
        let v = validator();
        let mut pwr = PwReset::for_user(0);
        let err = v.create(&mut pwr).await.unwrap_err();
        assert!(matches!(err, Error::UserIdRequired));
    }

    #[tokio::test]
    async fn create_generates_token_and_finds_it_by_plaintext() {
        let v = validator();
        let mut pwr = PwReset::for_user(42);
        v.create(&mut pwr).await.unwrap();
        assert!(!pwr.token.is_empty());
        assert!(!pwr.token_hash.is_empty());

        let found = v.by_token(&pwr.token).await.unwrap();
        assert_eq!(found.id, pwr.id);
        assert_eq!(found.user_id, 42);
        // The stored row carries only the hash.
        assert!(found.token.is_empty());
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let v = validator();
        let err = v.by_token("nothing-here").await.unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }

    #[tokio::test]
    async fn delete_rejects_non_positive_ids() {
        let v = validator();
        let err = v.delete(0).await.unwrap_err();
        assert!(matches!(err, Error::IdInvalid));
    }
}
