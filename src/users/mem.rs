use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::error::Error;
use crate::users::store::UserStore;
use crate::users::types::User;

/// In-memory [`UserStore`].
///
/// Backs the test suites and any caller that does not need durable
/// storage. Clones share the same records. Email uniqueness is checked
/// under the same lock as the insert, so a duplicate can never slip
/// between check and write.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    next_id: i64,
}

impl Inner {
    fn email_taken_by_other(&self, email: &str, id: i64) -> bool {
        self.users.iter().any(|u| u.email == email && u.id != id)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn by_id(&self, id: i64) -> Result<Option<User>, Error> {
        let inner = self.inner.lock().expect("user store lock poisoned");
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let inner = self.inner.lock().expect("user store lock poisoned");
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn by_remember_hash(&self, remember_hash: &str) -> Result<Option<User>, Error> {
        let inner = self.inner.lock().expect("user store lock poisoned");
        Ok(inner
            .users
            .iter()
            .find(|u| u.remember_hash == remember_hash)
            .cloned())
    }

    async fn create(&self, user: &mut User) -> Result<(), Error> {
        let mut inner = self.inner.lock().expect("user store lock poisoned");
        if inner.email_taken_by_other(&user.email, 0) {
            return Err(Error::EmailTaken);
        }
        inner.next_id += 1;
        user.id = inner.next_id;
        user.created_at = OffsetDateTime::now_utc();

        // Transient secrets stay with the caller.
        let mut stored = user.clone();
        stored.password.clear();
        stored.remember.clear();
        inner.users.push(stored);
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), Error> {
        let mut inner = self.inner.lock().expect("user store lock poisoned");
        if inner.email_taken_by_other(&user.email, user.id) {
            return Err(Error::EmailTaken);
        }
        let slot = inner
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(Error::NotFound)?;
        *slot = user.clone();
        slot.password.clear();
        slot.remember.clear();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        let mut inner = self.inner.lock().expect("user store lock poisoned");
        inner.users.retain(|u| u.id != id);
        Ok(())
    }
}
