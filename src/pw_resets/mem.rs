use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::Error;
use crate::pw_resets::store::PwResetStore;
use crate::pw_resets::types::PwReset;

/// In-memory [`PwResetStore`]; clones share the same records.
#[derive(Clone, Default)]
pub struct InMemoryPwResetStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    resets: Vec<PwReset>,
    next_id: i64,
}

#[async_trait]
impl PwResetStore for InMemoryPwResetStore {
    async fn by_token_hash(&self, token_hash: &str) -> Result<Option<PwReset>, Error> {
        let inner = self.inner.lock().expect("pw reset store lock poisoned");
        Ok(inner
            .resets
            .iter()
            .find(|r| r.token_hash == token_hash)
            .cloned())
    }

    async fn create(&self, pw_reset: &mut PwReset) -> Result<(), Error> {
        let mut inner = self.inner.lock().expect("pw reset store lock poisoned");
        inner.next_id += 1;
        pw_reset.id = inner.next_id;

        let mut stored = pw_reset.clone();
        stored.token.clear();
        inner.resets.push(stored);
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        let mut inner = self.inner.lock().expect("pw reset store lock poisoned");
        inner.resets.retain(|r| r.id != id);
        Ok(())
    }
}
