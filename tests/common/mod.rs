#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shutterbox_auth::email::EmailDelivery;
use shutterbox_auth::pw_resets::InMemoryPwResetStore;
use shutterbox_auth::users::InMemoryUserStore;
use shutterbox_auth::{AuthConfig, UserService};

pub const PEPPER: &str = "integration-pepper";
pub const HMAC_KEY: &str = "integration-hmac-key";

/// Mailer that records every delivery instead of sending anything.
#[derive(Clone, Default)]
pub struct CapturingMailer {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl EmailDelivery for CapturingMailer {
    async fn deliver_reset(&self, email: &str, token: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), token.to_string()));
        Ok(())
    }
}

/// Mailer whose every delivery fails.
#[derive(Clone, Default)]
pub struct FailingMailer;

#[async_trait]
impl EmailDelivery for FailingMailer {
    async fn deliver_reset(&self, _email: &str, _token: &str) -> anyhow::Result<()> {
        anyhow::bail!("smtp unreachable")
    }
}

pub struct Harness {
    pub service: UserService<InMemoryUserStore, InMemoryPwResetStore>,
    pub user_store: InMemoryUserStore,
    pub pw_reset_store: InMemoryPwResetStore,
    pub mailer: CapturingMailer,
}

/// Full in-memory stack sharing store handles with the test body.
pub fn harness() -> Harness {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "shutterbox_auth=debug".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init()
        .ok();

    let config = AuthConfig {
        database_url: String::new(),
        pepper: PEPPER.to_string(),
        hmac_key: HMAC_KEY.to_string(),
    };
    let user_store = InMemoryUserStore::default();
    let pw_reset_store = InMemoryPwResetStore::default();
    let mailer = CapturingMailer::default();
    let service = UserService::new(
        user_store.clone(),
        pw_reset_store.clone(),
        &config,
        Arc::new(mailer.clone()),
    );
    Harness {
        service,
        user_store,
        pw_reset_store,
        mailer,
    }
}
