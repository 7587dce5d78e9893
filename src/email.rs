use async_trait::async_trait;

/// Out-of-band delivery of password-reset notices.
///
/// This crate never sends mail itself; the consuming application plugs
/// in its transport. A delivery failure fails the reset initiation that
/// triggered it — no retries here.
#[async_trait]
pub trait EmailDelivery: Send + Sync {
    async fn deliver_reset(&self, email: &str, token: &str) -> anyhow::Result<()>;
}

/// Delivery that discards every notice. For tests and for callers that
/// hand the plaintext token to the user through some other channel.
#[derive(Debug, Default, Clone)]
pub struct NullDelivery;

#[async_trait]
impl EmailDelivery for NullDelivery {
    async fn deliver_reset(&self, _email: &str, _token: &str) -> anyhow::Result<()> {
        Ok(())
    }
}
