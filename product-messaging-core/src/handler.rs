// product-messaging-core/src/handler.rs
use crate::{InboundDelivery, MessagingError};
use async_trait::async_trait;

/// Callback invoked once per message delivered to a subscribed queue.
///
/// Returning `Ok` acknowledges the delivery. An `Err` sends it through the
/// bus's [`crate::RetryPolicy`]: redelivered after the retry delay until the
/// retries run out, then parked in `<queue>.dlq`.
#[async_trait]
pub trait DeliveryHandler: Send + Sync {
    async fn handle(&self, delivery: &InboundDelivery) -> Result<(), MessagingError>;
}
