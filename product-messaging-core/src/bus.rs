// product-messaging-core/src/bus.rs
use std::sync::Arc;
use async_trait::async_trait;
use crate::{DeliveryHandler, MessageProperties, MessagingError};

#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Publishes `body` and resolves once the broker has accepted it.
    ///
    /// An empty `exchange` addresses the default exchange, which routes
    /// straight to the queue named by `routing_key`.
    async fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        properties: MessageProperties,
        body: Vec<u8>,
    ) -> Result<(), MessagingError>;

    async fn subscribe(
        &self,
        queue: &str,
        handler: Arc<dyn DeliveryHandler>,
    ) -> Result<(), MessagingError>;
}
