// product-messaging-core/src/client.rs
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::{MessageBus, MessageProperties, MessagingError, PRODUCT_BINDING};

/// Destination a client operation publishes to.
///
/// Published through the default exchange, so the name doubles as the
/// routing key and the target queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub exchange: String,
    pub routing_key: String,
}

impl Binding {
    pub fn new(routing_key: &str) -> Self {
        Self {
            exchange: String::new(),
            routing_key: routing_key.to_string(),
        }
    }

    pub fn on_exchange(exchange: &str, routing_key: &str) -> Self {
        Self {
            exchange: exchange.to_string(),
            routing_key: routing_key.to_string(),
        }
    }
}

#[async_trait]
pub trait ProductClient: Send + Sync {
    async fn send(&self, data: Vec<u8>) -> Result<(), MessagingError>;
}

/// [`ProductClient`] that forwards to a [`MessageBus`] under a fixed binding.
pub struct BoundProductClient {
    bus: Arc<dyn MessageBus>,
    binding: Binding,
}

impl BoundProductClient {
    pub fn new(bus: Arc<dyn MessageBus>) -> Self {
        Self::with_binding(bus, Binding::new(PRODUCT_BINDING))
    }

    pub fn with_binding(bus: Arc<dyn MessageBus>, binding: Binding) -> Self {
        Self { bus, binding }
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }
}

#[async_trait]
impl ProductClient for BoundProductClient {
    async fn send(&self, data: Vec<u8>) -> Result<(), MessagingError> {
        debug!(
            "sending {} bytes exchange={:?} routing_key={}",
            data.len(),
            self.binding.exchange,
            self.binding.routing_key
        );
        self.bus
            .publish(
                &self.binding.exchange,
                &self.binding.routing_key,
                MessageProperties::default(),
                data,
            )
            .await
    }
}
