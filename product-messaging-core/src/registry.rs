// product-messaging-core/src/registry.rs
use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::{DeliveryHandler, MessageBus, MessagingError};

/// Queue name to handler table, subscribed as a whole with [`ListenerRegistry::start`].
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: BTreeMap<String, Arc<dyn DeliveryHandler>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One handler per queue.
    pub fn register(
        &mut self,
        queue: &str,
        handler: Arc<dyn DeliveryHandler>,
    ) -> Result<&mut Self, MessagingError> {
        if self.listeners.contains_key(queue) {
            return Err(MessagingError::Registration(format!(
                "queue {queue} already has a listener"
            )));
        }
        self.listeners.insert(queue.to_string(), handler);
        Ok(self)
    }

    pub fn queues(&self) -> impl Iterator<Item = &str> {
        self.listeners.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub async fn start(&self, bus: &dyn MessageBus) -> Result<(), MessagingError> {
        for (queue, handler) in &self.listeners {
            bus.subscribe(queue, Arc::clone(handler)).await?;
            info!("listener registered queue={}", queue);
        }
        Ok(())
    }
}
