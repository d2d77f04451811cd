// product-messaging-core/src/listener.rs
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::info;

use crate::{DeliveryHandler, InboundDelivery, MessagingError};

/// Append-only list of strings written by listeners and read back by tests.
#[derive(Debug, Default)]
pub struct CapturedLog {
    entries: Mutex<Vec<String>>,
}

impl CapturedLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: String) {
        self.lock().push(entry);
    }

    /// Copy of the entries in insertion order.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        // a panicking writer cannot leave a half-pushed Vec behind
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Records the routing metadata of every product delivery.
#[derive(Debug, Clone, Default)]
pub struct ProductListener {
    messages: Arc<CapturedLog>,
}

impl ProductListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Arc<CapturedLog> {
        Arc::clone(&self.messages)
    }
}

#[async_trait]
impl DeliveryHandler for ProductListener {
    async fn handle(&self, delivery: &InboundDelivery) -> Result<(), MessagingError> {
        self.messages.push(format!(
            "exchange: [{}], routingKey: [{}], contentType: [{}]",
            delivery.exchange,
            delivery.routing_key,
            delivery.content_type().unwrap_or("null")
        ));
        Ok(())
    }
}

/// Records each product body as text.
#[derive(Debug, Clone, Default)]
pub struct ProductBodyListener {
    messages: Arc<CapturedLog>,
}

impl ProductBodyListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Arc<CapturedLog> {
        Arc::clone(&self.messages)
    }
}

#[async_trait]
impl DeliveryHandler for ProductBodyListener {
    async fn handle(&self, delivery: &InboundDelivery) -> Result<(), MessagingError> {
        self.messages
            .push(String::from_utf8_lossy(&delivery.body).into_owned());
        info!(
            "received {} bytes from queue routing_key={}",
            delivery.body.len(),
            delivery.routing_key
        );
        Ok(())
    }
}
