// product-messaging-core/src/memory.rs
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{error, warn};

use crate::{
    dlq_queue, DeliveryHandler, FailureAction, InboundDelivery, MessageBus, MessageProperties,
    MessagingError, RetryPolicy,
};

/// Broker-less [`MessageBus`] that runs handlers on the publishing task.
///
/// The default exchange (`""`) routes to the queue named by the routing key;
/// named exchanges only route through [`InMemoryBus::bind`]. Rejected
/// deliveries are retried right away under the bus's [`RetryPolicy`] and
/// parked in `<queue>.dlq` once it gives up.
#[derive(Default)]
pub struct InMemoryBus {
    retry: RetryPolicy,
    handlers: RwLock<HashMap<String, Arc<dyn DeliveryHandler>>>,
    bindings: RwLock<HashMap<(String, String), Vec<String>>>,
    dead_letters: RwLock<HashMap<String, Vec<InboundDelivery>>>,
    next_tag: AtomicU64,
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retry_policy(retry: RetryPolicy) -> Self {
        Self {
            retry,
            ..Self::default()
        }
    }

    pub async fn bind(&self, exchange: &str, routing_key: &str, queue: &str) {
        let mut bindings = self.bindings.write().await;
        let queues = bindings
            .entry((exchange.to_string(), routing_key.to_string()))
            .or_default();
        if !queues.iter().any(|q| q == queue) {
            queues.push(queue.to_string());
        }
    }

    /// Deliveries parked after exhausting their retries on `queue`, oldest first.
    pub async fn dead_letters(&self, queue: &str) -> Vec<InboundDelivery> {
        self.dead_letters
            .read()
            .await
            .get(&dlq_queue(queue))
            .cloned()
            .unwrap_or_default()
    }

    async fn route(&self, exchange: &str, routing_key: &str) -> Vec<String> {
        if exchange.is_empty() {
            return vec![routing_key.to_string()];
        }
        self.bindings
            .read()
            .await
            .get(&(exchange.to_string(), routing_key.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl MessageBus for InMemoryBus {
    async fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        properties: MessageProperties,
        body: Vec<u8>,
    ) -> Result<(), MessagingError> {
        let queues = self.route(exchange, routing_key).await;

        let mut delivered = false;
        for queue in queues {
            // clone out so the handler runs without the table locked
            let handler = self.handlers.read().await.get(&queue).cloned();
            let Some(handler) = handler else {
                continue;
            };
            delivered = true;

            let mut delivery = InboundDelivery {
                body: body.clone(),
                exchange: exchange.to_string(),
                routing_key: routing_key.to_string(),
                delivery_tag: 0,
                redelivered: false,
                death_count: 0,
                properties: properties.clone(),
            };

            loop {
                delivery.delivery_tag = self.next_tag.fetch_add(1, Ordering::Relaxed) + 1;
                let Err(err) = handler.handle(&delivery).await else {
                    break;
                };
                error!(
                    "handler error: {}, routing_key={}, death_count={}",
                    err, routing_key, delivery.death_count
                );
                match self.retry.on_failure(delivery.death_count) {
                    FailureAction::Retry => {
                        delivery.death_count += 1;
                        delivery.redelivered = true;
                    }
                    FailureAction::Park => {
                        self.dead_letters
                            .write()
                            .await
                            .entry(dlq_queue(&queue))
                            .or_default()
                            .push(delivery);
                        break;
                    }
                }
            }
        }

        if !delivered {
            warn!(
                "unroutable message dropped exchange={:?} routing_key={}",
                exchange, routing_key
            );
        }
        Ok(())
    }

    async fn subscribe(
        &self,
        queue: &str,
        handler: Arc<dyn DeliveryHandler>,
    ) -> Result<(), MessagingError> {
        let mut handlers = self.handlers.write().await;
        if handlers.contains_key(queue) {
            return Err(MessagingError::Subscribe(format!(
                "queue {queue} already has a consumer"
            )));
        }
        handlers.insert(queue.to_string(), handler);
        Ok(())
    }
}
