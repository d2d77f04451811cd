// product-messaging-core/src/types.rs
use chrono::{DateTime, Utc};

/// Content type stamped on JSON payloads.
pub const APPLICATION_JSON: &str = "application/json";

/// AMQP basic properties the listeners and publishers care about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageProperties {
    pub content_type: Option<String>,
    pub message_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl MessageProperties {
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A message as handed to a [`crate::DeliveryHandler`].
///
/// Built by the transport for every delivery and dropped once the handler
/// returns. Handlers only read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundDelivery {
    pub body: Vec<u8>,
    pub exchange: String,
    pub routing_key: String,
    pub delivery_tag: u64,
    pub redelivered: bool,
    /// Times this message was already rejected from its queue and retried.
    pub death_count: u32,
    pub properties: MessageProperties,
}

impl InboundDelivery {
    pub fn new(exchange: &str, routing_key: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            exchange: exchange.to_string(),
            routing_key: routing_key.to_string(),
            delivery_tag: 0,
            redelivered: false,
            death_count: 0,
            properties: MessageProperties::default(),
        }
    }

    pub fn with_properties(mut self, properties: MessageProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn content_type(&self) -> Option<&str> {
        self.properties.content_type.as_deref()
    }
}

/// Conventional names for the retry and dead-letter queues of a main queue.
pub fn retry_queue(queue: &str) -> String {
    format!("{}.retry", queue)
}
pub fn dlq_queue(queue: &str) -> String {
    format!("{}.dlq", queue)
}
