pub mod bus;
pub mod client;
pub mod error;
pub mod handler;
pub mod listener;
pub mod memory;
pub mod product;
pub mod registry;
pub mod retry;
pub mod serdes;
pub mod types;

pub use bus::MessageBus;
pub use client::{Binding, BoundProductClient, ProductClient};
pub use error::MessagingError;
pub use handler::DeliveryHandler;
pub use listener::{CapturedLog, ProductBodyListener, ProductListener};
pub use memory::InMemoryBus;
pub use product::{ProductInfo, ProductInfoSerDes, PRODUCT_BINDING, PRODUCT_QUEUE};
pub use registry::ListenerRegistry;
pub use retry::{FailureAction, RetryPolicy};
pub use serdes::{bind_body, JsonSerDes, MessageSerDes, SerDesRegistry};
pub use types::{dlq_queue, retry_queue, InboundDelivery, MessageProperties, APPLICATION_JSON};
