mod options;
mod rabbit_message_bus;

pub use options::RabbitMqOptions;
pub use rabbit_message_bus::RabbitMessageBus;
