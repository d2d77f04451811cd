use std::sync::Arc;
use std::time::Duration;

use product_messaging_core::{
    BoundProductClient, ListenerRegistry, MessageBus, MessageSerDes, ProductClient, ProductInfo,
    ProductInfoSerDes, ProductListener, PRODUCT_QUEUE,
};
use product_messaging_rabbitmq::{RabbitMessageBus, RabbitMqOptions};
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let opts = RabbitMqOptions::from_env()?;
    let bus: Arc<dyn MessageBus> = Arc::new(RabbitMessageBus::connect(opts).await?);

    let listener = ProductListener::new();
    let messages = listener.messages();

    let mut listeners = ListenerRegistry::new();
    listeners.register(PRODUCT_QUEUE, Arc::new(listener))?;
    listeners.start(bus.as_ref()).await?;

    // give the consumer task time to declare queues and bindings
    tokio::time::sleep(Duration::from_millis(500)).await;

    let client = BoundProductClient::new(Arc::clone(&bus));
    let product = ProductInfo::new(Some("small"), 5, true);
    client.send(ProductInfoSerDes.serialize(&product)?).await?;

    tokio::time::sleep(Duration::from_secs(1)).await;
    for entry in messages.snapshot() {
        info!("{}", entry);
    }
    Ok(())
}
