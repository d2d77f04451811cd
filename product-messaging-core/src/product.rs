// product-messaging-core/src/product.rs
use std::any::TypeId;

use crate::{InboundDelivery, MessageSerDes, MessagingError};

/// Queue the product listeners consume from.
pub const PRODUCT_QUEUE: &str = "product";

/// Destination the product client publishes to.
pub const PRODUCT_BINDING: &str = "product";

const DELIMITER: char = '|';

// An absent size travels as this literal, so a real size of "null" reads
// back as absent.
const NULL_SIZE: &str = "null";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    pub size: Option<String>,
    pub count: i64,
    pub sealed: bool,
}

impl ProductInfo {
    pub fn new(size: Option<&str>, count: i64, sealed: bool) -> Self {
        Self {
            size: size.map(str::to_string),
            count,
            sealed,
        }
    }
}

/// `size|count|sealed` text codec for [`ProductInfo`].
///
/// There is no escaping: a size containing `|` does not survive the trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductInfoSerDes;

impl ProductInfoSerDes {
    pub fn decode(body: &[u8]) -> Option<ProductInfo> {
        let body = std::str::from_utf8(body).ok()?;
        let parts: Vec<&str> = body.split(DELIMITER).collect();
        let [size, count, sealed] = parts.as_slice() else {
            return None;
        };

        let size = (*size != NULL_SIZE).then(|| size.to_string());
        let count = count.parse::<i64>().ok()?;
        let sealed = sealed.parse::<bool>().ok()?;

        Some(ProductInfo { size, count, sealed })
    }

    pub fn encode(data: &ProductInfo) -> Vec<u8> {
        let size = data.size.as_deref().unwrap_or(NULL_SIZE);
        format!("{size}{DELIMITER}{}{DELIMITER}{}", data.count, data.sealed).into_bytes()
    }
}

impl MessageSerDes<ProductInfo> for ProductInfoSerDes {
    fn deserialize(
        &self,
        delivery: &InboundDelivery,
    ) -> Result<Option<ProductInfo>, MessagingError> {
        Ok(Self::decode(&delivery.body))
    }

    fn serialize(&self, data: &ProductInfo) -> Result<Vec<u8>, MessagingError> {
        Ok(Self::encode(data))
    }

    fn supports(&self, ty: TypeId) -> bool {
        ty == TypeId::of::<ProductInfo>()
    }
}
