// product-messaging-core/src/serdes.rs
use std::any::{type_name, Any, TypeId};
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::{InboundDelivery, MessagingError};

/// Order given to the built-in serdes for standard types.
pub const STD_SERDES_ORDER: i32 = 100;

/// Order given to the JSON fallback; anything else registered wins over it.
pub const JSON_SERDES_ORDER: i32 = i32::MAX;

/// Converts between a message body and a value of `T`.
pub trait MessageSerDes<T>: Send + Sync {
    /// `Ok(None)` means the body did not describe a `T`.
    fn deserialize(&self, delivery: &InboundDelivery) -> Result<Option<T>, MessagingError>;

    fn serialize(&self, data: &T) -> Result<Vec<u8>, MessagingError>;

    fn supports(&self, ty: TypeId) -> bool;

    /// Lower values are consulted first.
    fn order(&self) -> i32 {
        0
    }
}

struct Entry {
    order: i32,
    supports: Box<dyn Fn(TypeId) -> bool + Send + Sync>,
    // Arc<dyn MessageSerDes<T>> for the T the entry was registered with
    serdes: Box<dyn Any + Send + Sync>,
}

/// Ordered set of serdes, looked up by the type being bound.
#[derive(Default)]
pub struct SerDesRegistry {
    entries: Vec<Entry>,
}

impl SerDesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the standard serdes for strings, integers, floats,
    /// raw bytes and UUIDs.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<String, _>(StringSerDes);
        registry.register::<i16, _>(BigEndianSerDes::<i16>::new());
        registry.register::<i32, _>(BigEndianSerDes::<i32>::new());
        registry.register::<i64, _>(BigEndianSerDes::<i64>::new());
        registry.register::<f32, _>(BigEndianSerDes::<f32>::new());
        registry.register::<f64, _>(BigEndianSerDes::<f64>::new());
        registry.register::<Vec<u8>, _>(ByteArraySerDes);
        registry.register::<Uuid, _>(UuidSerDes);
        registry
    }

    pub fn register<T, S>(&mut self, serdes: S) -> &mut Self
    where
        T: 'static,
        S: MessageSerDes<T> + 'static,
    {
        let serdes: Arc<dyn MessageSerDes<T>> = Arc::new(serdes);
        let order = serdes.order();
        let checker = Arc::clone(&serdes);
        let entry = Entry {
            order,
            supports: Box::new(move |ty| checker.supports(ty)),
            serdes: Box::new(serdes),
        };
        // stable: equal orders keep registration order
        let at = self.entries.partition_point(|e| e.order <= order);
        self.entries.insert(at, entry);
        self
    }

    /// Registers a JSON serdes for `T` as the lowest-priority option.
    pub fn register_json<T>(&mut self) -> &mut Self
    where
        T: Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        self.register::<T, _>(JsonSerDes::<T>::new())
    }

    pub fn find_serdes<T: 'static>(&self) -> Option<Arc<dyn MessageSerDes<T>>> {
        let ty = TypeId::of::<T>();
        self.entries
            .iter()
            .filter(|e| (e.supports)(ty))
            .find_map(|e| e.serdes.downcast_ref::<Arc<dyn MessageSerDes<T>>>())
            .cloned()
    }

    pub fn serialize_value<T: 'static>(&self, data: &T) -> Result<Vec<u8>, MessagingError> {
        self.require::<T>()?.serialize(data)
    }

    pub fn deserialize_value<T: 'static>(
        &self,
        delivery: &InboundDelivery,
    ) -> Result<Option<T>, MessagingError> {
        self.require::<T>()?.deserialize(delivery)
    }

    fn require<T: 'static>(&self) -> Result<Arc<dyn MessageSerDes<T>>, MessagingError> {
        self.find_serdes::<T>().ok_or_else(|| {
            MessagingError::Serialization(format!(
                "no serdes registered for {}",
                type_name::<T>()
            ))
        })
    }
}

/// UTF-8 text.
pub struct StringSerDes;

impl MessageSerDes<String> for StringSerDes {
    fn deserialize(&self, delivery: &InboundDelivery) -> Result<Option<String>, MessagingError> {
        String::from_utf8(delivery.body.clone())
            .map(Some)
            .map_err(|e| MessagingError::Serialization(e.to_string()))
    }

    fn serialize(&self, data: &String) -> Result<Vec<u8>, MessagingError> {
        Ok(data.as_bytes().to_vec())
    }

    fn supports(&self, ty: TypeId) -> bool {
        ty == TypeId::of::<String>()
    }

    fn order(&self) -> i32 {
        STD_SERDES_ORDER
    }
}

/// Body passed through untouched.
pub struct ByteArraySerDes;

impl MessageSerDes<Vec<u8>> for ByteArraySerDes {
    fn deserialize(&self, delivery: &InboundDelivery) -> Result<Option<Vec<u8>>, MessagingError> {
        Ok(Some(delivery.body.clone()))
    }

    fn serialize(&self, data: &Vec<u8>) -> Result<Vec<u8>, MessagingError> {
        Ok(data.clone())
    }

    fn supports(&self, ty: TypeId) -> bool {
        ty == TypeId::of::<Vec<u8>>()
    }

    fn order(&self) -> i32 {
        STD_SERDES_ORDER
    }
}

/// Hyphenated UUID text.
pub struct UuidSerDes;

impl MessageSerDes<Uuid> for UuidSerDes {
    fn deserialize(&self, delivery: &InboundDelivery) -> Result<Option<Uuid>, MessagingError> {
        match StringSerDes.deserialize(delivery)? {
            Some(text) => Uuid::parse_str(&text)
                .map(Some)
                .map_err(|e| MessagingError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    fn serialize(&self, data: &Uuid) -> Result<Vec<u8>, MessagingError> {
        StringSerDes.serialize(&data.hyphenated().to_string())
    }

    fn supports(&self, ty: TypeId) -> bool {
        ty == TypeId::of::<Uuid>()
    }

    fn order(&self) -> i32 {
        STD_SERDES_ORDER
    }
}

/// Fixed-width numbers that travel as big-endian bytes.
pub trait BigEndian: Sized + Send + Sync + 'static {
    const WIDTH: usize;
    const NAME: &'static str;

    fn to_be_vec(&self) -> Vec<u8>;
    fn from_be_slice(bytes: &[u8]) -> Self;
}

macro_rules! big_endian {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BigEndian for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                const NAME: &'static str = stringify!($ty);

                fn to_be_vec(&self) -> Vec<u8> {
                    self.to_be_bytes().to_vec()
                }

                fn from_be_slice(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_from_slice(bytes);
                    <$ty>::from_be_bytes(buf)
                }
            }
        )*
    };
}

big_endian!(i16, i32, i64, f32, f64);

pub struct BigEndianSerDes<T> {
    _ty: PhantomData<fn() -> T>,
}

impl<T> BigEndianSerDes<T> {
    pub fn new() -> Self {
        Self { _ty: PhantomData }
    }
}

impl<T> Default for BigEndianSerDes<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BigEndian> MessageSerDes<T> for BigEndianSerDes<T> {
    fn deserialize(&self, delivery: &InboundDelivery) -> Result<Option<T>, MessagingError> {
        let data = &delivery.body;
        if data.is_empty() {
            return Ok(None);
        }
        if data.len() != T::WIDTH {
            return Err(MessagingError::Serialization(format!(
                "body of {} bytes cannot hold {} ({} bytes)",
                data.len(),
                T::NAME,
                T::WIDTH
            )));
        }
        Ok(Some(T::from_be_slice(data)))
    }

    fn serialize(&self, data: &T) -> Result<Vec<u8>, MessagingError> {
        Ok(data.to_be_vec())
    }

    fn supports(&self, ty: TypeId) -> bool {
        ty == TypeId::of::<T>()
    }

    fn order(&self) -> i32 {
        STD_SERDES_ORDER
    }
}

/// `serde_json` for any serde type.
pub struct JsonSerDes<T> {
    _ty: PhantomData<fn() -> T>,
}

impl<T> JsonSerDes<T> {
    pub fn new() -> Self {
        Self { _ty: PhantomData }
    }
}

impl<T> Default for JsonSerDes<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MessageSerDes<T> for JsonSerDes<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    fn deserialize(&self, delivery: &InboundDelivery) -> Result<Option<T>, MessagingError> {
        serde_json::from_slice(&delivery.body)
            .map(Some)
            .map_err(|e| MessagingError::Serialization(e.to_string()))
    }

    fn serialize(&self, data: &T) -> Result<Vec<u8>, MessagingError> {
        serde_json::to_vec(data).map_err(|e| MessagingError::Serialization(e.to_string()))
    }

    fn supports(&self, ty: TypeId) -> bool {
        ty == TypeId::of::<T>()
    }

    fn order(&self) -> i32 {
        JSON_SERDES_ORDER
    }
}

/// Resolves a handler argument of type `T` from the delivery body.
///
/// A type nothing is registered for is left unbound (`Ok(None)`).
pub fn bind_body<T: 'static>(
    registry: &SerDesRegistry,
    delivery: &InboundDelivery,
) -> Result<Option<T>, MessagingError> {
    match registry.find_serdes::<T>() {
        Some(serdes) => serdes.deserialize(delivery),
        None => Ok(None),
    }
}
