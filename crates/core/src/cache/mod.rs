mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{CacheNamespace, GET_OPERATION};
pub use serialization::{
    deserialize_bin, serialize_bin, SerializationError, CACHE_ENCODING_VERSION,
};
pub use traits::Cache;
