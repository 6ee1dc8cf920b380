mod error;
mod serialization;
mod traits;
mod types;

pub use error::{Result, StoreError};
pub use serialization::{decode_entity, decode_value, encode_entity, encode_value};
pub use traits::KeyValueStore;
pub use types::StoreState;
