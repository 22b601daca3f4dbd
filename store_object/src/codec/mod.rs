//! Conversion between model instances and stored rows
//!
//! Both directions walk the resolved column mapping; omitted properties are
//! neither read from nor written to the store.

pub mod deserialize;
pub mod serialize;

pub use deserialize::deserialize;
pub use serialize::{serialize, SerializedModel};
