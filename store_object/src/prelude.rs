//! Convenience re-exports for common store-object usage

// Model declaration
pub use crate::traits::{ColumnOverride, PropertyDef, PropertyError, TableModel};
pub use crate::transform::ValueTransformer;

// Rows and statements
pub use crate::row::{RowId, StoreRow};
pub use crate::statement::{BoundStatement, Operation};

// Facade and errors
pub use crate::adapter::Adapter;
pub use crate::errors::AdapterError;

// Values
pub use type_mapping::{FromStoreValue, StoreValue, ToStoreValue, ValueKind};
