//! Store Object - Mapping engine for RowHaus
//!
//! This crate turns model declarations into resolved column mappings and
//! primary keys, converts model instances to and from stored rows, and builds
//! the SQL statements that create, insert, update, delete and select them.

#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod adapter;
pub mod codec;
pub mod descriptor;
pub mod errors;
pub mod mapping;
pub mod prelude;
pub mod registry;
pub mod row;
pub mod statement;
pub mod traits;
pub mod transform;
pub mod validation;

#[cfg(test)]
mod test_models;

pub use adapter::Adapter;
pub use codec::SerializedModel;
pub use descriptor::ModelDescriptor;
pub use errors::AdapterError;
pub use mapping::{ColumnMapping, ColumnTarget, PrimaryKey, PrimaryKeyColumns};
pub use registry::{descriptor_for, registry_stats};
pub use row::{RowId, StoreRow, ROW_ID_COLUMN};
pub use statement::{Binding, BoundStatement, Operation, StatementBuilder};
pub use traits::*;
pub use transform::ValueTransformer;
pub use validation::{validate_identifier, ValidationError};
