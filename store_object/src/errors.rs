use thiserror::Error;
use type_mapping::ValueKind;

/// Errors raised by the mapping adapter.
///
/// `InvalidMapping` and `NoPrimaryKey` describe a broken model declaration and
/// are produced once, when the model's metadata is first resolved. The other
/// variants describe a single row, instance or operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdapterError {
    #[error("Invalid mapping for {model}: {reason}")]
    InvalidMapping { model: String, reason: String },

    #[error("No primary key for {model}: none declared and no 'id' property")]
    NoPrimaryKey { model: String },

    #[error("Missing column: {column}")]
    MissingColumn { column: String },

    #[error("Type mismatch in column {column}: expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("Invalid value in column {column}: {detail}")]
    InvalidValue {
        column: String,
        expected: ValueKind,
        detail: String,
    },

    #[error("Transform failed for property {key}: {message}")]
    TransformError { key: String, message: String },

    #[error("Missing primary key value for column {column}")]
    MissingPrimaryKeyValue { column: String },

    #[error("Nothing to update for {model}: every stored column is part of the primary key")]
    NothingToUpdate { model: String },
}

impl AdapterError {
    pub fn invalid_mapping(model: &str, reason: impl Into<String>) -> Self {
        Self::InvalidMapping {
            model: model.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing_column(column: &str) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
        }
    }

    pub fn transform(key: &str, message: impl Into<String>) -> Self {
        Self::TransformError {
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// Whether the error comes from the model declaration rather than from data
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::InvalidMapping { .. } | Self::NoPrimaryKey { .. })
    }
}
