//! Model to column values conversion

use crate::descriptor::ModelDescriptor;
use crate::errors::AdapterError;
use crate::traits::{PropertyError, TableModel};
use indexmap::IndexMap;
use type_mapping::StoreValue;

/// Column values read from one model instance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SerializedModel {
    /// Every stored column, in mapping order
    pub values: IndexMap<String, StoreValue>,
    /// Primary key columns, in primary key order
    pub primary_key_values: IndexMap<String, StoreValue>,
}

impl SerializedModel {
    pub fn get(&self, column: &str) -> Option<&StoreValue> {
        self.values.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Read the stored properties of a model, applying property→store transforms
pub fn serialize<T: TableModel>(
    model: &T,
    descriptor: &ModelDescriptor,
) -> Result<SerializedModel, AdapterError> {
    let mut values = IndexMap::with_capacity(descriptor.mapping().column_count());

    for (key, column) in descriptor.mapping().columns() {
        let value = model.property(key).map_err(|e| match e {
            PropertyError::Unknown(key) => AdapterError::invalid_mapping(
                descriptor.model_name(),
                format!("property '{}' cannot be read", key),
            ),
            PropertyError::Conversion(e) => AdapterError::transform(key, e.to_string()),
        })?;

        let value = match descriptor.transformer_for(key) {
            Some(transformer) => transformer
                .to_store(value)
                .map_err(|message| AdapterError::transform(key, message))?,
            None => value,
        };

        values.insert(column.to_string(), value);
    }

    let primary_key_values = descriptor
        .primary_keys()
        .columns()
        .map(|column| {
            let value = values.get(column).cloned().unwrap_or(StoreValue::Null);
            (column.to_string(), value)
        })
        .collect();

    Ok(SerializedModel {
        values,
        primary_key_values,
    })
}
