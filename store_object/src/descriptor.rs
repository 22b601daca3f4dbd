//! Resolved per-model metadata

use crate::errors::AdapterError;
use crate::mapping::{ColumnMapping, PrimaryKeyColumns};
use crate::traits::TableModel;
use crate::transform::ValueTransformer;
use crate::validation::validate_identifier;
use std::collections::HashMap;

/// Everything the adapter needs to know about a model type.
///
/// Built once per type from the `TableModel` declaration and immutable
/// afterwards; see [`crate::registry::descriptor_for`].
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    model_name: &'static str,
    table_name: &'static str,
    mapping: ColumnMapping,
    primary_keys: PrimaryKeyColumns,
    transformers: HashMap<String, ValueTransformer>,
    sql_types: HashMap<String, String>,
}

impl ModelDescriptor {
    /// Resolve the descriptor from the model's declaration.
    ///
    /// Column mapping first, then the primary key, then column types and
    /// transformers. The first inconsistency found is returned.
    pub fn resolve<T: TableModel>() -> Result<Self, AdapterError> {
        let model_name = short_type_name::<T>();
        let table_name = T::table_name();

        validate_identifier(table_name).map_err(|e| {
            AdapterError::invalid_mapping(model_name, format!("table name: {}", e))
        })?;

        let properties = T::properties();
        let mapping =
            ColumnMapping::resolve(model_name, properties, &T::columns_by_property_key())?;
        let primary_keys =
            PrimaryKeyColumns::resolve(model_name, &T::primary_keys(), &mapping)?;

        let mut sql_types: HashMap<String, String> = properties
            .iter()
            .map(|p| (p.key.to_string(), p.sql_type.to_string()))
            .collect();
        for (key, sql_type) in T::column_types_by_property_key() {
            match sql_types.get_mut(key) {
                Some(slot) => *slot = sql_type.to_string(),
                None => {
                    return Err(AdapterError::invalid_mapping(
                        model_name,
                        format!("column type override names unknown property '{}'", key),
                    ))
                }
            }
        }

        let transformers = T::value_transformers()
            .into_iter()
            .filter(|(key, _)| {
                let known = mapping.get(key).is_some();
                if !known {
                    debug_log!(
                        "{}: ignoring transformer for unknown property '{}'",
                        model_name,
                        key
                    );
                }
                known
            })
            .map(|(key, transformer)| (key.to_string(), transformer))
            .collect();

        debug_log!(
            "Resolved {} -> table {} with {} columns",
            model_name,
            table_name,
            mapping.column_count()
        );

        Ok(Self {
            model_name,
            table_name,
            mapping,
            primary_keys,
            transformers,
            sql_types,
        })
    }

    pub fn model_name(&self) -> &'static str {
        self.model_name
    }

    pub fn table_name(&self) -> &'static str {
        self.table_name
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn primary_keys(&self) -> &PrimaryKeyColumns {
        &self.primary_keys
    }

    /// Transformer registered for a property, if any
    pub fn transformer_for(&self, key: &str) -> Option<&ValueTransformer> {
        self.transformers.get(key)
    }

    /// SQL type used for the property's column in `CREATE TABLE`
    pub fn column_type(&self, key: &str) -> Option<&str> {
        self.sql_types.get(key).map(String::as_str)
    }

    pub fn column_for_property_key(&self, key: &str) -> Option<&str> {
        self.mapping.column_for(key)
    }

    /// Stored (key, column) pairs in mapping order
    pub fn columns_by_property_key(&self) -> Vec<(&str, &str)> {
        self.mapping.columns().collect()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.mapping.column_names()
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    // Generic arguments are not expected on models; keep the path tail only
    full.rsplit("::").next().unwrap_or(full)
}
