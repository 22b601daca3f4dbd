//! Property key to column resolution

use crate::errors::AdapterError;
use crate::traits::{ColumnOverride, PropertyDef};
use crate::validation::validate_identifier;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Where a property is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnTarget {
    Column(String),
    Omitted,
}

impl ColumnTarget {
    pub fn column(&self) -> Option<&str> {
        match self {
            ColumnTarget::Column(name) => Some(name),
            ColumnTarget::Omitted => None,
        }
    }
}

/// Ordered mapping from property key to column.
///
/// Overridden keys come first, in the order the model declares them, followed
/// by every other property in declaration order mapped to a column of the
/// same name. Column names are unique across the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: IndexMap<String, ColumnTarget>,
}

impl ColumnMapping {
    /// Resolve the mapping from the declared properties and overrides
    pub fn resolve(
        model: &str,
        properties: &[PropertyDef],
        overrides: &[(&str, ColumnOverride)],
    ) -> Result<Self, AdapterError> {
        let mut known = HashSet::with_capacity(properties.len());
        for property in properties {
            if !known.insert(property.key) {
                return Err(AdapterError::invalid_mapping(
                    model,
                    format!("property '{}' is declared twice", property.key),
                ));
            }
        }

        let mut entries = IndexMap::with_capacity(properties.len());

        for (key, target) in overrides {
            if !known.contains(*key) {
                return Err(AdapterError::invalid_mapping(
                    model,
                    format!("column override names unknown property '{}'", key),
                ));
            }
            let target = match target {
                ColumnOverride::Column(column) => ColumnTarget::Column(column.to_string()),
                ColumnOverride::Omit => ColumnTarget::Omitted,
            };
            if entries.insert(key.to_string(), target).is_some() {
                return Err(AdapterError::invalid_mapping(
                    model,
                    format!("property '{}' is overridden twice", key),
                ));
            }
        }

        for property in properties {
            entries
                .entry(property.key.to_string())
                .or_insert_with(|| ColumnTarget::Column(property.key.to_string()));
        }

        let mapping = Self { entries };
        mapping.check_columns(model)?;
        Ok(mapping)
    }

    fn check_columns(&self, model: &str) -> Result<(), AdapterError> {
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for (key, column) in self.columns() {
            validate_identifier(column).map_err(|e| {
                AdapterError::invalid_mapping(model, format!("column for '{}': {}", key, e))
            })?;
            if let Some(previous) = owners.insert(column, key) {
                return Err(AdapterError::invalid_mapping(
                    model,
                    format!(
                        "properties '{}' and '{}' both map to column '{}'",
                        previous, key, column
                    ),
                ));
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&ColumnTarget> {
        self.entries.get(key)
    }

    /// Column for a property key; `None` when unknown or omitted
    pub fn column_for(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ColumnTarget::column)
    }

    pub fn is_omitted(&self, key: &str) -> bool {
        matches!(self.get(key), Some(ColumnTarget::Omitted))
    }

    /// Every entry, including omitted ones
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnTarget)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Stored (key, column) pairs in mapping order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(key, target)| target.column().map(|column| (key.as_str(), column)))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns().map(|(_, column)| column).collect()
    }

    pub fn key_for_column(&self, column: &str) -> Option<&str> {
        self.columns()
            .find(|(_, c)| *c == column)
            .map(|(key, _)| key)
    }

    /// Number of stored (non-omitted) columns
    pub fn column_count(&self) -> usize {
        self.columns().count()
    }

    /// Number of property keys, omitted ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
