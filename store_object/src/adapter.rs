//! Adapter facade
//!
//! The entry point the store access layer calls. Every method first fetches
//! the model's cached descriptor, so a broken model declaration is reported
//! before anything about the row or instance is looked at.

use crate::codec::{self, SerializedModel};
use crate::descriptor::ModelDescriptor;
use crate::errors::AdapterError;
use crate::registry::descriptor_for;
use crate::row::StoreRow;
use crate::statement::{BoundStatement, Operation, StatementBuilder};
use crate::traits::TableModel;
use config::AdapterConfig;
use indexmap::IndexMap;
use std::sync::Arc;
use type_mapping::StoreValue;

/// Converts models to and from rows and builds their statements
#[derive(Debug, Clone, Default)]
pub struct Adapter {
    config: AdapterConfig,
}

impl Adapter {
    pub fn new(config: AdapterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Resolved metadata for `T`
    pub fn descriptor<T: TableModel>(&self) -> Result<Arc<ModelDescriptor>, AdapterError> {
        descriptor_for::<T>()
    }

    /// Build a model from a stored row
    pub fn parse_row<T: TableModel>(&self, row: StoreRow) -> Result<T, AdapterError> {
        let descriptor = descriptor_for::<T>()?;
        codec::deserialize(row, &descriptor)
    }

    /// Column values of a model, ready for binding
    pub fn serialize<T: TableModel>(&self, model: &T) -> Result<SerializedModel, AdapterError> {
        let descriptor = descriptor_for::<T>()?;
        codec::serialize(model, &descriptor)
    }

    /// Primary key column values of a model, in primary key order
    pub fn primary_key_values<T: TableModel>(
        &self,
        model: &T,
    ) -> Result<IndexMap<String, StoreValue>, AdapterError> {
        Ok(self.serialize(model)?.primary_key_values)
    }

    /// Statement performing `operation` for one model instance
    pub fn statements_for<T: TableModel>(
        &self,
        model: &T,
        operation: Operation,
    ) -> Result<BoundStatement, AdapterError> {
        let descriptor = descriptor_for::<T>()?;
        let builder = StatementBuilder::new(&descriptor, &self.config);

        match operation {
            Operation::Create => Ok(builder.create_table()),
            Operation::Insert => Ok(builder.insert(&codec::serialize(model, &descriptor)?)),
            Operation::Update => builder.update(&codec::serialize(model, &descriptor)?),
            Operation::Delete => builder.delete(&codec::serialize(model, &descriptor)?),
        }
    }

    /// Primary key condition identifying one model instance
    pub fn where_statement<T: TableModel>(&self, model: &T) -> Result<BoundStatement, AdapterError> {
        let descriptor = descriptor_for::<T>()?;
        let serialized = codec::serialize(model, &descriptor)?;
        StatementBuilder::new(&descriptor, &self.config).where_clause(&serialized)
    }

    pub fn create_statement<T: TableModel>(&self) -> Result<BoundStatement, AdapterError> {
        self.class_statement::<T>(|builder| builder.create_table())
    }

    pub fn select_all_statement<T: TableModel>(&self) -> Result<BoundStatement, AdapterError> {
        self.class_statement::<T>(|builder| builder.select_all())
    }

    pub fn delete_all_statement<T: TableModel>(&self) -> Result<BoundStatement, AdapterError> {
        self.class_statement::<T>(|builder| builder.delete_all())
    }

    fn class_statement<T: TableModel>(
        &self,
        build: impl FnOnce(&StatementBuilder<'_>) -> BoundStatement,
    ) -> Result<BoundStatement, AdapterError> {
        let descriptor = descriptor_for::<T>()?;
        Ok(build(&StatementBuilder::new(&descriptor, &self.config)))
    }

    /// Stored column names of `T`, in mapping order
    pub fn column_names<T: TableModel>(&self) -> Result<Vec<String>, AdapterError> {
        let descriptor = descriptor_for::<T>()?;
        Ok(descriptor
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// (property key, column) pairs of `T`, omitted properties excluded
    pub fn columns_by_property_key<T: TableModel>(
        &self,
    ) -> Result<Vec<(String, String)>, AdapterError> {
        let descriptor = descriptor_for::<T>()?;
        Ok(descriptor
            .columns_by_property_key()
            .into_iter()
            .map(|(key, column)| (key.to_string(), column.to_string()))
            .collect())
    }

    pub fn column_for_property_key<T: TableModel>(
        &self,
        key: &str,
    ) -> Result<Option<String>, AdapterError> {
        let descriptor = descriptor_for::<T>()?;
        Ok(descriptor.column_for_property_key(key).map(str::to_string))
    }
}
