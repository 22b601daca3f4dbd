//! Statement builder
//!
//! Table and column names come from a resolved descriptor, where they have
//! already been validated as identifiers. Values are never written into the
//! SQL text; each one gets a placeholder and a binding.

use super::placeholder::Placeholders;
use super::{Binding, BoundStatement};
use crate::codec::SerializedModel;
use crate::descriptor::ModelDescriptor;
use crate::errors::AdapterError;
use crate::row::ROW_ID_COLUMN;
use config::AdapterConfig;

/// Builds SQL for one model type
#[derive(Debug, Clone, Copy)]
pub struct StatementBuilder<'a> {
    descriptor: &'a ModelDescriptor,
    config: &'a AdapterConfig,
}

impl<'a> StatementBuilder<'a> {
    pub fn new(descriptor: &'a ModelDescriptor, config: &'a AdapterConfig) -> Self {
        Self { descriptor, config }
    }

    fn placeholders(&self) -> Placeholders {
        Placeholders::new(self.config.placeholder_style)
    }

    /// `CREATE TABLE <table> (<col> <type>, ...)`
    pub fn create_table(&self) -> BoundStatement {
        let primary_keys = self.descriptor.primary_keys();
        let single_key = primary_keys
            .single()
            .filter(|_| self.config.primary_key_constraint)
            .map(|pk| pk.column.as_str());

        let mut definitions: Vec<String> = self
            .descriptor
            .mapping()
            .columns()
            .map(|(key, column)| {
                let sql_type = self.descriptor.column_type(key).unwrap_or("TEXT");
                if single_key == Some(column) {
                    format!("{} {} PRIMARY KEY", column, sql_type)
                } else {
                    format!("{} {}", column, sql_type)
                }
            })
            .collect();

        if self.config.primary_key_constraint && primary_keys.len() > 1 {
            definitions.push(format!(
                "PRIMARY KEY ({})",
                primary_keys.columns().collect::<Vec<_>>().join(", ")
            ));
        }

        let if_not_exists = if self.config.create_if_not_exists {
            "IF NOT EXISTS "
        } else {
            ""
        };

        let sql = format!(
            "CREATE TABLE {}{} ({})",
            if_not_exists,
            self.descriptor.table_name(),
            definitions.join(", ")
        );
        debug_log!("Generated create statement: {}", sql);
        BoundStatement::new(sql)
    }

    /// `INSERT INTO <table> (<cols>) VALUES (<placeholders>)` over every stored column
    pub fn insert(&self, serialized: &SerializedModel) -> BoundStatement {
        let mut placeholders = self.placeholders();
        let mut columns = Vec::with_capacity(serialized.len());
        let mut bindings = Vec::with_capacity(serialized.len());

        for (column, value) in &serialized.values {
            columns.push(column.as_str());
            bindings.push(Binding {
                placeholder: placeholders.next(column),
                value: value.clone(),
            });
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.descriptor.table_name(),
            columns.join(", "),
            bindings
                .iter()
                .map(|b| b.placeholder.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        debug_log!("Generated insert statement: {}", sql);
        BoundStatement { sql, bindings }
    }

    /// `UPDATE <table> SET <col>=<ph>, ... WHERE <pk-clause>`
    ///
    /// Every stored column outside the primary key is set. A model stored
    /// entirely in its primary key can be inserted and deleted but has
    /// nothing to update.
    pub fn update(&self, serialized: &SerializedModel) -> Result<BoundStatement, AdapterError> {
        let primary_keys = self.descriptor.primary_keys();
        let mut placeholders = self.placeholders();
        let mut assignments = Vec::new();
        let mut bindings = Vec::new();

        for (column, value) in &serialized.values {
            if primary_keys.contains_column(column) {
                continue;
            }
            let placeholder = placeholders.next(column);
            assignments.push(format!("{}={}", column, placeholder));
            bindings.push(Binding {
                placeholder,
                value: value.clone(),
            });
        }

        if assignments.is_empty() {
            return Err(AdapterError::NothingToUpdate {
                model: self.descriptor.model_name().to_string(),
            });
        }

        let (clause, where_bindings) = self.build_where_clause(serialized, &mut placeholders)?;
        bindings.extend(where_bindings);

        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            self.descriptor.table_name(),
            assignments.join(", "),
            clause
        );
        debug_log!("Generated update statement: {}", sql);
        Ok(BoundStatement { sql, bindings })
    }

    /// `DELETE FROM <table> WHERE <pk-clause>`
    pub fn delete(&self, serialized: &SerializedModel) -> Result<BoundStatement, AdapterError> {
        let mut placeholders = self.placeholders();
        let (clause, bindings) = self.build_where_clause(serialized, &mut placeholders)?;

        let sql = format!("DELETE FROM {} WHERE {}", self.descriptor.table_name(), clause);
        debug_log!("Generated delete statement: {}", sql);
        Ok(BoundStatement { sql, bindings })
    }

    /// The primary key condition on its own, without the `WHERE` keyword
    pub fn where_clause(&self, serialized: &SerializedModel) -> Result<BoundStatement, AdapterError> {
        let mut placeholders = self.placeholders();
        let (sql, bindings) = self.build_where_clause(serialized, &mut placeholders)?;
        Ok(BoundStatement { sql, bindings })
    }

    /// `SELECT rowid AS __rowid__, <cols> FROM <table>`
    pub fn select_all(&self) -> BoundStatement {
        let sql = format!(
            "SELECT rowid AS {}, {} FROM {}",
            ROW_ID_COLUMN,
            self.descriptor.column_names().join(", "),
            self.descriptor.table_name()
        );
        debug_log!("Generated select statement: {}", sql);
        BoundStatement::new(sql)
    }

    /// `DELETE FROM <table>`
    pub fn delete_all(&self) -> BoundStatement {
        BoundStatement::new(format!("DELETE FROM {}", self.descriptor.table_name()))
    }

    fn build_where_clause(
        &self,
        serialized: &SerializedModel,
        placeholders: &mut Placeholders,
    ) -> Result<(String, Vec<Binding>), AdapterError> {
        let mut terms = Vec::with_capacity(self.descriptor.primary_keys().len());
        let mut bindings = Vec::with_capacity(self.descriptor.primary_keys().len());

        for column in self.descriptor.primary_keys().columns() {
            let value = match serialized.primary_key_values.get(column) {
                Some(value) if !value.is_null() => value.clone(),
                _ => {
                    return Err(AdapterError::MissingPrimaryKeyValue {
                        column: column.to_string(),
                    })
                }
            };
            let placeholder = placeholders.next(column);
            terms.push(format!("{}={}", column, placeholder));
            bindings.push(Binding { placeholder, value });
        }

        Ok((terms.join(" AND "), bindings))
    }
}

