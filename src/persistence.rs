//! Store access
//!
//! This module executes the statements built by the adapter against the
//! SQLite pool and reads result rows back into models.

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Row, Sqlite, TypeInfo, ValueRef};
use store_object::{
    AdapterError, BoundStatement, Operation, ROW_ID_COLUMN, RowId, StoreRow, TableModel,
};
use type_mapping::StoreValue;

use crate::core::RowHaus;
use crate::errors::RowHausError;

impl RowHaus {
    /// Load every row of the model's table
    pub async fn all_objects<T: TableModel>(&self) -> Result<Vec<T>, RowHausError> {
        let statement = self.adapter().select_all_statement::<T>()?;
        debug_log!("Executing: {}", statement.sql);

        let rows = bind_statement(&statement).fetch_all(self.pool()).await?;
        let mut models = Vec::with_capacity(rows.len());
        for row in &rows {
            models.push(self.adapter().parse_row::<T>(store_row(row)?)?);
        }
        Ok(models)
    }

    /// Insert a model and record the row id the store assigned to it.
    ///
    /// When the table declares its primary key and the key is a single
    /// `INTEGER` column left `NULL`, the key property is set to the row id too.
    pub async fn insert<T: TableModel>(&self, model: &mut T) -> Result<RowId, RowHausError> {
        let statement = self.adapter().statements_for(model, Operation::Insert)?;
        let result = self.execute(&statement).await?;
        let row_id = RowId::new(result.last_insert_rowid());

        if self.adapter().config().primary_key_constraint {
            self.assign_integer_key(model, row_id)?;
        }
        model.set_row_id(row_id);
        Ok(row_id)
    }

    /// Update the row identified by the model's primary key; returns rows affected
    pub async fn update<T: TableModel>(&self, model: &T) -> Result<u64, RowHausError> {
        let statement = self.adapter().statements_for(model, Operation::Update)?;
        Ok(self.execute(&statement).await?.rows_affected())
    }

    /// Insert a model the store has not seen yet, update it otherwise
    pub async fn save<T: TableModel>(&self, model: &mut T) -> Result<(), RowHausError> {
        if model.row_id().is_set() {
            self.update(model).await?;
        } else {
            self.insert(model).await?;
        }
        Ok(())
    }

    /// Delete the row identified by the model's primary key; returns rows affected
    pub async fn delete<T: TableModel>(&self, model: &T) -> Result<u64, RowHausError> {
        let statement = self.adapter().statements_for(model, Operation::Delete)?;
        Ok(self.execute(&statement).await?.rows_affected())
    }

    /// Delete every row of the model's table; returns rows affected
    pub async fn delete_all<T: TableModel>(&self) -> Result<u64, RowHausError> {
        let statement = self.adapter().delete_all_statement::<T>()?;
        Ok(self.execute(&statement).await?.rows_affected())
    }

    async fn execute(
        &self,
        statement: &BoundStatement,
    ) -> Result<sqlx::sqlite::SqliteQueryResult, RowHausError> {
        debug_log!(
            "Executing: {} with {} bindings",
            statement.sql,
            statement.bindings.len()
        );
        Ok(bind_statement(statement).execute(self.pool()).await?)
    }

    fn assign_integer_key<T: TableModel>(
        &self,
        model: &mut T,
        row_id: RowId,
    ) -> Result<(), RowHausError> {
        let descriptor = self.adapter().descriptor::<T>()?;
        let Some(key) = descriptor.primary_keys().single() else {
            return Ok(());
        };
        let is_integer = descriptor
            .column_type(&key.key)
            .is_some_and(|sql_type| sql_type.eq_ignore_ascii_case("INTEGER"));
        if !is_integer {
            return Ok(());
        }

        let unset = model
            .property(&key.key)
            .map(|value| value.is_null())
            .unwrap_or(false);
        if unset {
            model
                .set_property(&key.key, StoreValue::Integer(row_id.get()))
                .map_err(|e| {
                    AdapterError::invalid_mapping(
                        descriptor.model_name(),
                        format!("cannot assign row id to '{}': {}", key.key, e),
                    )
                })?;
        }
        Ok(())
    }
}

fn bind_statement(statement: &BoundStatement) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    statement
        .values()
        .fold(sqlx::query(&statement.sql), |query, value| bind_value(query, value))
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &StoreValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        StoreValue::Null => query.bind(Option::<i64>::None),
        StoreValue::Integer(v) => query.bind(*v),
        StoreValue::Real(v) => query.bind(*v),
        StoreValue::Text(v) => query.bind(v.clone()),
        StoreValue::Blob(v) => query.bind(v.clone()),
    }
}

/// Convert a result row into a `StoreRow`, taking the row id from its alias column
fn store_row(row: &SqliteRow) -> Result<StoreRow, RowHausError> {
    let mut store_row = StoreRow::new(RowId::UNSET);

    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            StoreValue::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => StoreValue::Integer(row.try_get::<i64, _>(index)?),
                "REAL" => StoreValue::Real(row.try_get::<f64, _>(index)?),
                "BLOB" => StoreValue::Blob(row.try_get::<Vec<u8>, _>(index)?),
                _ => StoreValue::Text(row.try_get::<String, _>(index)?),
            }
        };

        if column.name() == ROW_ID_COLUMN {
            if let StoreValue::Integer(id) = value {
                store_row.set_row_id(RowId::new(id));
            }
        } else {
            store_row.insert(column.name(), value);
        }
    }

    Ok(store_row)
}
