//! Table creation
//!
//! This module creates the table of a model from its resolved mapping.

use crate::core::RowHaus;
use crate::errors::RowHausError;
use store_object::TableModel;

impl RowHaus {
    /// Create the table for a model if it does not exist yet.
    /// If recreate is true, drops the existing table first
    pub async fn auto_migrate<T: TableModel>(&self, recreate: bool) -> Result<(), RowHausError> {
        let descriptor = self.adapter().descriptor::<T>()?;
        let table_name = descriptor.table_name();

        if recreate {
            // Table name was validated when the descriptor was resolved
            let drop_sql = format!("DROP TABLE IF EXISTS {}", table_name);
            tracing::info!("Dropping table with SQL: {}", drop_sql);
            sqlx::query(&drop_sql).execute(self.pool()).await?;
        } else if self.table_exists(table_name).await? {
            debug_log!("Table {} already exists", table_name);
            return Ok(());
        }

        let create = self.adapter().create_statement::<T>()?;
        tracing::info!("Creating table with SQL: {}", create.sql);
        sqlx::query(&create.sql).execute(self.pool()).await?;

        Ok(())
    }

    /// Whether a table with this name exists
    pub async fn table_exists(&self, table_name: &str) -> Result<bool, RowHausError> {
        let found: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(table_name)
                .fetch_optional(self.pool())
                .await?;
        Ok(found.is_some())
    }
}
