//! SQL statement synthesis
//!
//! This module turns resolved model metadata, and optionally one model's
//! column values, into SQL text plus the values to bind to it.

pub mod builder;
pub mod placeholder;

pub use builder::StatementBuilder;
pub use placeholder::Placeholders;

use serde::Serialize;
use std::fmt::{self, Display};
use type_mapping::StoreValue;

/// Statement kinds that can be built for a single model instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operation {
    Create,
    Insert,
    Update,
    Delete,
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "CREATE",
            Operation::Insert => "INSERT",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A value bound to one placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binding {
    pub placeholder: String,
    pub value: StoreValue,
}

/// SQL text plus its bindings, in the order the placeholders appear
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoundStatement {
    pub sql: String,
    pub bindings: Vec<Binding>,
}

impl BoundStatement {
    /// Statement without parameters
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            bindings: Vec::new(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound values in placeholder order
    pub fn values(&self) -> impl Iterator<Item = &StoreValue> {
        self.bindings.iter().map(|b| &b.value)
    }

    pub fn is_parameterless(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Display for BoundStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
