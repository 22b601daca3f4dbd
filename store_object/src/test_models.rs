//! Hand-written models shared by the unit tests

use crate::row::RowId;
use crate::traits::{ColumnOverride, PropertyDef, PropertyError, TableModel};
use crate::transform::ValueTransformer;
use std::sync::atomic::{AtomicUsize, Ordering};
use type_mapping::{FromStoreValue, StoreValue, ToStoreValue};

macro_rules! property_access {
    ($($field:ident),* $(,)?) => {
        fn property(&self, key: &str) -> Result<StoreValue, PropertyError> {
            match key {
                $(stringify!($field) => Ok(self.$field.to_store_value()),)*
                _ => Err(PropertyError::Unknown(key.to_string())),
            }
        }

        fn set_property(&mut self, key: &str, value: StoreValue) -> Result<(), PropertyError> {
            match key {
                $(stringify!($field) => self.$field = FromStoreValue::from_store_value(value)?,)*
                _ => return Err(PropertyError::Unknown(key.to_string())),
            }
            Ok(())
        }

        fn row_id(&self) -> RowId {
            self.row_id
        }

        fn set_row_id(&mut self, row_id: RowId) {
            self.row_id = row_id;
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub row_id: RowId,
}

impl TableModel for User {
    fn table_name() -> &'static str {
        "User"
    }

    fn properties() -> &'static [PropertyDef] {
        const PROPERTIES: &[PropertyDef] = &[
            PropertyDef::new("id", "INTEGER"),
            PropertyDef::new("name", "TEXT"),
            PropertyDef::new("email", "TEXT"),
        ];
        PROPERTIES
    }

    property_access!(id, name, email);
}

/// Same table as `User`, with `email` kept out of the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrivateUser {
    pub id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub row_id: RowId,
}

impl TableModel for PrivateUser {
    fn table_name() -> &'static str {
        "User"
    }

    fn properties() -> &'static [PropertyDef] {
        const PROPERTIES: &[PropertyDef] = &[
            PropertyDef::new("id", "INTEGER"),
            PropertyDef::new("name", "TEXT"),
            PropertyDef::new("email", "TEXT"),
        ];
        PROPERTIES
    }

    fn columns_by_property_key() -> Vec<(&'static str, ColumnOverride)> {
        vec![("email", ColumnOverride::Omit)]
    }

    property_access!(id, name, email);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub draft: bool,
    pub row_id: RowId,
}

impl TableModel for Note {
    fn table_name() -> &'static str {
        "notes"
    }

    fn properties() -> &'static [PropertyDef] {
        const PROPERTIES: &[PropertyDef] = &[
            PropertyDef::new("id", "INTEGER"),
            PropertyDef::new("title", "TEXT"),
            PropertyDef::new("body", "TEXT"),
            PropertyDef::new("draft", "INTEGER"),
        ];
        PROPERTIES
    }

    fn columns_by_property_key() -> Vec<(&'static str, ColumnOverride)> {
        vec![
            ("body", ColumnOverride::Column("note_body")),
            ("draft", ColumnOverride::Omit),
        ]
    }

    property_access!(id, title, body, draft);
}

/// Timestamp kept as RFC 3339 text on the model, integer seconds in the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    pub id: i64,
    pub at: String,
    pub row_id: RowId,
}

impl TableModel for Event {
    fn table_name() -> &'static str {
        "events"
    }

    fn properties() -> &'static [PropertyDef] {
        const PROPERTIES: &[PropertyDef] = &[
            PropertyDef::new("id", "INTEGER"),
            PropertyDef::new("at", "TEXT"),
        ];
        PROPERTIES
    }

    fn column_types_by_property_key() -> Vec<(&'static str, &'static str)> {
        vec![("at", "INTEGER")]
    }

    fn value_transformers() -> Vec<(&'static str, ValueTransformer)> {
        vec![
            ("at", ValueTransformer::unix_timestamp()),
            (
                "ghost",
                ValueTransformer::new(
                    |_| Err("never called".to_string()),
                    |_| Err("never called".to_string()),
                ),
            ),
        ]
    }

    property_access!(id, at);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderLine {
    pub order_id: Option<i64>,
    pub line: Option<i64>,
    pub qty: u32,
    pub row_id: RowId,
}

impl TableModel for OrderLine {
    fn table_name() -> &'static str {
        "order_lines"
    }

    fn properties() -> &'static [PropertyDef] {
        const PROPERTIES: &[PropertyDef] = &[
            PropertyDef::new("order_id", "INTEGER"),
            PropertyDef::new("line", "INTEGER"),
            PropertyDef::new("qty", "INTEGER"),
        ];
        PROPERTIES
    }

    fn primary_keys() -> Vec<&'static str> {
        vec!["order_id", "line"]
    }

    property_access!(order_id, line, qty);
}

/// Primary key only, nothing to update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub id: i64,
    pub row_id: RowId,
}

impl TableModel for Tag {
    fn table_name() -> &'static str {
        "tags"
    }

    fn properties() -> &'static [PropertyDef] {
        const PROPERTIES: &[PropertyDef] = &[PropertyDef::new("id", "INTEGER")];
        PROPERTIES
    }

    property_access!(id);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unkeyed {
    pub sku: String,
    pub row_id: RowId,
}

impl TableModel for Unkeyed {
    fn table_name() -> &'static str {
        "unkeyed"
    }

    fn properties() -> &'static [PropertyDef] {
        const PROPERTIES: &[PropertyDef] = &[PropertyDef::new("sku", "TEXT")];
        PROPERTIES
    }

    property_access!(sku);
}

/// Overrides a key that is not a property
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Misdeclared {
    pub id: i64,
    pub row_id: RowId,
}

impl TableModel for Misdeclared {
    fn table_name() -> &'static str {
        "misdeclared"
    }

    fn properties() -> &'static [PropertyDef] {
        const PROPERTIES: &[PropertyDef] = &[PropertyDef::new("id", "INTEGER")];
        PROPERTIES
    }

    fn columns_by_property_key() -> Vec<(&'static str, ColumnOverride)> {
        vec![("nickname", ColumnOverride::Column("nick"))]
    }

    property_access!(id);
}

/// Number of times `Counted`'s mapping declaration has been read
pub static COUNTED_RESOLUTIONS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Counted {
    pub id: i64,
    pub row_id: RowId,
}

impl TableModel for Counted {
    fn table_name() -> &'static str {
        "counted"
    }

    fn properties() -> &'static [PropertyDef] {
        const PROPERTIES: &[PropertyDef] = &[PropertyDef::new("id", "INTEGER")];
        PROPERTIES
    }

    fn columns_by_property_key() -> Vec<(&'static str, ColumnOverride)> {
        COUNTED_RESOLUTIONS.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(20));
        Vec::new()
    }

    property_access!(id);
}

/// Stores a property under the name of the store's own row address
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Legacy {
    pub code: String,
    pub rowid: i64,
    pub row_id: RowId,
}

impl TableModel for Legacy {
    fn table_name() -> &'static str {
        "legacy"
    }

    fn properties() -> &'static [PropertyDef] {
        const PROPERTIES: &[PropertyDef] = &[
            PropertyDef::new("code", "TEXT"),
            PropertyDef::new("rowid", "INTEGER"),
        ];
        PROPERTIES
    }

    fn primary_keys() -> Vec<&'static str> {
        vec!["code"]
    }

    property_access!(code, rowid);
}

/// Renames a property onto the `oid` row address alias
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegacyAlias {
    pub code: String,
    pub legacy_id: i64,
    pub row_id: RowId,
}

impl TableModel for LegacyAlias {
    fn table_name() -> &'static str {
        "legacy_alias"
    }

    fn properties() -> &'static [PropertyDef] {
        const PROPERTIES: &[PropertyDef] = &[
            PropertyDef::new("code", "TEXT"),
            PropertyDef::new("legacy_id", "INTEGER"),
        ];
        PROPERTIES
    }

    fn columns_by_property_key() -> Vec<(&'static str, ColumnOverride)> {
        vec![("legacy_id", ColumnOverride::Column("oid"))]
    }

    fn primary_keys() -> Vec<&'static str> {
        vec!["code"]
    }

    property_access!(code, legacy_id);
}
