//! Parsing utilities for table and field attributes
//!
//! This module handles the parsing of `#[table]`, `#[column]`, `#[primary_key]`,
//! `#[transform]` and `#[row_id]` attributes, and validation of table and
//! column names.

use quote::quote;
use syn::{Attribute, Data, Error, Fields, Ident, LitStr, Path, Result};

/// Validate table name and return syn::Error for better proc macro error handling
pub fn validate_table_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid table name '{}': {}", name, e)))
}

/// Validate column name and return syn::Error for better proc macro error handling
pub fn validate_column_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid column name '{}': {}", name, e)))
}

/// Validation logic that mirrors store_object::validation
/// This ensures compile-time validation matches runtime validation
fn validate_identifier(name: &str) -> std::result::Result<(), String> {
    let first_char = name
        .chars()
        .next()
        .ok_or_else(|| "Name cannot be empty".to_string())?;
    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(format!(
            "Name '{}' must start with a letter or underscore",
            name
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("Name '{}' contains invalid characters: only alphanumeric characters and underscores are allowed", name));
    }

    if is_reserved_keyword(name) {
        return Err(format!("Name '{}' is a reserved SQL keyword", name));
    }

    Ok(())
}

/// Check if a name is a reserved SQL keyword
/// This mirrors the list in store_object::validation
fn is_reserved_keyword(name: &str) -> bool {
    const RESERVED_KEYWORDS: &[&str] = &[
        "ADD",
        "ALL",
        "ALTER",
        "AND",
        "AS",
        "AUTOINCREMENT",
        "BETWEEN",
        "CASE",
        "CHECK",
        "COLLATE",
        "COMMIT",
        "CONSTRAINT",
        "CREATE",
        "DEFAULT",
        "DEFERRABLE",
        "DELETE",
        "DISTINCT",
        "DROP",
        "ELSE",
        "ESCAPE",
        "EXCEPT",
        "EXISTS",
        "FOREIGN",
        "FROM",
        "GROUP",
        "HAVING",
        "IN",
        "INDEX",
        "INSERT",
        "INTERSECT",
        "INTO",
        "IS",
        "ISNULL",
        "JOIN",
        "LIMIT",
        "NOT",
        "NOTNULL",
        "NULL",
        "ON",
        "OR",
        "ORDER",
        "PRIMARY",
        "REFERENCES",
        "RETURNING",
        "SELECT",
        "SET",
        "TABLE",
        "THEN",
        "TO",
        "TRANSACTION",
        "UNION",
        "UNIQUE",
        "UPDATE",
        "USING",
        "VALUES",
        "WHEN",
        "WHERE",
        // Names of the store's own row address
        "ROWID",
        "OID",
        "_ROWID_",
        // Row id alias used by SELECT statements
        "__ROWID__",
    ];

    RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str())
}

#[derive(Debug)]
pub struct TableInfo {
    pub name: String,
}

/// Where a field is stored, as declared by `#[column(...)]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSpec {
    /// No `name` or `omit`: stored under the field name
    Default,
    Renamed(String),
    Omitted,
}

#[derive(Debug)]
pub struct PropertyInfo {
    pub ident: Ident,
    pub key: String,
    /// SQL type inferred from the Rust type
    pub sql_type: String,
    /// Type from `#[column(sql_type = "...")]`
    pub sql_type_override: Option<String>,
    pub column: ColumnSpec,
    pub primary_key: bool,
    /// Function from `#[transform(with = "...")]`
    pub transform: Option<Path>,
}

#[derive(Debug)]
pub struct FieldInfo {
    pub properties: Vec<PropertyInfo>,
    pub row_id_field: Ident,
}

impl FieldInfo {
    /// Properties that are stored in a column
    pub fn stored(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.properties
            .iter()
            .filter(|p| p.column != ColumnSpec::Omitted)
    }
}

pub fn parse_table_attributes(struct_name: &Ident, attrs: &[Attribute]) -> Result<TableInfo> {
    let mut table_name = None;

    for attr in attrs {
        if attr.path().is_ident("table") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    table_name = Some((value.value(), value.span()));
                    Ok(())
                } else {
                    Err(meta.error("unsupported table attribute, expected `name`"))
                }
            })?;
        }
    }

    // Without #[table(name = ...)] the table is named after the struct
    let (name, span) = table_name.unwrap_or_else(|| (struct_name.to_string(), struct_name.span()));

    // Validate table name at compile time with proper error handling
    validate_table_name_syn(&name, span)?;

    Ok(TableInfo { name })
}

pub fn parse_field_attributes(data: &Data) -> Result<FieldInfo> {
    let Data::Struct(data_struct) = data else {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            "TableModel can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(fields_named) = &data_struct.fields else {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            "TableModel can only be derived for structs with named fields",
        ));
    };

    let mut properties = Vec::new();
    let mut row_id_field: Option<Ident> = None;

    for field in &fields_named.named {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "Field must have a name"))?;

        if has_attribute(&field.attrs, "row_id") {
            if row_id_field.is_some() {
                return Err(Error::new_spanned(
                    field_name,
                    "only one field can be marked #[row_id]",
                ));
            }
            row_id_field = Some(field_name.clone());
            continue;
        }

        let ty = &field.ty;
        // Normalize type string by removing all whitespace for consistent matching
        let type_string = quote!(#ty).to_string().replace(' ', "");
        let sql_type = type_mapping::rust_type_to_sqlite_type(&type_string).to_string();

        let (column, sql_type_override) = parse_column_attribute(&field.attrs)?;
        let key = field_name.to_string();

        match &column {
            ColumnSpec::Default => validate_column_name_syn(&key, field_name.span())?,
            ColumnSpec::Renamed(name) => validate_column_name_syn(name, field_name.span())?,
            ColumnSpec::Omitted => {}
        }

        let primary_key = has_attribute(&field.attrs, "primary_key");
        if primary_key && column == ColumnSpec::Omitted {
            return Err(Error::new_spanned(
                field_name,
                "a #[primary_key] field cannot be #[column(omit)]",
            ));
        }

        properties.push(PropertyInfo {
            ident: field_name.clone(),
            key,
            sql_type,
            sql_type_override,
            column,
            primary_key,
            transform: parse_transform_attribute(&field.attrs)?,
        });
    }

    let row_id_field = row_id_field.ok_or_else(|| {
        Error::new(
            proc_macro2::Span::call_site(),
            "a row id field is required: add `#[row_id] pub row_id: RowId` to your struct",
        )
    })?;

    Ok(FieldInfo {
        properties,
        row_id_field,
    })
}

pub fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// Parse `#[column(name = "...", sql_type = "...")]` or `#[column(omit)]`
fn parse_column_attribute(attrs: &[Attribute]) -> Result<(ColumnSpec, Option<String>)> {
    let mut column = ColumnSpec::Default;
    let mut sql_type = None;

    for attr in attrs {
        if !attr.path().is_ident("column") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                if column == ColumnSpec::Omitted {
                    return Err(meta.error("`name` and `omit` cannot be combined"));
                }
                column = ColumnSpec::Renamed(value.value());
                Ok(())
            } else if meta.path.is_ident("omit") {
                if matches!(column, ColumnSpec::Renamed(_)) {
                    return Err(meta.error("`name` and `omit` cannot be combined"));
                }
                column = ColumnSpec::Omitted;
                Ok(())
            } else if meta.path.is_ident("sql_type") {
                let value: LitStr = meta.value()?.parse()?;
                sql_type = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported column attribute, expected `name`, `omit` or `sql_type`"))
            }
        })?;
    }

    Ok((column, sql_type))
}

/// Parse `#[transform(with = "path::to::transformer")]`
fn parse_transform_attribute(attrs: &[Attribute]) -> Result<Option<Path>> {
    let mut transform = None;

    for attr in attrs {
        if !attr.path().is_ident("transform") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("with") {
                let value: LitStr = meta.value()?.parse()?;
                transform = Some(value.parse::<Path>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported transform attribute, expected `with`"))
            }
        })?;
    }

    Ok(transform)
}
