//! Procedural macros for generating model mapping metadata
//!
//! This crate provides the `#[model]` macro and `TableModel` derive, which
//! turn a struct declaration into the static property list and by-key
//! accessors the mapping engine works from.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod impl_generation;
mod model_macro;
mod parsing;

use impl_generation::generate_table_model_impl;
use model_macro::model_attribute;
use parsing::{parse_field_attributes, parse_table_attributes};

/// Derive macro for the TableModel trait
///
/// Note: It's recommended to use the `#[model]` attribute macro instead,
/// which automatically includes this derive along with other necessary derives.
///
/// Manual usage:
/// ```ignore
/// #[derive(Debug, Clone, Default, TableModel)]
/// #[table(name = "events")]
/// pub struct Event {
///     #[primary_key]
///     pub id: Option<i64>,
///
///     #[column(name = "event_title")]
///     pub title: String,
///
///     #[column(sql_type = "INTEGER")]
///     #[transform(with = "ValueTransformer::unix_timestamp")]
///     pub starts_at: String,
///
///     #[column(omit)]
///     pub cached_label: Option<String>,
///
///     #[row_id]
///     pub row_id: RowId,
/// }
/// ```
///
/// Supported attributes:
/// - `#[table(name = "...")]`: table name, defaults to the struct name
/// - `#[primary_key]`: part of the primary key, in field order; without any,
///   the `id` field is used
/// - `#[column(name = "...")]`, `#[column(omit)]`, `#[column(sql_type = "...")]`
/// - `#[transform(with = "path")]`: a function returning a `ValueTransformer`
/// - `#[row_id]`: the `RowId` field holding the store's row identifier
#[proc_macro_derive(
    TableModel,
    attributes(table, primary_key, column, transform, row_id)
)]
pub fn derive_table_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    // Parse table attributes - handle errors properly
    let table_info = match parse_table_attributes(name, &input.attrs) {
        Ok(attrs) => attrs,
        Err(e) => return e.to_compile_error().into(),
    };

    // Parse field attributes - handle errors properly
    let field_info = match parse_field_attributes(&input.data) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    TokenStream::from(generate_table_model_impl(name, &table_info, &field_info))
}

/// Convenience attribute macro that adds all necessary derives for a model
///
/// Usage:
/// ```ignore
/// use rowhaus::prelude::*;
///
/// #[model]
/// #[table(name = "users")]
/// pub struct User {
///     #[primary_key]
///     pub id: Option<i64>,
///     pub name: String,
///     #[row_id]
///     pub row_id: RowId,
/// }
/// ```
#[proc_macro_attribute]
pub fn model(_attr: TokenStream, item: TokenStream) -> TokenStream {
    model_attribute(_attr, item)
}
