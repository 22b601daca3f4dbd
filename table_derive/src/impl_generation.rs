//! Code generation for the `TableModel` implementation
//!
//! This module turns parsed table and field metadata into the static
//! property list, the declared overrides and the by-key accessors.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use crate::parsing::{ColumnSpec, FieldInfo, TableInfo};

pub fn generate_table_model_impl(
    name: &Ident,
    table_info: &TableInfo,
    field_info: &FieldInfo,
) -> TokenStream {
    let table_name = &table_info.name;
    let row_id_field = &field_info.row_id_field;

    let property_defs = field_info.properties.iter().map(|p| {
        let key = &p.key;
        let sql_type = &p.sql_type;
        quote! { ::rowhaus::store_object::PropertyDef::new(#key, #sql_type) }
    });

    let overrides: Vec<TokenStream> = field_info
        .properties
        .iter()
        .filter_map(|p| {
            let key = &p.key;
            match &p.column {
                ColumnSpec::Default => None,
                ColumnSpec::Renamed(column) => Some(quote! {
                    (#key, ::rowhaus::store_object::ColumnOverride::Column(#column))
                }),
                ColumnSpec::Omitted => Some(quote! {
                    (#key, ::rowhaus::store_object::ColumnOverride::Omit)
                }),
            }
        })
        .collect();

    let column_types: Vec<TokenStream> = field_info
        .properties
        .iter()
        .filter_map(|p| {
            let key = &p.key;
            p.sql_type_override
                .as_ref()
                .map(|sql_type| quote! { (#key, #sql_type) })
        })
        .collect();

    let primary_keys: Vec<&String> = field_info
        .properties
        .iter()
        .filter(|p| p.primary_key)
        .map(|p| &p.key)
        .collect();

    let transformers: Vec<TokenStream> = field_info
        .properties
        .iter()
        .filter_map(|p| {
            let key = &p.key;
            p.transform
                .as_ref()
                .map(|path| quote! { (#key, #path()) })
        })
        .collect();

    // Only emit the overrides the model actually declares; the trait defaults
    // cover the rest
    let columns_fn = (!overrides.is_empty()).then(|| {
        quote! {
            fn columns_by_property_key() -> Vec<(&'static str, ::rowhaus::store_object::ColumnOverride)> {
                vec![#(#overrides),*]
            }
        }
    });

    let column_types_fn = (!column_types.is_empty()).then(|| {
        quote! {
            fn column_types_by_property_key() -> Vec<(&'static str, &'static str)> {
                vec![#(#column_types),*]
            }
        }
    });

    let primary_keys_fn = (!primary_keys.is_empty()).then(|| {
        quote! {
            fn primary_keys() -> Vec<&'static str> {
                vec![#(#primary_keys),*]
            }
        }
    });

    let transformers_fn = (!transformers.is_empty()).then(|| {
        quote! {
            fn value_transformers() -> Vec<(&'static str, ::rowhaus::store_object::ValueTransformer)> {
                vec![#(#transformers),*]
            }
        }
    });

    // Accessors cover stored properties only, so omitted fields need no
    // store value conversions
    let stored_keys: Vec<&String> = field_info.stored().map(|p| &p.key).collect();
    let stored_idents: Vec<&Ident> = field_info.stored().map(|p| &p.ident).collect();

    quote! {
        impl ::rowhaus::store_object::TableModel for #name {
            fn table_name() -> &'static str {
                #table_name
            }

            fn properties() -> &'static [::rowhaus::store_object::PropertyDef] {
                const PROPERTIES: &[::rowhaus::store_object::PropertyDef] = &[#(#property_defs),*];
                PROPERTIES
            }

            #columns_fn
            #column_types_fn
            #primary_keys_fn
            #transformers_fn

            fn property(
                &self,
                key: &str,
            ) -> ::std::result::Result<::rowhaus::type_mapping::StoreValue, ::rowhaus::store_object::PropertyError> {
                match key {
                    #(#stored_keys => ::std::result::Result::Ok(
                        ::rowhaus::type_mapping::ToStoreValue::to_store_value(&self.#stored_idents)
                    ),)*
                    _ => ::std::result::Result::Err(
                        ::rowhaus::store_object::PropertyError::Unknown(key.to_string())
                    ),
                }
            }

            fn set_property(
                &mut self,
                key: &str,
                value: ::rowhaus::type_mapping::StoreValue,
            ) -> ::std::result::Result<(), ::rowhaus::store_object::PropertyError> {
                match key {
                    #(#stored_keys => {
                        self.#stored_idents = ::rowhaus::type_mapping::FromStoreValue::from_store_value(value)?;
                    })*
                    _ => {
                        return ::std::result::Result::Err(
                            ::rowhaus::store_object::PropertyError::Unknown(key.to_string())
                        );
                    }
                }
                ::std::result::Result::Ok(())
            }

            fn row_id(&self) -> ::rowhaus::store_object::RowId {
                self.#row_id_field
            }

            fn set_row_id(&mut self, row_id: ::rowhaus::store_object::RowId) {
                self.#row_id_field = row_id;
            }
        }
    }
}
