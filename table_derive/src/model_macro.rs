use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error};

/// Convenience attribute macro that adds all necessary derives for a model
///
/// The struct gets `Debug`, `Clone`, `Default` and `TableModel`; any other
/// derives and attributes on it are kept as written.
pub fn model_attribute(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    let name = &input.ident;
    let attrs = &input.attrs;
    let vis = &input.vis;
    let generics = &input.generics;

    // Extract fields from the struct
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Error::new_spanned(name, "model can only be used on structs")
                .to_compile_error()
                .into()
        }
    };

    let expanded = quote! {
        #[derive(Debug, Clone, Default, ::rowhaus::table_derive::TableModel)]
        #(#attrs)*
        #vis struct #name #generics #fields
    };

    TokenStream::from(expanded)
}
