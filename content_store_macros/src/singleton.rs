use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, LitStr, Path};

use crate::to_kebab_case;

pub fn derive_singleton(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    if !matches!(input.data, Data::Struct(_)) {
        return Err(syn::Error::new_spanned(
            name,
            "Singleton derive only supports structs",
        ));
    }

    let mut storage_key = None;
    let mut default_path: Option<Path> = None;
    let mut validate_path: Option<Path> = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("singleton") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("storage_key") {
                let value: LitStr = meta.value()?.parse()?;
                storage_key = Some(value.value());
            } else if meta.path.is_ident("default") {
                let value: LitStr = meta.value()?.parse()?;
                default_path = Some(value.parse()?);
            } else if meta.path.is_ident("validate") {
                let value: LitStr = meta.value()?.parse()?;
                validate_path = Some(value.parse()?);
            } else {
                return Err(meta.error("unsupported singleton attribute"));
            }
            Ok(())
        })?;
    }

    let storage_key = storage_key.unwrap_or_else(|| to_kebab_case(&name.to_string()));

    let default_body = match default_path {
        Some(path) => quote! { #path() },
        None => quote! { <Self as ::std::default::Default>::default() },
    };
    let validate_fn = validate_path.map(|path| {
        quote! {
            fn validate(&self) -> ::std::result::Result<(), ::std::string::String> {
                #path(self)
            }
        }
    });

    Ok(quote! {
        impl content_store::Singleton for #name {
            const STORAGE_KEY: &'static str = #storage_key;

            fn default_value() -> Self {
                #default_body
            }

            #validate_fn
        }
    })
}
