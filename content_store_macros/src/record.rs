use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Path};

use crate::to_kebab_case;

/// Struct-level `#[record(...)]` options.
#[derive(Default)]
struct RecordAttrs {
    storage_key: Option<String>,
    update: Option<Ident>,
    duplicates: Option<Ident>,
    defaults: Option<Path>,
    validate: Option<Path>,
    on_create: Option<Path>,
}

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let attrs = parse_struct_attrs(input)?;
    let key_field = extract_key_field(input)?;

    let storage_key = attrs
        .storage_key
        .unwrap_or_else(|| format!("{}s", to_kebab_case(&name.to_string())));

    let update_mode = match attrs.update {
        Some(mode) => quote! { content_store::UpdateMode::#mode },
        None => quote! { content_store::UpdateMode::Replace },
    };
    let duplicates = match attrs.duplicates {
        Some(policy) => quote! { content_store::DuplicatePolicy::#policy },
        None => quote! { content_store::DuplicatePolicy::Allow },
    };

    let defaults_fn = attrs.defaults.map(|path| {
        quote! {
            fn defaults() -> ::std::vec::Vec<Self> {
                #path()
            }
        }
    });
    let validate_fn = attrs.validate.map(|path| {
        quote! {
            fn validate(&self) -> ::std::result::Result<(), ::std::string::String> {
                #path(self)
            }
        }
    });
    let on_create_fn = attrs.on_create.map(|path| {
        quote! {
            fn on_create(&mut self) {
                #path(self)
            }
        }
    });

    Ok(quote! {
        impl content_store::Record for #name {
            const STORAGE_KEY: &'static str = #storage_key;
            const UPDATE_MODE: content_store::UpdateMode = #update_mode;
            const DUPLICATES: content_store::DuplicatePolicy = #duplicates;

            fn key(&self) -> &str {
                &self.#key_field
            }

            #defaults_fn
            #validate_fn
            #on_create_fn
        }
    })
}

fn parse_struct_attrs(input: &DeriveInput) -> syn::Result<RecordAttrs> {
    let mut attrs = RecordAttrs::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("storage_key") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.storage_key = Some(value.value());
            } else if meta.path.is_ident("update") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.update = Some(match value.value().as_str() {
                    "replace" => Ident::new("Replace", value.span()),
                    "merge" => Ident::new("Merge", value.span()),
                    _ => return Err(meta.error("update must be \"replace\" or \"merge\"")),
                });
            } else if meta.path.is_ident("duplicates") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.duplicates = Some(match value.value().as_str() {
                    "allow" => Ident::new("Allow", value.span()),
                    "reject" => Ident::new("Reject", value.span()),
                    _ => return Err(meta.error("duplicates must be \"allow\" or \"reject\"")),
                });
            } else if meta.path.is_ident("defaults") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.defaults = Some(value.parse()?);
            } else if meta.path.is_ident("validate") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.validate = Some(value.parse()?);
            } else if meta.path.is_ident("on_create") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.on_create = Some(value.parse()?);
            } else {
                return Err(meta.error("unsupported record attribute"));
            }
            Ok(())
        })?;
    }

    Ok(attrs)
}

fn extract_key_field(input: &DeriveInput) -> syn::Result<Ident> {
    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Record derive only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record derive only supports structs",
            ))
        }
    };

    for field in fields {
        for attr in &field.attrs {
            if !attr.path().is_ident("record") {
                continue;
            }
            let mut is_key = false;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    is_key = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported record field attribute"))
                }
            })?;
            if is_key {
                if let Some(ident) = &field.ident {
                    return Ok(ident.clone());
                }
            }
        }
    }

    // Default: look for a field named "id"
    fields
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| *ident == "id")
        .cloned()
        .ok_or_else(|| {
            syn::Error::new_spanned(
                &input.ident,
                "Record derive: no field marked with #[record(key)] and no field named `id`",
            )
        })
}
