mod record;
mod singleton;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Record)]
// ============================================================================

/// Derive macro implementing `content_store::Record` for a collection record.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(storage_key = "services", update = "merge", duplicates = "reject")]
/// #[record(defaults = "seed::services", validate = "Service::check")]
/// pub struct Service {
///     #[record(key)]
///     pub slug: String,
///     pub title: String,
/// }
/// ```
///
/// - `storage_key = "..."` names the storage key the collection lives under.
///   If omitted, defaults to the kebab-case struct name + "s".
/// - `update = "replace" | "merge"` picks the update semantics (default `replace`).
/// - `duplicates = "allow" | "reject"` picks the duplicate-key policy on add
///   (default `allow`).
/// - `defaults = "path"` names a `fn() -> Vec<Self>` supplying the seed data.
/// - `validate = "path"` names a `fn(&Self) -> Result<(), String>`.
/// - `on_create = "path"` names a `fn(&mut Self)` that fills generated fields
///   of newly submitted records.
/// - `#[record(key)]` marks the key field. If omitted, a field named `id` is used.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}

// ============================================================================
// #[derive(Singleton)]
// ============================================================================

/// Derive macro implementing `content_store::Singleton` for a singleton record.
///
/// ```ignore
/// #[derive(Clone, Default, Serialize, Deserialize, Singleton)]
/// #[singleton(storage_key = "site-settings")]
/// pub struct SiteSettings {
///     pub favicon: String,
/// }
/// ```
///
/// - `storage_key = "..."`: defaults to the kebab-case struct name.
/// - `default = "path"`: a `fn() -> Self` for the seed value. Without it the
///   type's `Default` impl is used.
/// - `validate = "path"`: a `fn(&Self) -> Result<(), String>`.
#[proc_macro_derive(Singleton, attributes(singleton))]
pub fn derive_singleton(input: TokenStream) -> TokenStream {
    singleton::derive_singleton(input)
}

/// Convert `CaseStudy` into `case-study`.
pub(crate) fn to_kebab_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('-');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
