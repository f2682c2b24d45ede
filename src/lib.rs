// Derive macros expand to `content_store::...` paths, including inside this crate.
extern crate self as content_store;

pub mod config;
mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod registry;
pub mod site;
pub mod storage;
mod store;
pub mod sync;

pub use config::{Backend, ConfigError, ContentConfig};
pub use error::{StorageError, StoreError};
pub use registry::{ManagedStore, StoreKind, StoreRegistry};
pub use site::Site;
pub use storage::{
    BrowsingContext, BundleError, ContentBundle, ContextId, FileStorage, MemoryStorage, Storage,
    StorageArea, StorageEvent, Subscription,
};
pub use store::{
    shallow_merge, CollectionStore, DuplicatePolicy, Patch, PatchError, Record, Singleton,
    SingletonStore, UpdateMode,
};
pub use sync::{SyncListener, SyncStats, SyncThread};

// Derive macros share their trait's name, as `serde::Serialize` does.
pub use content_store_macros::{Record, Singleton};
