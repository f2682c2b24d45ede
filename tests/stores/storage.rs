use content_store::{
    CollectionStore, FileStorage, MemoryStorage, Patch, Record, SingletonStore, Storage, StorageArea,
    StorageError,
};
use tempfile::TempDir;

use crate::support::{init_tracing, product, Product, ShopSettings};

#[test]
fn disabled_storage_still_serves_defaults() {
    init_tracing();
    let area = StorageArea::new(MemoryStorage::disabled());
    let context = area.open_context();

    let products = CollectionStore::<Product>::open(&context);
    assert!(products.is_ready());
    assert_eq!(products.all(), Product::defaults());

    products.add(product("p-3", "Doohickey", 30)).unwrap();
    assert_eq!(products.len(), 3);

    let settings = SingletonStore::<ShopSettings>::open(&context);
    settings.update(&Patch::new().set("currency", "GBP"));
    assert_eq!(settings.get().currency, "GBP");
}

#[test]
fn quota_failure_keeps_memory_state_but_not_storage() {
    init_tracing();
    let area = StorageArea::new(MemoryStorage::with_quota(256));
    let context = area.open_context();
    let products = CollectionStore::<Product>::open(&context);
    let before = products.all();

    products.add(product("p-big", &"x".repeat(512), 1)).unwrap();
    assert_eq!(products.len(), 3);

    // A reload shows the last state that fit.
    let reloaded = CollectionStore::<Product>::open(&area.open_context());
    assert_eq!(reloaded.all(), before);
}

#[test]
fn quota_error_reports_sizes() {
    let storage = MemoryStorage::with_quota(8);
    match storage.set_item("key", "far too long") {
        Err(StorageError::QuotaExceeded { key, quota, .. }) => {
            assert_eq!(key, "key");
            assert_eq!(quota, 8);
        }
        other => panic!("expected quota error, got {:?}", other),
    }
}

#[test]
fn file_storage_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("content.json");

    {
        let area = StorageArea::new(FileStorage::open(&path).unwrap());
        let products = CollectionStore::<Product>::open(&area.open_context());
        products.add(product("p-3", "Doohickey", 30)).unwrap();
    }

    let area = StorageArea::new(FileStorage::open(&path).unwrap());
    let products = CollectionStore::<Product>::open(&area.open_context());
    assert_eq!(products.get("p-3"), Some(product("p-3", "Doohickey", 30)));
    assert_eq!(products.len(), 3);
}
