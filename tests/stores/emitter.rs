use std::sync::mpsc;
use std::time::Duration;

use content_store::{CollectionStore, Patch, SingletonStore, StorageArea};

use crate::support::{product, Product, ShopSettings};

#[test]
fn on_change_fires_after_mutations() {
    let area = StorageArea::in_memory();
    let products = CollectionStore::<Product>::open(&area.open_context());

    let (tx, rx) = mpsc::channel::<String>();
    products.on_change(move |key: String| {
        let _ = tx.send(key);
    });

    products.add(product("p-3", "Doohickey", 30)).unwrap();
    products.delete("p-3");

    // Listeners run on their own threads.
    for _ in 0..2 {
        let key = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(key, "products");
    }
    assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
}

#[test]
fn no_event_for_noop_delete() {
    let area = StorageArea::in_memory();
    let products = CollectionStore::<Product>::open(&area.open_context());

    let (tx, rx) = mpsc::channel::<String>();
    products.on_change(move |key: String| {
        let _ = tx.send(key);
    });

    assert!(!products.delete("missing"));
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn on_change_fires_on_singleton_update() {
    let area = StorageArea::in_memory();
    let settings = SingletonStore::<ShopSettings>::open(&area.open_context());

    let (tx, rx) = mpsc::channel::<String>();
    settings.on_change(move |key: String| {
        let _ = tx.send(key);
    });

    settings.update(&Patch::new().set("currency", "USD"));

    let key = rx.recv_timeout(Duration::from_secs(1)).unwrap();
    assert_eq!(key, "shop-settings");
}
