use content_store::{CollectionStore, Patch, Record, StorageArea, StoreError};

use crate::support::{init_tracing, product, Product, Ticket};

#[test]
fn derived_record_attributes() {
    assert_eq!(<Product as Record>::STORAGE_KEY, "products");
    assert_eq!(<Ticket as Record>::STORAGE_KEY, "tickets");
    assert_eq!(product("x", "X", 1).key(), "x");
}

#[test]
fn first_hydrate_seeds_and_fresh_instance_reads_same() {
    init_tracing();
    let area = StorageArea::in_memory();

    let first = CollectionStore::<Product>::open(&area.open_context());
    assert_eq!(first.all(), Product::defaults());

    let second = CollectionStore::<Product>::open(&area.open_context());
    assert_eq!(second.all(), first.all());
}

#[test]
fn add_then_get() {
    let area = StorageArea::in_memory();
    let store = CollectionStore::<Product>::open(&area.open_context());

    let record = product("p-9", "Gizmo", 99);
    store.add(record.clone()).unwrap();

    assert_eq!(store.get("p-9"), Some(record));
    assert!(store.contains_key("p-9"));
    assert_eq!(store.all()[0].sku, "p-9");
}

#[test]
fn add_prepends_to_stored_sequence() {
    let area = StorageArea::in_memory();
    area.backend()
        .set_item("products", r#"[{"sku":"a","name":"A","unitPrice":1}]"#)
        .unwrap();
    let store = CollectionStore::<Product>::open(&area.open_context());

    store.add(product("b", "B", 2)).unwrap();

    assert_eq!(store.all(), vec![product("b", "B", 2), product("a", "A", 1)]);
    let raw = area.backend().get_item("products").unwrap().unwrap();
    let persisted: Vec<Product> = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, store.all());
}

#[test]
fn delete_twice_is_noop() {
    let area = StorageArea::in_memory();
    let store = CollectionStore::<Product>::open(&area.open_context());

    assert!(store.delete("p-1"));
    assert_eq!(store.get("p-1"), None);
    assert!(!store.delete("p-1"));
    assert_eq!(store.len(), 1);
}

#[test]
fn find_filters_in_order() {
    let area = StorageArea::in_memory();
    let store = CollectionStore::<Product>::open(&area.open_context());
    store.add(product("p-3", "Doohickey", 30)).unwrap();

    let pricey: Vec<String> = store
        .find(|p| p.unit_price >= 25)
        .into_iter()
        .map(|p| p.sku)
        .collect();
    assert_eq!(pricey, vec!["p-3", "p-2"]);
}

#[test]
fn merge_update_keeps_unpatched_fields() {
    let area = StorageArea::in_memory();
    let store = CollectionStore::<Ticket>::open(&area.open_context());
    store.add(Ticket::new("t-1", "Broken link", 2)).unwrap();

    assert!(store.update("t-1", &Patch::new().set("open", false)));

    let ticket = store.get("t-1").unwrap();
    assert!(!ticket.open);
    assert_eq!(ticket.title, "Broken link");
    assert_eq!(ticket.priority, 2);
}

#[test]
fn replace_update_needs_whole_record() {
    let area = StorageArea::in_memory();
    let store = CollectionStore::<Product>::open(&area.open_context());

    let partial = Patch::new().set("name", "Renamed");
    assert!(!store.update("p-1", &partial));
    assert_eq!(store.get("p-1").unwrap().name, "Widget");

    let whole = Patch::from_serialize(&product("p-1", "Renamed", 11)).unwrap();
    assert!(store.update("p-1", &whole));
    assert_eq!(store.get("p-1"), Some(product("p-1", "Renamed", 11)));
}

#[test]
fn typed_replace_ignores_update_mode() {
    let area = StorageArea::in_memory();
    let store = CollectionStore::<Ticket>::open(&area.open_context());
    store.add(Ticket::new("t-1", "Old", 1)).unwrap();

    assert!(store.replace("t-1", Ticket::new("t-1", "New", 3)));
    assert_eq!(store.get("t-1"), Some(Ticket::new("t-1", "New", 3)));
    assert!(!store.replace("t-404", Ticket::new("t-404", "Ghost", 1)));
}

#[test]
fn reject_policy_refuses_duplicates() {
    let area = StorageArea::in_memory();
    let store = CollectionStore::<Ticket>::open(&area.open_context());
    store.add(Ticket::new("t-1", "First", 1)).unwrap();

    let err = store.add(Ticket::new("t-1", "Second", 1)).unwrap_err();
    assert_eq!(
        err,
        StoreError::DuplicateKey {
            storage_key: "tickets".into(),
            key: "t-1".into()
        }
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn invalid_record_is_refused() {
    let area = StorageArea::in_memory();
    let store = CollectionStore::<Ticket>::open(&area.open_context());

    let err = store.add(Ticket::new("t-1", "Urgent", 9)).unwrap_err();
    assert!(matches!(err, StoreError::InvalidRecord { .. }));
    assert!(store.is_empty());
}

#[test]
fn schema_mismatch_falls_back_to_defaults() {
    init_tracing();
    let area = StorageArea::in_memory();
    area.backend()
        .set_item("products", r#"[{"sku":"a","name":"A","unitPrice":"cheap"}]"#)
        .unwrap();

    let store = CollectionStore::<Product>::open(&area.open_context());
    assert_eq!(store.all(), Product::defaults());
}

#[test]
fn rehydrate_after_mutation_reproduces_state() {
    let area = StorageArea::in_memory();
    let context = area.open_context();
    let store = CollectionStore::<Product>::open(&context);
    store.add(product("p-3", "Doohickey", 30)).unwrap();
    store.delete_many(["p-1"]);

    let expected = store.all();
    store.hydrate();
    assert_eq!(store.all(), expected);

    let reopened = CollectionStore::<Product>::open(&context);
    assert_eq!(reopened.all(), expected);
}
