use content_store::{CollectionStore, ContentBundle, SingletonStore, StorageArea};

use crate::support::{product, Product, ShopSettings};

#[test]
fn export_import_reproduces_every_key() {
    let source = StorageArea::in_memory();
    let context = source.open_context();
    let products = CollectionStore::<Product>::open(&context);
    products.add(product("p-3", "Doohickey", 30)).unwrap();
    SingletonStore::<ShopSettings>::open(&context);

    let token = source.export_bundle().unwrap().to_token().unwrap();
    let bundle = ContentBundle::from_token(&token).unwrap();
    assert_eq!(bundle.len(), 2);

    let target = StorageArea::in_memory();
    let written = target.open_context().import_bundle(&bundle).unwrap();
    assert_eq!(written, 2);

    for key in ["products", "shop-settings"] {
        assert_eq!(
            target.backend().get_item(key).unwrap(),
            source.backend().get_item(key).unwrap()
        );
    }
    let imported = CollectionStore::<Product>::open(&target.open_context());
    assert_eq!(imported.all(), products.all());
}

#[test]
fn import_notifies_open_stores() {
    let source = StorageArea::in_memory();
    let seeded = CollectionStore::<Product>::open(&source.open_context());
    seeded.delete("p-2");
    let bundle = source.export_bundle().unwrap();

    let target = StorageArea::in_memory();
    let open_tab = CollectionStore::<Product>::open(&target.open_context());
    assert_eq!(open_tab.len(), 2);

    target.open_context().import_bundle(&bundle).unwrap();
    assert!(open_tab.sync());
    assert_eq!(open_tab.all(), vec![product("p-1", "Widget", 10)]);
}

#[test]
fn garbage_token_is_rejected() {
    assert!(ContentBundle::from_token("%%% not base64 %%%").is_err());
}
