use content_store::{Site, StorageArea};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// A fresh in-memory area and a site opened on one context of it.
pub fn open_site() -> (StorageArea, Site) {
    init_tracing();
    let area = StorageArea::in_memory();
    let site = Site::open(&area.open_context()).unwrap();
    (area, site)
}
