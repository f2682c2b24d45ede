use std::thread;
use std::time::Duration;

use content_store::config::DEFAULT_SYNC_INTERVAL;
use content_store::site::seed::PUBLIC_PAGES;
use content_store::site::{Service, SiteSettings};
use content_store::{
    CollectionStore, ContentConfig, Singleton, Site, StorageArea, StoreError, StoreKind,
};
use tempfile::TempDir;

use crate::support::open_site;

#[test]
fn empty_storage_seeds_four_services() {
    let (area, site) = open_site();

    let slugs: Vec<String> = site.services().all().into_iter().map(|s| s.slug).collect();
    assert_eq!(slugs, vec!["seo", "ppc", "social-media", "web-design"]);

    let raw = area.backend().get_item("services").unwrap().unwrap();
    let stored: Vec<Service> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored, site.services().all());
}

#[test]
fn every_store_is_registered_and_ready() {
    let (_area, site) = open_site();
    let registry = site.registry();

    assert_eq!(
        registry.keys(),
        vec![
            "services",
            "case-studies",
            "apps",
            "reviews",
            "pricing-plans",
            "messages",
            "users",
            "articles",
            "page-seo",
            "site-settings",
            "contact-settings",
            "home-content",
        ]
    );
    for key in registry.keys() {
        assert!(registry.get(key).unwrap().is_ready(), "{} not ready", key);
    }
    assert_eq!(registry.get("site-settings").unwrap().kind(), StoreKind::Singleton);
    assert_eq!(registry.get("apps").unwrap().kind(), StoreKind::Collection);
}

#[test]
fn seeded_counts() {
    let (_area, site) = open_site();
    assert_eq!(site.case_studies().len(), 3);
    assert_eq!(site.apps().len(), 3);
    assert_eq!(site.reviews().len(), 3);
    assert_eq!(site.pricing_plans().len(), 3);
    assert_eq!(site.users().len(), 1);
    assert!(site.messages().is_empty());
    assert!(site.articles().is_empty());
    assert_eq!(site.page_seo().len(), PUBLIC_PAGES.len());
}

#[test]
fn site_settings_merge_stored_favicon_with_defaults() {
    let area = StorageArea::in_memory();
    area.backend()
        .set_item("site-settings", r#"{"favicon":"/x.ico"}"#)
        .unwrap();

    let site = Site::open(&area.open_context()).unwrap();
    let settings = site.site_settings().get();

    assert_eq!(settings.favicon, "/x.ico");
    assert_eq!(settings.meta_description, SiteSettings::default_value().meta_description);
    assert_eq!(settings.site_name, SiteSettings::default_value().site_name);
}

#[test]
fn registering_an_owned_key_fails() {
    let (area, site) = open_site();
    let err = site
        .registry()
        .register(CollectionStore::<Service>::new(&area.open_context()))
        .unwrap_err();
    assert_eq!(err, StoreError::KeyTaken("services".into()));
}

#[test]
fn second_site_on_same_area_reads_same_content() {
    let (area, first) = open_site();
    let second = Site::open(&area.open_context()).unwrap();

    assert_eq!(second.services().all(), first.services().all());
    assert_eq!(second.reviews().all(), first.reviews().all());
    assert_eq!(second.site_settings().get(), first.site_settings().get());
}

#[test]
fn from_config_uses_file_backend() {
    let dir = TempDir::new().unwrap();
    let config = ContentConfig::file(dir.path().join("site.json"))
        .unlimited()
        .with_sync_interval(Duration::from_millis(10));

    {
        let site = Site::from_config(&config).unwrap();
        site.services().delete("ppc");
    }

    let site = Site::from_config(&config).unwrap();
    assert_eq!(site.services().len(), 3);
    assert!(site.services().get("ppc").is_none());
}

#[test]
fn configured_interval_drives_background_sync() {
    let config = ContentConfig::memory().with_sync_interval(Duration::from_millis(10));
    let site = Site::from_config(&config).unwrap();
    assert_eq!(site.sync_interval(), Duration::from_millis(10));

    let sync = site.start_sync();
    let other = Site::open(&site.context().area().open_context()).unwrap();
    other.services().delete("web-design");

    let mut converged = false;
    for _ in 0..200 {
        if !site.services().contains_key("web-design") {
            converged = true;
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }
    let stats = sync.stop();

    assert!(converged);
    assert!(stats.rehydrations >= 1);
}

#[test]
fn open_uses_default_sync_interval() {
    let (_area, site) = open_site();
    assert_eq!(site.sync_interval(), DEFAULT_SYNC_INTERVAL);
}

#[test]
fn dropping_the_site_detaches_every_store() {
    let area = StorageArea::in_memory();
    let site = Site::open(&area.open_context()).unwrap();
    assert_eq!(area.subscriber_count(), 12);

    drop(site);
    assert_eq!(area.subscriber_count(), 0);
}
