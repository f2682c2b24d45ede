use std::thread;
use std::time::Duration;

use content_store::site::Message;
use content_store::{Patch, Site};

use crate::support::open_site;

#[test]
fn tabs_converge_through_sync() {
    let (area, tab_a) = open_site();
    let tab_b = Site::open(&area.open_context()).unwrap();

    tab_a
        .messages()
        .add(Message::new("Gus", "gus@example.com", "Hello"))
        .unwrap();
    tab_a
        .site_settings()
        .update(&Patch::new().set("favicon", "/new.ico"));

    assert!(tab_b.messages().is_empty());
    assert_eq!(tab_b.sync(), 2);
    assert_eq!(tab_b.messages().all(), tab_a.messages().all());
    assert_eq!(tab_b.site_settings().get().favicon, "/new.ico");
    assert_eq!(tab_b.sync(), 0);
}

#[test]
fn background_sync_thread() {
    let (area, tab_a) = open_site();
    let tab_b = Site::open(&area.open_context()).unwrap();
    let sync = tab_b.spawn_sync(Duration::from_millis(5));

    tab_a.services().delete("seo");

    let mut converged = false;
    for _ in 0..200 {
        if !tab_b.services().contains_key("seo") {
            converged = true;
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }
    let stats = sync.stop();

    assert!(converged);
    assert_eq!(stats.rehydrations, 1);
}
