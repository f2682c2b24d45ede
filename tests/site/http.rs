//! Admin content API tests.
//!
//! Starts an axum server and exercises it with reqwest.

use content_store::{http, Site, StoreRegistry};
use serde_json::{json, Value};

use crate::support::open_site;

/// Bind to port 0 and return the actual address.
async fn start_server(registry: StoreRegistry) -> String {
    let app = http::router(registry);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn started() -> (Site, String, reqwest::Client) {
    let (_area, site) = open_site();
    let base = start_server(site.registry().clone()).await;
    (site, base, reqwest::Client::new())
}

#[tokio::test]
async fn health_lists_stores() {
    let (_site, base, client) = started().await;

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["stores"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn snapshot_and_record() {
    let (_site, base, client) = started().await;

    let resp = client.get(format!("{base}/content/services")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let services: Value = resp.json().await.unwrap();
    assert_eq!(services.as_array().unwrap().len(), 4);

    let resp = client
        .get(format!("{base}/content/services/seo"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let seo: Value = resp.json().await.unwrap();
    assert_eq!(seo["slug"], "seo");

    let resp = client
        .get(format!("{base}/content/services/nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client.get(format!("{base}/content/unknown")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn add_update_delete_reach_typed_store() {
    let (site, base, client) = started().await;

    let resp = client
        .post(format!("{base}/content/messages"))
        .json(&json!({ "name": "Hana", "email": "hana@example.com", "body": "Quote please" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(site.messages().get(&id).unwrap().name, "Hana");

    let resp = client
        .patch(format!("{base}/content/messages/{id}"))
        .json(&json!({ "read": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(site.messages().get(&id).unwrap().read);

    let resp = client
        .delete(format!("{base}/content/messages/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(site.messages().is_empty());

    // Deleting again is not an error.
    let resp = client
        .delete(format!("{base}/content/messages/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["deleted"], false);
}

#[tokio::test]
async fn duplicate_and_invalid_records() {
    let (_site, base, client) = started().await;

    let resp = client
        .post(format!("{base}/content/pricing-plans"))
        .json(&json!({ "id": "starter", "name": "Starter again", "price": 1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);

    let resp = client
        .post(format!("{base}/content/reviews"))
        .json(&json!({ "author": "Ivo", "rating": 9, "content": "Too good" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("rating"));

    let resp = client
        .patch(format!("{base}/content/reviews/review-1"))
        .json(&json!(["not", "an", "object"]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);

    let resp = client
        .patch(format!("{base}/content/reviews/missing"))
        .json(&json!({ "featured": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn singleton_merge_and_replace() {
    let (site, base, client) = started().await;

    let resp = client
        .patch(format!("{base}/content/site-settings"))
        .json(&json!({ "favicon": "/brand.ico" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let settings: Value = resp.json().await.unwrap();
    assert_eq!(settings["favicon"], "/brand.ico");
    assert!(settings["metaDescription"].as_str().is_some());
    assert_eq!(site.site_settings().get().favicon, "/brand.ico");

    let resp = client
        .post(format!("{base}/content/site-settings"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);
}

#[tokio::test]
async fn put_replaces_record() {
    let (site, base, client) = started().await;
    let mut app = serde_json::to_value(site.apps().get("seo-audit").unwrap()).unwrap();
    app["name"] = json!("Site Audit");

    let resp = client
        .put(format!("{base}/content/apps/seo-audit"))
        .json(&app)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(site.apps().get("seo-audit").unwrap().name, "Site Audit");
}
