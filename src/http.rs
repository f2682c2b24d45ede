//! Admin content API - the store registry as JSON over HTTP.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health` - `{ "ok": true, "stores": [...] }`.
//! - `GET /content/:store` - the whole collection or singleton.
//! - `POST /content/:store` - add a collection record (201).
//! - `PATCH /content/:store` - merge fields into a singleton.
//! - `GET /content/:store/:key` - one collection record.
//! - `PATCH /content/:store/:key` - update a record per its update mode.
//! - `PUT /content/:store/:key` - replace a record.
//! - `DELETE /content/:store/:key` - delete a record; idempotent.
//!
//! Errors are `{ "error": "..." }` with the status from
//! `StoreError::status_code`.
//!
//! ## Example
//!
//! ```ignore
//! let site = Site::open(&area.open_context())?;
//!
//! // Compose with other axum routes
//! let app = content_store::http::router(site.registry().clone());
//!
//! // Or serve directly
//! content_store::http::serve(site.registry().clone(), "0.0.0.0:3000").await?;
//! ```

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::StoreError;
use crate::registry::StoreRegistry;
use crate::store::Patch;

/// Build an axum `Router` over the given registry.
pub fn router(registry: StoreRegistry) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/content/:store",
            get(snapshot_handler).post(add_handler).patch(merge_handler),
        )
        .route(
            "/content/:store/:key",
            get(record_handler)
                .patch(update_handler)
                .put(replace_handler)
                .delete(delete_handler),
        )
        .with_state(registry)
}

/// Serve the registry over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve(registry: StoreRegistry, addr: &str) -> Result<(), std::io::Error> {
    let app = router(registry);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr, "serving content api");
    axum::serve(listener, app).await
}

fn error_response(err: StoreError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

fn not_found(store: &str, key: &str) -> Response {
    let body = json!({ "error": format!("no record {} in {}", key, store) });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

fn patch_from(store: &str, body: Value) -> Result<Patch, StoreError> {
    Patch::try_from(body).map_err(|e| StoreError::invalid(store, e.to_string()))
}

async fn health_handler(State(registry): State<StoreRegistry>) -> impl IntoResponse {
    Json(json!({ "ok": true, "stores": registry.keys() }))
}

async fn snapshot_handler(
    State(registry): State<StoreRegistry>,
    Path(store): Path<String>,
) -> Response {
    match registry.require(&store).and_then(|s| s.snapshot()) {
        Ok(value) => Json(value).into_response(),
        Err(e) => error_response(e),
    }
}

async fn add_handler(
    State(registry): State<StoreRegistry>,
    Path(store): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    match registry.require(&store).and_then(|s| s.add_value(body)) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn merge_handler(
    State(registry): State<StoreRegistry>,
    Path(store): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let result = registry.require(&store).and_then(|s| {
        s.update_value(None, &patch_from(&store, body)?)?;
        s.snapshot()
    });
    match result {
        Ok(value) => Json(value).into_response(),
        Err(e) => error_response(e),
    }
}

async fn record_handler(
    State(registry): State<StoreRegistry>,
    Path((store, key)): Path<(String, String)>,
) -> Response {
    match registry.require(&store).and_then(|s| s.record(&key)) {
        Ok(Some(record)) => Json(record).into_response(),
        Ok(None) => not_found(&store, &key),
        Err(e) => error_response(e),
    }
}

async fn update_handler(
    State(registry): State<StoreRegistry>,
    Path((store, key)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let result = registry
        .require(&store)
        .and_then(|s| s.update_value(Some(&key), &patch_from(&store, body)?));
    match result {
        Ok(true) => Json(json!({ "updated": true })).into_response(),
        Ok(false) => not_found(&store, &key),
        Err(e) => error_response(e),
    }
}

async fn replace_handler(
    State(registry): State<StoreRegistry>,
    Path((store, key)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    match registry.require(&store).and_then(|s| s.replace_value(Some(&key), body)) {
        Ok(true) => Json(json!({ "updated": true })).into_response(),
        Ok(false) => not_found(&store, &key),
        Err(e) => error_response(e),
    }
}

async fn delete_handler(
    State(registry): State<StoreRegistry>,
    Path((store, key)): Path<(String, String)>,
) -> Response {
    match registry.require(&store).and_then(|s| s.delete_key(&key)) {
        Ok(deleted) => Json(json!({ "deleted": deleted })).into_response(),
        Err(e) => error_response(e),
    }
}
