#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use url::form_urlencoded;

use petclinic_api::config::ServerConfig;
use petclinic_api::router::build_app_router;
use petclinic_api::state::AppState;
use petclinic_db::memory::InMemoryClinic;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        database_url: None,
    }
}

/// Build the full application router over the given in-memory store.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack.
pub fn build_test_app(store: Arc<InMemoryClinic>) -> Router {
    let config = test_config();
    let state = AppState::in_memory(store, config.clone());
    build_app_router(state, &config).expect("test CORS origin is valid")
}

/// An empty store.
pub fn empty_store() -> Arc<InMemoryClinic> {
    Arc::new(InMemoryClinic::new())
}

/// A store holding the sample clinic data (10 owners, 13 pets, 4 visits).
pub async fn sample_store() -> Arc<InMemoryClinic> {
    Arc::new(
        InMemoryClinic::with_sample_data()
            .await
            .expect("sample data loads"),
    )
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(app: Router, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
    let body = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();

    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect response.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .unwrap()
}

/// Form fields for a valid owner.
pub fn valid_owner_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("first_name", "Joe"),
        ("last_name", "Bloggs"),
        ("address", "123 Caramel Street"),
        ("city", "London"),
        ("telephone", "1316761638"),
    ]
}
