//! Shared test helpers for E2E and property tests.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use halflife_core::{Isotope, IsotopeCatalog};
use halflife_dashboard_lib::view::{Dashboard, RenderSettings};
use halflife_dashboard_lib::{routes, AppState, DashboardConfig};

/// Small fixed catalog: two short-lived, two long-lived isotopes.
pub fn test_catalog() -> IsotopeCatalog {
    IsotopeCatalog::from_isotopes(vec![
        Isotope::new("Iodine-131", 0.02196),
        Isotope::new("Cobalt-60", 5.2714),
        Isotope::new("Lead-202", 52_500.0),
        Isotope::new("Plutonium-239", 24_110.0),
    ])
    .unwrap()
}

/// Router over [`test_catalog`] with default settings and selection.
pub fn test_app() -> Router {
    let dashboard = Dashboard::new(
        test_catalog(),
        RenderSettings::default(),
        vec!["Lead-202".into(), "Plutonium-239".into()],
    )
    .unwrap();
    routes::router(AppState::new(dashboard))
}

/// Router built the way the dashboard binary builds it.
pub fn app_from_config(config: &DashboardConfig) -> Router {
    routes::router(AppState::from_config(config).unwrap())
}

/// Issue a request and decode the JSON response body.
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

/// Extract a JSON array of numbers.
pub fn floats(v: &Value) -> Vec<f64> {
    v.as_array().unwrap().iter().map(|x| x.as_f64().unwrap()).collect()
}
