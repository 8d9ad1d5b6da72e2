//! Axum router and HTTP handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use halflife_core::constants::{
    DEFAULT_INITIAL_NUCLEI, DEFAULT_MAX_HALF_LIVES, DEFAULT_SAMPLE_COUNT, MAX_SAMPLE_COUNT,
};
use halflife_core::error::DecayError;
use halflife_core::types::Isotope;

use crate::config::split_names;
use crate::server::AppState;
use crate::view::{RenderSettings, RenderState};

// Embed the web UI at compile time.
const INDEX_HTML: &str = include_str!("static/index.html");

// ── Error helper ─────────────────────────────────────────────────────────────

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl From<DecayError> for ApiError {
    fn from(e: DecayError) -> Self {
        Self::bad_request(e.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::bad_request(e.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::bad_request(e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(status = %self.status, error = %self.message, "request rejected");
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

// ── Router ───────────────────────────────────────────────────────────────────

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(web_ui))
        .route("/api/isotopes", get(isotopes))
        .route("/api/render", get(render))
        .route("/api/selection", post(selection_changed))
        .route("/api/decay", get(decay))
        .layer(cors)
        .with_state(state)
}

/// Serve the embedded web UI.
async fn web_ui() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// ── /api/isotopes ────────────────────────────────────────────────────────────

async fn isotopes(State(s): State<AppState>) -> Json<Vec<Isotope>> {
    Json(s.dashboard.catalog().isotopes().to_vec())
}

// ── /api/render?isotopes=a,b ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RenderQuery {
    /// Comma-separated names. Absent means the default selection.
    isotopes: Option<String>,
    n0: Option<f64>,
    max_half_lives: Option<f64>,
    samples: Option<usize>,
}

async fn render(
    State(s): State<AppState>,
    query: Result<Query<RenderQuery>, QueryRejection>,
) -> ApiResult<RenderState> {
    let Query(q) = query?;
    let settings = overridden(&s, q.n0, q.max_half_lives, q.samples)?;
    let names = match &q.isotopes {
        Some(list) => split_names(list),
        None => s.dashboard.default_selection().to_vec(),
    };
    Ok(Json(s.dashboard.render(&names, &settings)?))
}

// ── POST /api/selection ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SelectionRequest {
    isotopes: Vec<String>,
    n0: Option<f64>,
    max_half_lives: Option<f64>,
    samples: Option<usize>,
}

async fn selection_changed(
    State(s): State<AppState>,
    body: Result<Json<SelectionRequest>, JsonRejection>,
) -> ApiResult<RenderState> {
    let Json(req) = body?;
    info!(isotopes = ?req.isotopes, "selection changed");
    let settings = overridden(&s, req.n0, req.max_half_lives, req.samples)?;
    Ok(Json(s.dashboard.render(&req.isotopes, &settings)?))
}

// ── /api/decay?half_life=..&n0=.. ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct DecayQuery {
    half_life: f64,
    n0: Option<f64>,
    max_half_lives: Option<f64>,
    samples: Option<usize>,
}

#[derive(Debug, Serialize)]
struct DecayResponse {
    half_life: f64,
    n0: f64,
    max_half_lives: f64,
    sample_count: usize,
    times: Vec<f64>,
    quantities: Vec<f64>,
}

async fn decay(query: Result<Query<DecayQuery>, QueryRejection>) -> ApiResult<DecayResponse> {
    let Query(q) = query?;
    let n0 = q.n0.unwrap_or(DEFAULT_INITIAL_NUCLEI);
    let max_half_lives = q.max_half_lives.unwrap_or(DEFAULT_MAX_HALF_LIVES);
    let sample_count = capped_samples(q.samples.unwrap_or(DEFAULT_SAMPLE_COUNT))?;

    let series = halflife_decay::compute_decay(q.half_life, n0, max_half_lives, sample_count)?;
    let (times, quantities) = series.into_columns();

    Ok(Json(DecayResponse {
        half_life: q.half_life,
        n0,
        max_half_lives,
        sample_count,
        times,
        quantities,
    }))
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn capped_samples(samples: usize) -> Result<usize, ApiError> {
    if samples > MAX_SAMPLE_COUNT {
        return Err(ApiError::bad_request(format!(
            "samples must be at most {MAX_SAMPLE_COUNT}, got {samples}"
        )));
    }
    Ok(samples)
}

fn overridden(
    s: &AppState,
    n0: Option<f64>,
    max_half_lives: Option<f64>,
    samples: Option<usize>,
) -> Result<RenderSettings, ApiError> {
    let samples = samples.map(capped_samples).transpose()?;
    Ok(s.dashboard.settings().with_overrides(n0, max_half_lives, samples))
}
