//! # halflife-dashboard — Isotope decay dashboard.
//!
//! Composes the catalog and the decay engine into a small web application:
//! - [`view::Dashboard`] — selection-changed handler producing a [`view::RenderState`]
//! - [`routes`] — axum router serving the page and the JSON API
//! - [`server`] — shared state and the HTTP server loop
//! - [`config::DashboardConfig`] — dashboard configuration

pub mod config;
pub mod routes;
pub mod server;
pub mod view;

pub use config::DashboardConfig;
pub use server::{serve, AppState};
pub use view::{Dashboard, RenderSettings, RenderState, SelectionChanged};
