//! Shared application state and the HTTP server loop.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::DashboardConfig;
use crate::routes;
use crate::view::Dashboard;

/// Shared application state passed to every Axum handler.
///
/// Read-only after startup; handlers never lock anything.
#[derive(Clone, Debug)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard: Arc::new(dashboard) }
    }

    /// Load the catalog named by `config` and build the state around it.
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        Ok(Self::new(config.build_dashboard()?))
    }
}

/// Serve the dashboard on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!("Dashboard listening on http://{addr}");

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")
}
