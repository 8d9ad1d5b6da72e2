//! halflife-dashboard — interactive radioactive decay dashboard.
//!
//! Serves a single page at `/` where isotopes are picked from a multi-select;
//! every change redraws the table and the decay chart from `/api/render`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use halflife_dashboard_lib::config::split_names;
use halflife_dashboard_lib::{serve, AppState, DashboardConfig};
use tracing::info;

/// Radioactive decay curves for catalogued isotopes.
#[derive(Parser, Debug)]
#[command(
    name = "halflife-dashboard",
    version,
    about = "Interactive radioactive decay dashboard"
)]
struct Args {
    /// HTTP bind address [env: HALFLIFE_BIND_ADDR, default: 127.0.0.1:8888]
    #[arg(long)]
    bind: Option<String>,

    /// Semicolon-delimited isotope table (built-in table when omitted)
    #[arg(long)]
    isotopes_file: Option<PathBuf>,

    /// Nuclei at t = 0
    #[arg(long)]
    initial_nuclei: Option<f64>,

    /// Number of half-lives each curve spans
    #[arg(long)]
    max_half_lives: Option<f64>,

    /// Points per curve
    #[arg(long)]
    samples: Option<usize>,

    /// Isotopes selected on page load (comma-separated)
    #[arg(long)]
    select: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format ("text" or "json")
    #[arg(long, default_value = "text")]
    log_format: String,
}

impl Args {
    /// Apply the flags that were given on top of `config`.
    fn apply(self, mut config: DashboardConfig) -> (DashboardConfig, String) {
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(path) = self.isotopes_file {
            config.isotopes_file = Some(path);
        }
        if let Some(n) = self.initial_nuclei {
            config.initial_nuclei = n;
        }
        if let Some(k) = self.max_half_lives {
            config.max_half_lives = k;
        }
        if let Some(s) = self.samples {
            config.sample_count = s;
        }
        if let Some(list) = self.select {
            config.default_selection = split_names(&list);
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        (config, self.log_format)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env_config = DashboardConfig::from_env().context("Failed to read HALFLIFE_* environment")?;
    let (config, log_format) = args.apply(env_config);

    init_logging(&config.log_level, &log_format);

    info!(
        bind = %config.bind_addr,
        isotopes_file = ?config.isotopes_file,
        initial_nuclei = config.initial_nuclei,
        max_half_lives = config.max_half_lives,
        samples = config.sample_count,
        "Starting halflife-dashboard v{}",
        env!("CARGO_PKG_VERSION")
    );

    let state = AppState::from_config(&config)?;
    info!(default_selection = ?state.dashboard.default_selection(), "Dashboard ready");

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    serve(listener, state, shutdown_signal()).await?;
    info!("halflife-dashboard shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down...");
    }
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Pass `format = "json"` for structured JSON output. Any other value
/// defaults to human-readable text.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true))
            .init();
    }
}
