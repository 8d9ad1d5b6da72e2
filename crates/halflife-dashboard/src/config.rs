//! Dashboard configuration.
//!
//! Provides [`DashboardConfig`] with built-in defaults, an environment
//! overlay ([`DashboardConfig::from_env`]) and helpers that turn the
//! configuration into a ready [`Dashboard`]. The dashboard binary applies
//! its command-line flags on top.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use halflife_core::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_INITIAL_NUCLEI, DEFAULT_MAX_HALF_LIVES, DEFAULT_SAMPLE_COUNT,
    DEFAULT_SELECTION,
};
use halflife_core::IsotopeCatalog;

use crate::view::{Dashboard, RenderSettings};

/// Configuration for a dashboard instance.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Socket address for the HTTP server.
    pub bind_addr: String,
    /// Semicolon-delimited isotope table; the built-in table when `None`.
    pub isotopes_file: Option<PathBuf>,
    /// Nuclei at `t = 0` for every curve.
    pub initial_nuclei: f64,
    /// Number of half-lives each curve spans.
    pub max_half_lives: f64,
    /// Points per curve.
    pub sample_count: usize,
    /// Isotopes selected when the page loads.
    pub default_selection: Vec<String>,
    /// Log level filter string (e.g. "info", "debug", "halflife_dashboard_lib=trace").
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            isotopes_file: None,
            initial_nuclei: DEFAULT_INITIAL_NUCLEI,
            max_half_lives: DEFAULT_MAX_HALF_LIVES,
            sample_count: DEFAULT_SAMPLE_COUNT,
            default_selection: DEFAULT_SELECTION.iter().map(|s| s.to_string()).collect(),
            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from `HALFLIFE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup` on the defaults.
    ///
    /// Recognised keys: `HALFLIFE_BIND_ADDR`, `HALFLIFE_ISOTOPES_FILE`,
    /// `HALFLIFE_INITIAL_NUCLEI`, `HALFLIFE_MAX_HALF_LIVES`,
    /// `HALFLIFE_SAMPLE_COUNT`, `HALFLIFE_DEFAULT_SELECTION` (comma-separated),
    /// `HALFLIFE_LOG_LEVEL`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(v) = lookup("HALFLIFE_BIND_ADDR") {
            cfg.bind_addr = v;
        }
        if let Some(v) = lookup("HALFLIFE_ISOTOPES_FILE") {
            cfg.isotopes_file = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("HALFLIFE_INITIAL_NUCLEI") {
            cfg.initial_nuclei = v
                .trim()
                .parse()
                .context("HALFLIFE_INITIAL_NUCLEI must be a number")?;
        }
        if let Some(v) = lookup("HALFLIFE_MAX_HALF_LIVES") {
            cfg.max_half_lives = v
                .trim()
                .parse()
                .context("HALFLIFE_MAX_HALF_LIVES must be a number")?;
        }
        if let Some(v) = lookup("HALFLIFE_SAMPLE_COUNT") {
            cfg.sample_count = v
                .trim()
                .parse()
                .context("HALFLIFE_SAMPLE_COUNT must be a positive integer")?;
        }
        if let Some(v) = lookup("HALFLIFE_DEFAULT_SELECTION") {
            cfg.default_selection = split_names(&v);
        }
        if let Some(v) = lookup("HALFLIFE_LOG_LEVEL") {
            cfg.log_level = v;
        }

        Ok(cfg)
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            initial_nuclei: self.initial_nuclei,
            max_half_lives: self.max_half_lives,
            sample_count: self.sample_count,
        }
    }

    /// Load the configured isotope table, or the built-in one.
    pub fn load_catalog(&self) -> Result<IsotopeCatalog> {
        let path = self.isotopes_file.as_deref();
        IsotopeCatalog::load_or_builtin(path).with_context(|| match path {
            Some(path) => format!("Failed to load isotope table {}", path.display()),
            None => "Built-in isotope table is invalid".to_string(),
        })
    }

    /// Load the catalog and build the dashboard it describes.
    pub fn build_dashboard(&self) -> Result<Dashboard> {
        let catalog = self.load_catalog()?;
        info!(isotopes = catalog.len(), "isotope catalog ready");
        Dashboard::new(catalog, self.render_settings(), self.default_selection.clone())
            .context("Invalid dashboard configuration")
    }
}

/// Split a comma-separated list of isotope names, dropping empty entries.
pub fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
