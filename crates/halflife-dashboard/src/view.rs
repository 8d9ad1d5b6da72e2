//! Render model for the dashboard.
//!
//! A [`SelectionChanged`] event goes in, a fresh [`RenderState`] (table rows
//! and chart traces) comes out. Nothing is cached between events; every
//! render recomputes the curves from the catalog.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use halflife_core::constants::{
    CHART_TITLE, DASHBOARD_TITLE, DEFAULT_INITIAL_NUCLEI, DEFAULT_MAX_HALF_LIVES,
    DEFAULT_SAMPLE_COUNT, NAME_COLUMN, QUANTITY_AXIS_TITLE, TIME_AXIS_TITLE,
};
use halflife_core::error::{DecayError, HalflifeError};
use halflife_core::traits::DecayCalculator;
use halflife_core::types::DecayParams;
use halflife_core::IsotopeCatalog;
use halflife_decay::DecayEngine;

/// Header of the half-life column in the rendered table.
pub const TABLE_HALF_LIFE_HEADER: &str = "Half-life (years)";

/// The reactive input: the user changed the set of selected isotopes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionChanged {
    pub isotopes: Vec<String>,
}

impl SelectionChanged {
    pub fn new<S: Into<String>>(isotopes: impl IntoIterator<Item = S>) -> Self {
        Self { isotopes: isotopes.into_iter().map(Into::into).collect() }
    }
}

/// Curve settings shared by every trace of a render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderSettings {
    /// Nuclei at `t = 0`.
    pub initial_nuclei: f64,
    /// Number of half-lives each curve spans.
    pub max_half_lives: f64,
    /// Points per curve.
    pub sample_count: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            initial_nuclei: DEFAULT_INITIAL_NUCLEI,
            max_half_lives: DEFAULT_MAX_HALF_LIVES,
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

impl RenderSettings {
    /// Check the settings against the engine preconditions (with a unit half-life).
    pub fn validate(&self) -> Result<(), DecayError> {
        DecayParams::new(1.0, self.initial_nuclei, self.max_half_lives, self.sample_count).map(drop)
    }

    /// Replace the fields that are `Some`.
    pub fn with_overrides(
        self,
        initial_nuclei: Option<f64>,
        max_half_lives: Option<f64>,
        sample_count: Option<usize>,
    ) -> Self {
        Self {
            initial_nuclei: initial_nuclei.unwrap_or(self.initial_nuclei),
            max_half_lives: max_half_lives.unwrap_or(self.max_half_lives),
            sample_count: sample_count.unwrap_or(self.sample_count),
        }
    }
}

/// One table row per selected isotope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub isotope: String,
    pub half_life: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsotopeTable {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// One line on the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub b: u32,
    pub t: u32,
    pub r: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub margin: Margin,
    pub hovermode: String,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            title: CHART_TITLE.to_string(),
            x_axis_title: TIME_AXIS_TITLE.to_string(),
            y_axis_title: QUANTITY_AXIS_TITLE.to_string(),
            margin: Margin { l: 40, b: 40, t: 50, r: 50 },
            hovermode: "closest".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub traces: Vec<Trace>,
    pub layout: ChartLayout,
}

/// Everything the page needs to redraw after a selection change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderState {
    pub title: String,
    pub settings: RenderSettings,
    pub table: IsotopeTable,
    pub figure: Figure,
    /// Requested names absent from the catalog.
    pub unmatched: Vec<String>,
}

/// Selection handler over a fixed catalog.
pub struct Dashboard {
    catalog: IsotopeCatalog,
    calculator: Arc<dyn DecayCalculator>,
    settings: RenderSettings,
    default_selection: Vec<String>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("isotopes", &self.catalog.len())
            .field("settings", &self.settings)
            .field("default_selection", &self.default_selection)
            .finish()
    }
}

impl Dashboard {
    /// Build a dashboard using the production [`DecayEngine`].
    ///
    /// Fails if the settings are not computable or if a default-selection
    /// name is missing from the catalog.
    pub fn new(
        catalog: IsotopeCatalog,
        settings: RenderSettings,
        default_selection: Vec<String>,
    ) -> Result<Self, HalflifeError> {
        settings.validate()?;
        if let Some(missing) = default_selection.iter().find(|n| !catalog.contains(n)) {
            return Err(HalflifeError::UnknownIsotope(missing.clone()));
        }
        Ok(Self {
            catalog,
            calculator: Arc::new(DecayEngine::new()),
            settings,
            default_selection,
        })
    }

    /// Swap the decay calculator.
    pub fn with_calculator(mut self, calculator: Arc<dyn DecayCalculator>) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn catalog(&self) -> &IsotopeCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn default_selection(&self) -> &[String] {
        &self.default_selection
    }

    /// Render the default selection.
    pub fn initial_state(&self) -> Result<RenderState, DecayError> {
        self.render(&self.default_selection, &self.settings)
    }

    /// Handle a selection change with the configured settings.
    pub fn handle(&self, event: &SelectionChanged) -> Result<RenderState, DecayError> {
        self.render(&event.isotopes, &self.settings)
    }

    /// Render `names` with explicit settings.
    ///
    /// Rows and traces follow catalog order; unknown names are reported in
    /// [`RenderState::unmatched`] and otherwise ignored.
    pub fn render<S: AsRef<str>>(
        &self,
        names: &[S],
        settings: &RenderSettings,
    ) -> Result<RenderState, DecayError> {
        settings.validate()?;
        let selection = self.catalog.select(names);
        if !selection.unmatched.is_empty() {
            warn!(unmatched = ?selection.unmatched, "selection contains unknown isotopes");
        }

        let mut rows = Vec::with_capacity(selection.isotopes.len());
        let mut traces = Vec::with_capacity(selection.isotopes.len());
        for isotope in &selection.isotopes {
            let series = self.calculator.compute_decay(
                isotope.half_life,
                settings.initial_nuclei,
                settings.max_half_lives,
                settings.sample_count,
            )?;
            let (x, y) = series.into_columns();
            traces.push(Trace { name: isotope.name.clone(), x, y });
            rows.push(TableRow { isotope: isotope.name.clone(), half_life: isotope.half_life });
        }
        debug!(traces = traces.len(), samples = settings.sample_count, "rendered selection");

        Ok(RenderState {
            title: DASHBOARD_TITLE.to_string(),
            settings: *settings,
            table: IsotopeTable {
                columns: vec![NAME_COLUMN.to_string(), TABLE_HALF_LIFE_HEADER.to_string()],
                rows,
            },
            figure: Figure { traces, layout: ChartLayout::default() },
            unmatched: selection.unmatched,
        })
    }
}
