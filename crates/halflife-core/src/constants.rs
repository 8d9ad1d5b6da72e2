//! Engine and dashboard constants. All times are in years.

/// Number of time points in a decay series when the caller does not choose one.
pub const DEFAULT_SAMPLE_COUNT: usize = 500;

/// Smallest sample count that can span both endpoints of the horizon.
pub const MIN_SAMPLE_COUNT: usize = 2;

/// Upper bound on sample counts accepted over HTTP.
pub const MAX_SAMPLE_COUNT: usize = 10_000;

/// Smallest accepted decay exponent between two consecutive samples,
/// `ln 2 * max_half_lives / (sample_count - 1)`. Below it, rounding can make
/// neighbouring quantities compare equal.
pub const MIN_STEP_DECAY: f64 = 1e-9;

/// Initial quantity of nuclei plotted by the dashboard.
pub const DEFAULT_INITIAL_NUCLEI: f64 = 1000.0;

/// Number of half-lives spanned by the dashboard's curves.
pub const DEFAULT_MAX_HALF_LIVES: f64 = 10.0;

/// Isotopes selected when the dashboard first loads.
pub const DEFAULT_SELECTION: [&str; 2] = ["Lead-202", "Plutonium-239"];

/// Default address for the dashboard HTTP server.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8888";

/// Field separator of the isotope table.
///
/// # Examples
///
/// ```
/// use halflife_core::constants::CATALOG_DELIMITER;
/// let fields: Vec<&str> = "Cobalt-60;5.2714".split(CATALOG_DELIMITER).collect();
/// assert_eq!(fields, ["Cobalt-60", "5.2714"]);
/// ```
pub const CATALOG_DELIMITER: char = ';';

/// Header of the isotope-name column.
pub const NAME_COLUMN: &str = "Isotope";

/// Header of the half-life column as written in the reference table.
pub const HALF_LIFE_COLUMN: &str = "Demi-vie (années)";

/// English spelling of the half-life column, accepted as an alias.
pub const HALF_LIFE_COLUMN_ALIAS: &str = "Half-life (years)";

/// Page heading of the dashboard.
pub const DASHBOARD_TITLE: &str = "Radioactive decay of the elements";

/// Chart title.
pub const CHART_TITLE: &str = "Nuclei amount according to time";

/// X-axis title.
pub const TIME_AXIS_TITLE: &str = "Time (years)";

/// Y-axis title.
pub const QUANTITY_AXIS_TITLE: &str = "Nuclei amount";
