//! # halflife-core
//! Foundation types and traits for Halflife.

pub mod catalog;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use catalog::{IsotopeCatalog, Selection};
pub use error::{CatalogError, DecayError, HalflifeError};
pub use traits::DecayCalculator;
pub use types::{DecayParams, DecayPoint, DecaySeries, Isotope};
