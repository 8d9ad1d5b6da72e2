//! Error types for Halflife.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecayError {
    #[error("invalid parameter `{name}` = {value}: {requirement}")] InvalidParameter { name: &'static str, value: f64, requirement: &'static str },
}

impl DecayError {
    /// Build a [`DecayError::InvalidParameter`].
    pub fn invalid(name: &'static str, value: f64, requirement: &'static str) -> Self {
        Self::InvalidParameter { name, value, requirement }
    }

    /// Name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidParameter { name, .. } => name,
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("io: {0}")] Io(#[from] std::io::Error),
    #[error("missing column: {0}")] MissingColumn(&'static str),
    #[error("invalid record on line {line}: {reason}")] InvalidRecord { line: usize, reason: String },
    #[error("duplicate isotope on line {line}: {name}")] DuplicateIsotope { line: usize, name: String },
    #[error("isotope table is empty")] Empty,
}

#[derive(Error, Debug)]
pub enum HalflifeError {
    #[error(transparent)] Decay(#[from] DecayError),
    #[error(transparent)] Catalog(#[from] CatalogError),
    #[error("unknown isotope: {0}")] UnknownIsotope(String),
}
