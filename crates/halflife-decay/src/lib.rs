//! # halflife-decay — Radioactive decay engine.
//!
//! Evaluates the closed-form decay law
//!
//! ```text
//! N(t) = N0 * exp(-ln(2) * t / T½)
//! ```
//!
//! over a uniform time grid spanning a whole number (or any positive real
//! number) of half-lives:
//! - **Validation up front**: every input is checked once, when
//!   [`DecayParams`](halflife_core::DecayParams) is built; a bad input is an
//!   `InvalidParameter` error, never a NaN in the output.
//! - **Lazy or materialized**: [`DecaySamples`] yields points on demand,
//!   [`compute_decay`] collects them into a
//!   [`DecaySeries`](halflife_core::DecaySeries).
//! - **Pure**: no state, no I/O; the engine is a zero-sized `Send + Sync` value.

pub mod engine;
pub mod samples;

pub use engine::{compute_decay, DecayEngine};
pub use samples::DecaySamples;
