//! Integration test suite for Halflife.
//!
//! End-to-end tests drive the dashboard router exactly as a browser would;
//! property tests check the decay law across the whole isotope table.

pub mod helpers;
