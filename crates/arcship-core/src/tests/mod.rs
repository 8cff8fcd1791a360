//! Behavioral tests for the ship core.
//!
//! - `scenarios.rs`: end-to-end control/beat sequences with exact outcomes
//! - `properties.rs`: invariants checked over random input sequences
//! - `helpers.rs`: ship factories and event recorders

mod helpers;
mod scenarios;

// Re-export for convenience
pub use helpers::*;
