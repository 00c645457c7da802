//! Cycle simulator - the week-indexed treatment loop
//!
//! Drives a regimen's two phases over a two-year horizon, pricing each
//! administration through the vial allocation solver and applying the
//! PAP cap and alternating-discount billing rules.
//!
//! See `engine.rs` for full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{simulate, ScheduleReport, SimulationError, SimulationParams, Simulator};
