//! Regimen Cost Simulator Core - Rust Engine
//!
//! Estimates a patient's out-of-pocket cost schedule for a two-drug
//! combination immunotherapy regimen (Opdivo + Yervoy) governed by a
//! patient-assistance program (PAP) payment cap.
//!
//! # Architecture
//!
//! - **calendar**: Treatment clock and week/month arithmetic
//! - **models**: Domain types (doses, vials, regimens, timeline entries)
//! - **solver**: Minimum-cost vial allocation
//! - **simulator**: Cycle loop producing the payment schedule
//!
//! # Critical Invariants
//!
//! 1. Week and cycle counters are 1-based and strictly increasing
//! 2. The loop never simulates past week 104 (two-year horizon)
//! 3. Solver calls are pure; the memo table dies with the call
//! 4. Every timeline entry's total equals the sum of its two drug payments

// Module declarations
pub mod calendar;
pub mod models;
pub mod simulator;
pub mod solver;

// Re-exports for convenience
pub use calendar::{display_date, month_index, next_dose_month, TreatmentClock, HORIZON_WEEKS};
pub use models::{
    dose::{parse_numeric, DoseSpec},
    regimen::{CatalogError, Regimen, RegimenCatalog, RegimenRow},
    timeline::{PaymentStatus, TimelineEntry},
    vial::{Drug, VialCombination, OPDIVO_VIAL_SIZES, YERVOY_VIAL_SIZES},
};
pub use simulator::{simulate, ScheduleReport, SimulationError, SimulationParams, Simulator};
pub use solver::{solve_min_cost, SolveError, VialAllocation};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn regimen_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::simulator::PySimulator>()?;
    Ok(())
}
