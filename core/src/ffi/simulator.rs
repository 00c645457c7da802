//! PyO3 wrapper for the cycle simulator
//!
//! This module provides the Python interface to the Rust engine.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{parse_params, parse_regimen, report_to_py};
use crate::models::regimen::Regimen;
use crate::simulator::{simulate, SimulationParams};

/// Python wrapper around one configured simulation
///
/// # Example (from Python)
///
/// ```python
/// from regimen_simulator_core_rs import Simulator
///
/// config = {
///     "P1_Cycle_Limit": "4",
///     "P1_O_Freq_Weeks": "2",
///     "P1_Y_Freq_Weeks": "6",
///     "P1_O_Dose": "3 mg/kg",
///     "P1_Y_Dose": "1 mg/kg",
///     "P2_O_Dose": "-",
///     "PAP_Cap_Months": "10",
///     "weight_kg": 60.0,
///     "start_date": "2026-01-05",
/// }
///
/// sim = Simulator.new(config)
/// report = sim.run()
/// print(f"total: {report['total_paid']:,.0f}")
/// ```
#[pyclass(name = "Simulator")]
pub struct PySimulator {
    regimen: Regimen,
    params: SimulationParams,
}

#[pymethods]
impl PySimulator {
    /// Create a simulator from a configuration dict
    ///
    /// The dict carries both the regimen's catalog-row fields and the
    /// patient parameters; see `ffi::types` for the accepted keys.
    ///
    /// # Errors
    ///
    /// Raises ValueError if required fields are missing, the start date
    /// is not ISO formatted, or parameter validation fails.
    #[staticmethod]
    fn new(config: &Bound<'_, PyDict>) -> PyResult<Self> {
        let regimen = parse_regimen(config)?;
        let params = parse_params(config)?;
        params
            .validate()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PySimulator { regimen, params })
    }

    /// Run the cycle loop and return the schedule report as a dict
    ///
    /// The report contains `total_paid`, `opdivo_paid_rounds`,
    /// `phase1_cycle_cost`, `phase2_cycle_cost`, `cap_months`,
    /// `has_phase2`, and `timeline` (a list of per-cycle dicts).
    ///
    /// # Errors
    ///
    /// Raises RuntimeError when a required dose cannot be covered by the
    /// stocked vial sizes.
    fn run(&self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let report = simulate(&self.regimen, &self.params)
            .map_err(|e| PyRuntimeError::new_err(format!("simulation failed: {}", e)))?;
        report_to_py(py, &report)
    }

    /// Whether the configured regimen continues into a second phase
    fn has_phase2(&self) -> bool {
        self.regimen.has_phase2()
    }
}
