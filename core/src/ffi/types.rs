//! Conversion helpers between Python dicts and core types

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::models::regimen::{Regimen, RegimenRow};
use crate::models::timeline::TimelineEntry;
use crate::simulator::{ScheduleReport, SimulationParams};

/// Build a regimen from catalog-row fields in the config dict.
///
/// Field names match the catalog columns (`P1_Cycle_Limit`, `P1_O_Dose`,
/// ...). Values of any Python type are stringified, then coerced by the
/// same tolerant parser the catalog path uses; missing keys behave like
/// blank cells.
pub fn parse_regimen(config: &Bound<'_, PyDict>) -> PyResult<Regimen> {
    let row = RegimenRow {
        indication_group: get_str(config, "Indication_Group")?.unwrap_or_default(),
        regimen_name: get_str(config, "Regimen_Name")?.unwrap_or_default(),
        p1_cycle_limit: get_str(config, "P1_Cycle_Limit")?.unwrap_or_default(),
        p1_opdivo_freq_weeks: get_str(config, "P1_O_Freq_Weeks")?.unwrap_or_default(),
        p1_yervoy_freq_weeks: get_str(config, "P1_Y_Freq_Weeks")?.unwrap_or_default(),
        p1_opdivo_dose: get_str(config, "P1_O_Dose")?.unwrap_or_default(),
        p1_yervoy_dose: get_str(config, "P1_Y_Dose")?.unwrap_or_default(),
        p2_opdivo_dose: get_str(config, "P2_O_Dose")?.unwrap_or_default(),
        p2_freq_weeks: get_str(config, "P2_Freq_Weeks")?.unwrap_or_default(),
        pap_cap_months: get_str(config, "PAP_Cap_Months")?.unwrap_or_default(),
    };
    Ok(Regimen::from_row(&row))
}

/// Extract simulation parameters from the config dict.
///
/// `weight_kg` and `start_date` (ISO `YYYY-MM-DD`) are required;
/// `stocked_sizes` defaults to all Opdivo sizes, `price_multiplier` to
/// 1.0, and `skip_weekends` to true.
pub fn parse_params(config: &Bound<'_, PyDict>) -> PyResult<SimulationParams> {
    let weight_kg: f64 = require(config, "weight_kg")?;

    let stocked_sizes: Vec<u32> = match config.get_item("stocked_sizes")? {
        Some(value) if !value.is_none() => value.extract()?,
        _ => vec![40, 100, 120],
    };
    let price_multiplier: f64 = match config.get_item("price_multiplier")? {
        Some(value) if !value.is_none() => value.extract()?,
        _ => 1.0,
    };
    let skip_weekends: bool = match config.get_item("skip_weekends")? {
        Some(value) if !value.is_none() => value.extract()?,
        _ => true,
    };

    let raw_date: String = require(config, "start_date")?;
    let start_date = chrono::NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
        .map_err(|e| PyValueError::new_err(format!("invalid start_date {:?}: {}", raw_date, e)))?;

    Ok(SimulationParams {
        weight_kg,
        stocked_sizes,
        price_multiplier,
        start_date,
        skip_weekends,
    })
}

/// Convert a schedule report into a Python dict.
pub fn report_to_py(py: Python<'_>, report: &ScheduleReport) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("id", report.id.to_string())?;
    dict.set_item("total_paid", report.total_paid)?;
    dict.set_item("opdivo_paid_rounds", report.opdivo_paid_rounds)?;
    dict.set_item("phase1_cycle_cost", report.phase1_cycle_cost)?;
    dict.set_item("phase2_cycle_cost", report.phase2_cycle_cost)?;
    dict.set_item("cap_months", report.cap_months)?;
    dict.set_item("has_phase2", report.has_phase2)?;

    let timeline = PyList::empty_bound(py);
    for entry in &report.timeline {
        timeline.append(entry_to_py(py, entry)?)?;
    }
    dict.set_item("timeline", timeline)?;

    Ok(dict.into())
}

/// Convert one timeline entry into a Python dict.
fn entry_to_py(py: Python<'_>, entry: &TimelineEntry) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("phase", entry.phase)?;
    dict.set_item("cycle", entry.cycle)?;
    dict.set_item("week", entry.week)?;
    dict.set_item("date", entry.date.format("%Y-%m-%d").to_string())?;
    dict.set_item("month", entry.month)?;
    dict.set_item("opdivo_vials", &entry.opdivo_vials)?;
    dict.set_item("yervoy_vials", &entry.yervoy_vials)?;
    dict.set_item("opdivo_paid", entry.opdivo_paid)?;
    dict.set_item("yervoy_paid", entry.yervoy_paid)?;
    dict.set_item("total_paid", entry.total_paid)?;
    dict.set_item("status", entry.status.to_string())?;
    Ok(dict.into())
}

/// Stringify an optional dict value, treating Python `None` as absent.
fn get_str(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<Option<String>> {
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.str()?.to_string())),
        _ => Ok(None),
    }
}

/// Extract a required, typed dict value.
fn require<'py, T: FromPyObject<'py>>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T> {
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("missing required field: {}", key)))?
        .extract()
}
