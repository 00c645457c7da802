//! Treatment regimens and the catalog rows they are coerced from
//!
//! A regimen describes one treatment protocol: Phase 1 cycle limit,
//! per-phase doses and administration frequencies, and the PAP payment
//! cap. Rows come from a tabular catalog keyed by indication group and
//! regimen name; how the table is fetched is not this crate's concern.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::dose::{is_blank, parse_numeric, DoseSpec};

/// Default Opdivo administration interval when the column is blank (weeks).
pub const DEFAULT_OPDIVO_FREQ_WEEKS: u32 = 2;

/// Default PAP cap when the column is blank (months).
pub const DEFAULT_PAP_CAP_MONTHS: u32 = 10;

/// Errors from catalog lookup and decoding
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("regimen not found: {indication} / {regimen}")]
    RegimenNotFound { indication: String, regimen: String },

    #[error("catalog payload is not valid JSON: {0}")]
    InvalidPayload(String),
}

/// One raw catalog row, exactly as the tabular source supplies it
///
/// All value fields are free-form strings; coercion happens in
/// [`Regimen::from_row`] via the tolerant numeric parser. Field names
/// mirror the source columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegimenRow {
    #[serde(rename = "Indication_Group", default)]
    pub indication_group: String,

    #[serde(rename = "Regimen_Name", default)]
    pub regimen_name: String,

    #[serde(rename = "P1_Cycle_Limit", default)]
    pub p1_cycle_limit: String,

    #[serde(rename = "P1_O_Freq_Weeks", default)]
    pub p1_opdivo_freq_weeks: String,

    #[serde(rename = "P1_Y_Freq_Weeks", default)]
    pub p1_yervoy_freq_weeks: String,

    #[serde(rename = "P1_O_Dose", default)]
    pub p1_opdivo_dose: String,

    #[serde(rename = "P1_Y_Dose", default)]
    pub p1_yervoy_dose: String,

    #[serde(rename = "P2_O_Dose", default)]
    pub p2_opdivo_dose: String,

    #[serde(rename = "P2_Freq_Weeks", default)]
    pub p2_freq_weeks: String,

    #[serde(rename = "PAP_Cap_Months", default)]
    pub pap_cap_months: String,
}

/// A coerced, validated treatment protocol (read-only per simulation run)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regimen {
    /// Cycles administered under Phase 1 dosing before Phase 2 (or stop)
    pub phase1_cycle_limit: u32,

    /// Weeks between Phase 1 Opdivo administrations (>= 1)
    pub phase1_opdivo_freq_weeks: u32,

    /// Weeks between Phase 1 Yervoy administrations (>= 1)
    pub phase1_yervoy_freq_weeks: u32,

    /// Months during which the patient pays; later administrations are free
    pub pap_cap_months: u32,

    /// Phase 1 Opdivo dose
    pub phase1_opdivo_dose: DoseSpec,

    /// Phase 1 Yervoy dose (administered on its own, sparser cadence)
    pub phase1_yervoy_dose: DoseSpec,

    /// Phase 2 Opdivo dose; `Absent` means the regimen has no Phase 2
    pub phase2_opdivo_dose: DoseSpec,

    /// Weeks between Phase 2 administrations (>= 1)
    pub phase2_freq_weeks: u32,
}

/// Coerce a frequency column: blank falls back to `default`, anything
/// else parses tolerantly and is floored at 1 week.
fn freq_weeks(raw: &str, default: u32) -> u32 {
    if is_blank(raw) {
        return default.max(1);
    }
    (parse_numeric(raw) as u32).max(1)
}

impl Regimen {
    /// Coerce a raw catalog row into a regimen.
    ///
    /// Never fails: malformed numeric fields degrade to zero, blank
    /// frequency and cap columns fall back to their defaults, and the
    /// Yervoy frequency defaults to Opdivo's.
    pub fn from_row(row: &RegimenRow) -> Self {
        let phase1_opdivo_freq_weeks =
            freq_weeks(&row.p1_opdivo_freq_weeks, DEFAULT_OPDIVO_FREQ_WEEKS);
        let phase1_yervoy_freq_weeks =
            freq_weeks(&row.p1_yervoy_freq_weeks, phase1_opdivo_freq_weeks);
        let pap_cap_months = if is_blank(&row.pap_cap_months) {
            DEFAULT_PAP_CAP_MONTHS
        } else {
            parse_numeric(&row.pap_cap_months) as u32
        };

        Self {
            phase1_cycle_limit: parse_numeric(&row.p1_cycle_limit) as u32,
            phase1_opdivo_freq_weeks,
            phase1_yervoy_freq_weeks,
            pap_cap_months,
            phase1_opdivo_dose: DoseSpec::parse(&row.p1_opdivo_dose),
            phase1_yervoy_dose: DoseSpec::parse(&row.p1_yervoy_dose),
            phase2_opdivo_dose: DoseSpec::parse(&row.p2_opdivo_dose),
            phase2_freq_weeks: freq_weeks(&row.p2_freq_weeks, 1),
        }
    }

    /// True when the regimen continues into a second phase.
    pub fn has_phase2(&self) -> bool {
        !self.phase2_opdivo_dose.is_absent()
    }
}

/// In-memory regimen catalog: a read-only row lookup
///
/// Rows are held in source order. Fetching, caching, and refreshing the
/// underlying table belong to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegimenCatalog {
    rows: Vec<RegimenRow>,
}

impl RegimenCatalog {
    /// Wrap already-obtained rows.
    pub fn new(rows: Vec<RegimenRow>) -> Self {
        Self { rows }
    }

    /// Decode a JSON array of rows (e.g. an exported sheet).
    pub fn from_json_str(payload: &str) -> Result<Self, CatalogError> {
        let rows = serde_json::from_str(payload)
            .map_err(|e| CatalogError::InvalidPayload(e.to_string()))?;
        Ok(Self { rows })
    }

    /// All rows, in source order
    pub fn rows(&self) -> &[RegimenRow] {
        &self.rows
    }

    /// Distinct indication groups, in first-seen order.
    pub fn indication_groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !row.indication_group.is_empty()
                && !groups.contains(&row.indication_group.as_str())
            {
                groups.push(&row.indication_group);
            }
        }
        groups
    }

    /// Rows belonging to one indication group.
    pub fn regimens_for(&self, indication: &str) -> Vec<&RegimenRow> {
        self.rows
            .iter()
            .filter(|row| row.indication_group == indication)
            .collect()
    }

    /// Look up one row by indication group and regimen name.
    pub fn find(&self, indication: &str, regimen: &str) -> Result<&RegimenRow, CatalogError> {
        self.rows
            .iter()
            .find(|row| row.indication_group == indication && row.regimen_name == regimen)
            .ok_or_else(|| CatalogError::RegimenNotFound {
                indication: indication.to_string(),
                regimen: regimen.to_string(),
            })
    }
}
