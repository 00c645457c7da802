//! Dose specifications and tolerant field parsing
//!
//! Regimen catalog rows arrive as free-form spreadsheet text ("3 mg/kg",
//! "240 mg", "1,200", "-"). Parsing never fails: malformed fields degrade
//! to zero, which downstream code treats as "no dose".

use serde::{Deserialize, Serialize};

/// Extract the first numeric literal from a free-form catalog field.
///
/// Thousands separators are stripped first. Blank fields, "-", and "nan"
/// (any case) parse to 0.0, as does text with no digits at all.
///
/// # Example
/// ```
/// use regimen_simulator_core_rs::parse_numeric;
///
/// assert_eq!(parse_numeric("3 mg/kg"), 3.0);
/// assert_eq!(parse_numeric("1,200"), 1200.0);
/// assert_eq!(parse_numeric("-"), 0.0);
/// ```
pub fn parse_numeric(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("nan") {
        return 0.0;
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    let bytes = cleaned.as_bytes();

    let Some(start) = bytes.iter().position(|b| b.is_ascii_digit()) else {
        return 0.0;
    };
    let mut end = start;
    let mut seen_dot = false;
    while end < bytes.len() {
        let b = bytes[end];
        if b.is_ascii_digit() {
            end += 1;
        } else if b == b'.' && !seen_dot && end + 1 < bytes.len() && bytes[end + 1].is_ascii_digit()
        {
            seen_dot = true;
            end += 1;
        } else {
            break;
        }
    }
    cleaned[start..end].parse().unwrap_or(0.0)
}

/// True when a raw catalog field carries no value at all.
///
/// Distinct from parsing to zero: a blank field falls back to a column
/// default, while an explicit "0" does not.
pub fn is_blank(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("nan")
}

/// A dose as specified by a regimen, before weight resolution
///
/// Doses are tagged values, not strings: the unit marker decides whether
/// the magnitude is multiplied by patient weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DoseSpec {
    /// Fixed dose in milligrams
    AbsoluteMg(f64),

    /// Weight-based dose in milligrams per kilogram
    PerKgMg(f64),

    /// No dose in this phase
    Absent,
}

impl DoseSpec {
    /// Parse a raw catalog field into a tagged dose.
    ///
    /// A case-insensitive "mg/kg" marker selects the per-kilogram variant.
    /// Zero or unparsable magnitudes are `Absent`.
    ///
    /// # Example
    /// ```
    /// use regimen_simulator_core_rs::DoseSpec;
    ///
    /// assert_eq!(DoseSpec::parse("3 mg/kg"), DoseSpec::PerKgMg(3.0));
    /// assert_eq!(DoseSpec::parse("240 mg"), DoseSpec::AbsoluteMg(240.0));
    /// assert_eq!(DoseSpec::parse("-"), DoseSpec::Absent);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let magnitude = parse_numeric(raw);
        if magnitude <= 0.0 {
            return DoseSpec::Absent;
        }
        if raw.to_ascii_lowercase().contains("mg/kg") {
            DoseSpec::PerKgMg(magnitude)
        } else {
            DoseSpec::AbsoluteMg(magnitude)
        }
    }

    /// Resolve to an absolute milligram amount for a given patient weight.
    pub fn resolve(&self, weight_kg: f64) -> f64 {
        match self {
            DoseSpec::AbsoluteMg(mg) => *mg,
            DoseSpec::PerKgMg(per_kg) => per_kg * weight_kg,
            DoseSpec::Absent => 0.0,
        }
    }

    /// True when no dose is specified
    pub fn is_absent(&self) -> bool {
        matches!(self, DoseSpec::Absent)
    }
}
