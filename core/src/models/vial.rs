//! Drug catalog: vial sizes and list prices
//!
//! Prices are fixed business constants (THB, VAT inclusive), one per
//! drug-and-vial-size combination. There is no runtime price feed; the
//! only knob is the uniform hospital markup multiplier applied by the
//! solver.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Vial sizes that can physically be stocked for Opdivo (mg).
pub const OPDIVO_VIAL_SIZES: [u32; 3] = [40, 100, 120];

/// Yervoy comes in a single vial size (mg).
pub const YERVOY_VIAL_SIZES: [u32; 1] = [50];

/// The two drugs of the combination regimen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Drug {
    Opdivo,
    Yervoy,
}

impl Drug {
    /// Vial sizes this drug is supplied in
    pub fn allowed_sizes(&self) -> &'static [u32] {
        match self {
            Drug::Opdivo => &OPDIVO_VIAL_SIZES,
            Drug::Yervoy => &YERVOY_VIAL_SIZES,
        }
    }

    /// Base list price for one vial of the given size, before markup.
    ///
    /// Returns `None` for a size the drug is not supplied in.
    pub fn base_price(&self, size_mg: u32) -> Option<f64> {
        match (self, size_mg) {
            (Drug::Opdivo, 40) => Some(23_540.0),
            (Drug::Opdivo, 100) => Some(58_850.0),
            (Drug::Opdivo, 120) => Some(70_620.0),
            (Drug::Yervoy, 50) => Some(60_348.0),
            _ => None,
        }
    }
}

impl fmt::Display for Drug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drug::Opdivo => write!(f, "Opdivo"),
            Drug::Yervoy => write!(f, "Yervoy"),
        }
    }
}

/// A multiset of vials covering one administration
///
/// Kept sorted by descending size so labels read largest-vial-first,
/// e.g. `"100mg x 1, 40mg x 2"`. An empty combination labels as `"-"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VialCombination {
    /// (size_mg, count) pairs, largest size first
    counts: Vec<(u32, u32)>,
}

impl VialCombination {
    /// The empty combination (zero dose, nothing dispensed)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from a size -> count map, dropping zero counts.
    pub fn from_counts(counts: &HashMap<u32, u32>) -> Self {
        let mut pairs: Vec<(u32, u32)> = counts
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&size, &count)| (size, count))
            .collect();
        pairs.sort_by(|a, b| b.0.cmp(&a.0));
        Self { counts: pairs }
    }

    /// True when no vials are dispensed
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of vials across all sizes
    pub fn total_vials(&self) -> u32 {
        self.counts.iter().map(|&(_, count)| count).sum()
    }

    /// Total milligrams contained in the combination
    pub fn total_mg(&self) -> u32 {
        self.counts.iter().map(|&(size, count)| size * count).sum()
    }

    /// (size_mg, count) pairs, largest size first
    pub fn counts(&self) -> &[(u32, u32)] {
        &self.counts
    }

    /// Human-readable breakdown, `"-"` when empty.
    pub fn label(&self) -> String {
        if self.counts.is_empty() {
            return "-".to_string();
        }
        self.counts
            .iter()
            .map(|&(size, count)| format!("{}mg x {}", size, count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for VialCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
