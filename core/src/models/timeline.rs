//! Schedule output records
//!
//! One [`TimelineEntry`] is appended per simulated cycle, whether or not
//! anything was billed. The presentation layer consumes these as plain
//! structured data; no rendering happens here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Billing outcome of one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Nothing billed this cycle (even-numbered administration, past the
    /// cap, or no dose due)
    Free,

    /// Billed at full sticker price
    Paid,

    /// Billed at half price: the next scheduled dose falls past the cap
    PaidHalf,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Free => write!(f, "Free"),
            PaymentStatus::Paid => write!(f, "Paid"),
            PaymentStatus::PaidHalf => write!(f, "Paid (Pay 50%)"),
        }
    }
}

/// One administration event in the simulated schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Treatment phase (1 or 2)
    pub phase: u8,

    /// Cycle index (1-based, one per loop iteration)
    pub cycle: u32,

    /// Treatment week of this cycle (1-based)
    pub week: u32,

    /// Appointment date, already weekend-shifted for display
    pub date: NaiveDate,

    /// Billing month (4-week approximation, 1-based)
    pub month: u32,

    /// Opdivo vial breakdown, `"-"` when no Opdivo dose this cycle
    pub opdivo_vials: String,

    /// Yervoy vial breakdown, `"-"` when Yervoy is not due this cycle
    pub yervoy_vials: String,

    /// Amount the patient pays for Opdivo this cycle
    pub opdivo_paid: f64,

    /// Amount the patient pays for Yervoy this cycle
    pub yervoy_paid: f64,

    /// Sum of the two drug payments
    pub total_paid: f64,

    /// Billing outcome
    pub status: PaymentStatus,
}
