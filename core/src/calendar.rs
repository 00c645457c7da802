//! Treatment calendar arithmetic
//!
//! The simulation operates in whole weeks. Four weeks approximate one
//! billing month; this is a deliberate PAP convention, not calendar math.
//! This module provides the clock driving the cycle loop and the
//! display-only weekend shift.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Two-year simulation horizon, in weeks. No cycle is simulated past this.
pub const HORIZON_WEEKS: u32 = 104;

/// Billing month for a given treatment week (both 1-based, 4 weeks per month).
///
/// # Example
/// ```
/// use regimen_simulator_core_rs::calendar::month_index;
///
/// assert_eq!(month_index(1), 1);
/// assert_eq!(month_index(4), 1);
/// assert_eq!(month_index(5), 2);
/// ```
pub fn month_index(week: u32) -> u32 {
    assert!(week >= 1, "weeks are 1-based");
    ((week - 1) / 4) + 1
}

/// Billing month of the *next* scheduled dose for a drug administered at
/// `week` with an administration interval of `freq_weeks`.
///
/// Used by the cap rule: the last administration whose follow-up falls past
/// the payment cap is charged at half price.
pub fn next_dose_month(week: u32, freq_weeks: u32) -> u32 {
    month_index(week + freq_weeks)
}

/// Shift a date off the weekend for display purposes.
///
/// Saturday moves +2 days and Sunday +1 day, both landing on the following
/// Monday. The underlying clock is never shifted; appointments drift back
/// onto the original weekly grid afterwards.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use regimen_simulator_core_rs::calendar::display_date;
///
/// let sat = NaiveDate::from_ymd_opt(2026, 8, 22).unwrap();
/// let mon = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
/// assert_eq!(display_date(sat, true), mon);
/// assert_eq!(display_date(sat, false), sat);
/// ```
pub fn display_date(date: NaiveDate, skip_weekends: bool) -> NaiveDate {
    if !skip_weekends {
        return date;
    }
    match date.weekday() {
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

/// Clock carried across cycle iterations
///
/// Week and cycle start at 1. `advance` moves the week by the active
/// administration frequency and the cycle by exactly 1, keeping the
/// calendar date in lockstep.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use regimen_simulator_core_rs::TreatmentClock;
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
/// let mut clock = TreatmentClock::new(start);
/// assert_eq!(clock.week(), 1);
/// assert_eq!(clock.cycle(), 1);
///
/// clock.advance(2);
/// assert_eq!(clock.week(), 3);
/// assert_eq!(clock.cycle(), 2);
/// assert_eq!(clock.date(), NaiveDate::from_ymd_opt(2026, 1, 19).unwrap());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentClock {
    /// Current treatment week (1-based)
    week: u32,
    /// Current cycle (1-based, one per loop iteration)
    cycle: u32,
    /// Calendar date of the current cycle's appointment
    date: NaiveDate,
}

impl TreatmentClock {
    /// Create a clock positioned at week 1, cycle 1, on `start_date`.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            week: 1,
            cycle: 1,
            date: start_date,
        }
    }

    /// Current treatment week (1-based)
    pub fn week(&self) -> u32 {
        self.week
    }

    /// Current cycle (1-based)
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Calendar date of the current appointment
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Billing month of the current week
    pub fn month(&self) -> u32 {
        month_index(self.week)
    }

    /// True once the clock has moved past the two-year horizon
    pub fn past_horizon(&self) -> bool {
        self.week > HORIZON_WEEKS
    }

    /// Advance to the next cycle, `freq_weeks` later
    ///
    /// # Panics
    /// Panics if `freq_weeks` is zero (the clock must always move forward).
    pub fn advance(&mut self, freq_weeks: u32) {
        assert!(freq_weeks >= 1, "freq_weeks must be positive");
        self.week += freq_weeks;
        self.cycle += 1;
        self.date = self.date + Duration::weeks(i64::from(freq_weeks));
    }
}
