//! Treatment-cycle simulation engine
//!
//! One loop iteration is one potential administration event at the current
//! treatment week:
//!
//! 1. Determine the phase (Phase 1 while `cycle <= phase1_cycle_limit`)
//! 2. Weekend-shift the appointment date for display
//! 3. Compute the billing month (4-week approximation)
//! 4. Resolve each drug's dose for the patient's weight
//! 5. Price the administration through the vial allocation solver
//! 6. Apply the cap and alternating-discount billing rules per drug
//! 7. Record a timeline entry and advance the clock
//!
//! The loop stops past week 104 or when Phase 2 is reached by a regimen
//! that has none.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use regimen_simulator_core_rs::{simulate, DoseSpec, Regimen, SimulationParams};
//!
//! let regimen = Regimen {
//!     phase1_cycle_limit: 4,
//!     phase1_opdivo_freq_weeks: 2,
//!     phase1_yervoy_freq_weeks: 6,
//!     pap_cap_months: 10,
//!     phase1_opdivo_dose: DoseSpec::PerKgMg(3.0),
//!     phase1_yervoy_dose: DoseSpec::PerKgMg(1.0),
//!     phase2_opdivo_dose: DoseSpec::Absent,
//!     phase2_freq_weeks: 1,
//! };
//! let params = SimulationParams {
//!     weight_kg: 60.0,
//!     stocked_sizes: vec![40, 100, 120],
//!     price_multiplier: 1.0,
//!     start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
//!     skip_weekends: true,
//! };
//!
//! let report = simulate(&regimen, &params).unwrap();
//! assert_eq!(report.timeline.len(), 4);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::calendar::{display_date, month_index, next_dose_month, TreatmentClock};
use crate::models::regimen::Regimen;
use crate::models::timeline::{PaymentStatus, TimelineEntry};
use crate::models::vial::{Drug, OPDIVO_VIAL_SIZES, YERVOY_VIAL_SIZES};
use crate::solver::{solve_min_cost, SolveError};

// ============================================================================
// Configuration Types
// ============================================================================

/// Per-run simulation parameters (read-only once validated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Patient weight in kilograms (must be positive)
    pub weight_kg: f64,

    /// Opdivo vial sizes physically in stock (subset of {40, 100, 120} mg)
    pub stocked_sizes: Vec<u32>,

    /// Uniform markup over base prices (>= 1.0)
    pub price_multiplier: f64,

    /// Date of the first administration
    pub start_date: NaiveDate,

    /// Shift weekend appointments forward to Monday in the output
    pub skip_weekends: bool,
}

impl SimulationParams {
    /// Validate parameter ranges.
    ///
    /// # Errors
    /// [`SimulationError::InvalidParams`] when the weight is not positive,
    /// the multiplier is below 1.0, or a stocked size is not an Opdivo
    /// vial size.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.weight_kg > 0.0) {
            return Err(SimulationError::InvalidParams(format!(
                "patient weight must be positive, got {}",
                self.weight_kg
            )));
        }
        if !(self.price_multiplier >= 1.0) {
            return Err(SimulationError::InvalidParams(format!(
                "price multiplier must be >= 1.0, got {}",
                self.price_multiplier
            )));
        }
        for &size in &self.stocked_sizes {
            if !OPDIVO_VIAL_SIZES.contains(&size) {
                return Err(SimulationError::InvalidParams(format!(
                    "unknown Opdivo vial size: {} mg",
                    size
                )));
            }
        }
        Ok(())
    }
}

/// Simulation error types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// Parameter validation error
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// A required dose could not be covered by the stocked vial sizes
    #[error("cycle {cycle}: {source}")]
    NoFeasibleAllocation {
        cycle: u32,
        #[source]
        source: SolveError,
    },
}

// ============================================================================
// Report Types
// ============================================================================

/// Complete output of one simulation run
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    /// Unique id of this run
    pub id: Uuid,

    /// Total the patient pays over the whole schedule
    pub total_paid: f64,

    /// Fractional count of billed Opdivo administrations
    /// (+1.0 per full-price, +0.5 per half-price)
    pub opdivo_paid_rounds: f64,

    /// First nonzero per-cycle payment observed in Phase 1
    pub phase1_cycle_cost: f64,

    /// First nonzero per-cycle payment observed in Phase 2
    pub phase2_cycle_cost: f64,

    /// One entry per simulated cycle, in order
    pub timeline: Vec<TimelineEntry>,

    /// The regimen's PAP cap, echoed for the caller
    pub cap_months: u32,

    /// Whether the regimen defines a Phase 2
    pub has_phase2: bool,
}

// ============================================================================
// Simulator
// ============================================================================

/// Owns the state of one simulation run
///
/// Nothing persists across runs: construct, call [`Simulator::run`], done.
/// Concurrent runs share no state and need no coordination.
pub struct Simulator {
    regimen: Regimen,
    params: SimulationParams,

    /// Week/cycle/date clock
    clock: TreatmentClock,

    /// Running total the patient pays
    total_paid: f64,

    /// Fractional Opdivo paid-rounds accumulator
    opdivo_paid_rounds: f64,

    /// Opdivo administrations counted inside the cap window
    /// (odd-numbered ones are billed, even-numbered ones are free)
    opdivo_admin_count: u32,

    /// Yervoy administrations counted inside the cap window
    yervoy_admin_count: u32,

    /// First nonzero payment seen in each phase
    phase1_cycle_cost: f64,
    phase2_cycle_cost: f64,

    timeline: Vec<TimelineEntry>,
}

impl Simulator {
    /// Create a simulator for one regimen and parameter set.
    ///
    /// # Errors
    /// [`SimulationError::InvalidParams`] when the parameters fail
    /// validation; see [`SimulationParams::validate`].
    pub fn new(regimen: Regimen, params: SimulationParams) -> Result<Self, SimulationError> {
        params.validate()?;
        let clock = TreatmentClock::new(params.start_date);
        Ok(Self {
            regimen,
            params,
            clock,
            total_paid: 0.0,
            opdivo_paid_rounds: 0.0,
            opdivo_admin_count: 0,
            yervoy_admin_count: 0,
            phase1_cycle_cost: 0.0,
            phase2_cycle_cost: 0.0,
            timeline: Vec::new(),
        })
    }

    /// Run the cycle loop to completion and produce the schedule report.
    ///
    /// # Errors
    /// [`SimulationError::NoFeasibleAllocation`] when a required dose
    /// cannot be covered by any stocked vial size.
    pub fn run(mut self) -> Result<ScheduleReport, SimulationError> {
        while !self.clock.past_horizon() {
            if !self.step()? {
                break;
            }
        }
        Ok(ScheduleReport {
            id: Uuid::new_v4(),
            total_paid: self.total_paid,
            opdivo_paid_rounds: self.opdivo_paid_rounds,
            phase1_cycle_cost: self.phase1_cycle_cost,
            phase2_cycle_cost: self.phase2_cycle_cost,
            has_phase2: self.regimen.has_phase2(),
            cap_months: self.regimen.pap_cap_months,
            timeline: self.timeline,
        })
    }

    /// One cycle iteration. Returns `Ok(false)` when the regimen is
    /// exhausted (Phase 2 reached without a Phase 2 defined).
    fn step(&mut self) -> Result<bool, SimulationError> {
        let week = self.clock.week();
        let cycle = self.clock.cycle();
        let in_phase1 = cycle <= self.regimen.phase1_cycle_limit;
        if !in_phase1 && !self.regimen.has_phase2() {
            return Ok(false);
        }

        let month = month_index(week);
        // Frequency floors at 1 so a degenerate regimen cannot stall the clock
        let freq = if in_phase1 {
            self.regimen.phase1_opdivo_freq_weeks.max(1)
        } else {
            self.regimen.phase2_freq_weeks.max(1)
        };
        let yervoy_freq = self.regimen.phase1_yervoy_freq_weeks.max(1);

        // Dose resolution: Yervoy runs its own, sparser cadence inside Phase 1
        let opdivo_dose = if in_phase1 {
            self.regimen.phase1_opdivo_dose
        } else {
            self.regimen.phase2_opdivo_dose
        };
        let opdivo_mg = opdivo_dose.resolve(self.params.weight_kg);
        let yervoy_due = in_phase1 && (week - 1) % yervoy_freq == 0;
        let yervoy_mg = if yervoy_due {
            self.regimen.phase1_yervoy_dose.resolve(self.params.weight_kg)
        } else {
            0.0
        };

        let opdivo_alloc = solve_min_cost(
            opdivo_mg,
            Drug::Opdivo,
            &self.params.stocked_sizes,
            self.params.price_multiplier,
        )
        .map_err(|source| SimulationError::NoFeasibleAllocation { cycle, source })?;
        let yervoy_alloc = solve_min_cost(
            yervoy_mg,
            Drug::Yervoy,
            &YERVOY_VIAL_SIZES,
            self.params.price_multiplier,
        )
        .map_err(|source| SimulationError::NoFeasibleAllocation { cycle, source })?;

        let cap = self.regimen.pap_cap_months;
        let mut opdivo_paid = 0.0;
        let mut yervoy_paid = 0.0;
        let mut half_price = false;

        // Billing: administrations are only counted inside the cap window,
        // and only odd-numbered ones are billed. A billed administration
        // whose next scheduled dose falls past the cap pays half.
        if opdivo_mg > 0.0 && month <= cap {
            self.opdivo_admin_count += 1;
            if self.opdivo_admin_count % 2 != 0 {
                if next_dose_month(week, freq) <= cap {
                    opdivo_paid = opdivo_alloc.cost;
                    self.opdivo_paid_rounds += 1.0;
                } else {
                    opdivo_paid = opdivo_alloc.cost * 0.5;
                    self.opdivo_paid_rounds += 0.5;
                    half_price = true;
                }
            }
        }

        if yervoy_mg > 0.0 && month <= cap {
            self.yervoy_admin_count += 1;
            if self.yervoy_admin_count % 2 != 0 {
                yervoy_paid = if next_dose_month(week, yervoy_freq) <= cap {
                    yervoy_alloc.cost
                } else {
                    yervoy_alloc.cost * 0.5
                };
            }
        }

        let total = opdivo_paid + yervoy_paid;
        self.total_paid += total;
        if in_phase1 && self.phase1_cycle_cost == 0.0 && total > 0.0 {
            self.phase1_cycle_cost = total;
        }
        if !in_phase1 && self.phase2_cycle_cost == 0.0 && total > 0.0 {
            self.phase2_cycle_cost = total;
        }

        // The half-price marker follows the Opdivo outcome, matching how
        // the billing desk reports the schedule
        let status = if total > 0.0 {
            if half_price {
                PaymentStatus::PaidHalf
            } else {
                PaymentStatus::Paid
            }
        } else {
            PaymentStatus::Free
        };

        self.timeline.push(TimelineEntry {
            phase: if in_phase1 { 1 } else { 2 },
            cycle,
            week,
            date: display_date(self.clock.date(), self.params.skip_weekends),
            month,
            opdivo_vials: opdivo_alloc.combination.label(),
            yervoy_vials: if yervoy_mg > 0.0 {
                yervoy_alloc.combination.label()
            } else {
                "-".to_string()
            },
            opdivo_paid,
            yervoy_paid,
            total_paid: total,
            status,
        });

        self.clock.advance(freq);
        Ok(true)
    }
}

/// Simulate one regimen for one patient and return the schedule report.
///
/// Convenience wrapper over [`Simulator::new`] + [`Simulator::run`].
pub fn simulate(
    regimen: &Regimen,
    params: &SimulationParams,
) -> Result<ScheduleReport, SimulationError> {
    Simulator::new(regimen.clone(), params.clone())?.run()
}
