//! Integration tests for the cycle simulator
//!
//! Tests cover:
//! - The worked melanoma-style example (alternating billing + Yervoy cadence)
//! - Alternating billing counts over a longer run
//! - Cap-boundary half-price behavior
//! - Two-year horizon bound and no-Phase-2 termination
//! - Phase 2 transition and per-phase cycle costs
//! - Weekend display shift without clock feedback
//! - Parameter validation and infeasible-stock surfacing

use chrono::NaiveDate;
use regimen_simulator_core_rs::{
    simulate, DoseSpec, PaymentStatus, Regimen, SimulationError, SimulationParams, Simulator,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 2026-01-05 is a Monday, so no weekend shifting interferes by default.
fn test_params() -> SimulationParams {
    SimulationParams {
        weight_kg: 60.0,
        stocked_sizes: vec![40, 100, 120],
        price_multiplier: 1.0,
        start_date: date(2026, 1, 5),
        skip_weekends: true,
    }
}

/// 4 Phase-1 cycles, Opdivo q2w at 3 mg/kg, Yervoy q6w at 1 mg/kg,
/// 10-month cap, no Phase 2.
fn example_regimen() -> Regimen {
    Regimen {
        phase1_cycle_limit: 4,
        phase1_opdivo_freq_weeks: 2,
        phase1_yervoy_freq_weeks: 6,
        pap_cap_months: 10,
        phase1_opdivo_dose: DoseSpec::PerKgMg(3.0),
        phase1_yervoy_dose: DoseSpec::PerKgMg(1.0),
        phase2_opdivo_dose: DoseSpec::Absent,
        phase2_freq_weeks: 1,
    }
}

/// Opdivo-only regimen with everything else configurable in the test body.
fn opdivo_only(cycle_limit: u32, freq_weeks: u32, dose_mg: f64, cap_months: u32) -> Regimen {
    Regimen {
        phase1_cycle_limit: cycle_limit,
        phase1_opdivo_freq_weeks: freq_weeks,
        phase1_yervoy_freq_weeks: freq_weeks,
        pap_cap_months: cap_months,
        phase1_opdivo_dose: DoseSpec::AbsoluteMg(dose_mg),
        phase1_yervoy_dose: DoseSpec::Absent,
        phase2_opdivo_dose: DoseSpec::Absent,
        phase2_freq_weeks: 1,
    }
}

#[test]
fn test_worked_example_schedule() {
    // At 60 kg: Opdivo 180 mg = 100 + 40 + 40 = 105,930;
    // Yervoy 60 mg = 2 x 50 = 120,696.
    let report = simulate(&example_regimen(), &test_params()).unwrap();

    assert_eq!(report.timeline.len(), 4);
    assert!(!report.has_phase2);
    assert_eq!(report.cap_months, 10);

    // Cycle 1, week 1: both drugs' 1st administrations, both billed full
    let c1 = &report.timeline[0];
    assert_eq!((c1.phase, c1.cycle, c1.week, c1.month), (1, 1, 1, 1));
    assert_eq!(c1.opdivo_vials, "100mg x 1, 40mg x 2");
    assert_eq!(c1.yervoy_vials, "50mg x 2");
    assert_eq!(c1.opdivo_paid, 105_930.0);
    assert_eq!(c1.yervoy_paid, 120_696.0);
    assert_eq!(c1.total_paid, 226_626.0);
    assert_eq!(c1.status, PaymentStatus::Paid);

    // Cycle 2, week 3: Opdivo 2nd administration is free, Yervoy not due
    let c2 = &report.timeline[1];
    assert_eq!(c2.week, 3);
    assert_eq!(c2.yervoy_vials, "-");
    assert_eq!(c2.opdivo_vials, "100mg x 1, 40mg x 2"); // dispensed, free
    assert_eq!(c2.total_paid, 0.0);
    assert_eq!(c2.status, PaymentStatus::Free);

    // Cycle 3, week 5: Opdivo 3rd administration billed again
    let c3 = &report.timeline[2];
    assert_eq!((c3.week, c3.month), (5, 2));
    assert_eq!(c3.opdivo_paid, 105_930.0);
    assert_eq!(c3.yervoy_paid, 0.0);
    assert_eq!(c3.status, PaymentStatus::Paid);

    // Cycle 4, week 7: Opdivo 4th free, Yervoy due again ((7-1) % 6 == 0)
    // as its 2nd administration, also free
    let c4 = &report.timeline[3];
    assert_eq!(c4.week, 7);
    assert_eq!(c4.yervoy_vials, "50mg x 2");
    assert_eq!(c4.total_paid, 0.0);
    assert_eq!(c4.status, PaymentStatus::Free);

    assert_eq!(report.total_paid, 332_556.0);
    assert_eq!(report.opdivo_paid_rounds, 2.0);
    assert_eq!(report.phase1_cycle_cost, 226_626.0);
    assert_eq!(report.phase2_cycle_cost, 0.0);
}

#[test]
fn test_entry_totals_equal_drug_sums() {
    let report = simulate(&example_regimen(), &test_params()).unwrap();
    for entry in &report.timeline {
        assert_eq!(entry.total_paid, entry.opdivo_paid + entry.yervoy_paid);
    }
}

#[test]
fn test_appointment_dates_follow_the_clock() {
    let report = simulate(&example_regimen(), &test_params()).unwrap();
    let dates: Vec<NaiveDate> = report.timeline.iter().map(|e| e.date).collect();
    // Mondays, two weeks apart
    assert_eq!(
        dates,
        vec![
            date(2026, 1, 5),
            date(2026, 1, 19),
            date(2026, 2, 2),
            date(2026, 2, 16),
        ]
    );
}

#[test]
fn test_alternating_billing_over_ten_administrations() {
    // 10 administrations inside the cap: the odd-numbered 5 are billed,
    // the even-numbered 5 are free
    let regimen = opdivo_only(10, 2, 100.0, 100);
    let report = simulate(&regimen, &test_params()).unwrap();

    assert_eq!(report.timeline.len(), 10);
    let billed: Vec<u32> = report
        .timeline
        .iter()
        .filter(|e| e.opdivo_paid > 0.0)
        .map(|e| e.cycle)
        .collect();
    assert_eq!(billed, vec![1, 3, 5, 7, 9]);
    assert_eq!(report.total_paid, 5.0 * 58_850.0);
    assert_eq!(report.opdivo_paid_rounds, 5.0);
}

#[test]
fn test_last_administration_before_cap_pays_half() {
    // Cap of 1 month, q4w: the week-1 dose's follow-up lands in month 2,
    // past the cap, so the first administration is billed at 50%
    let regimen = opdivo_only(2, 4, 100.0, 1);
    let report = simulate(&regimen, &test_params()).unwrap();

    let c1 = &report.timeline[0];
    assert_eq!(c1.opdivo_paid, 58_850.0 * 0.5);
    assert_eq!(c1.status, PaymentStatus::PaidHalf);

    // Week 5 is month 2, outside the cap: not counted, not billed
    let c2 = &report.timeline[1];
    assert_eq!(c2.total_paid, 0.0);
    assert_eq!(c2.status, PaymentStatus::Free);

    assert_eq!(report.opdivo_paid_rounds, 0.5);
}

#[test]
fn test_administration_with_next_dose_inside_cap_pays_full() {
    // Same schedule, cap of 2 months: the follow-up now falls inside the
    // cap, so the first administration pays full price
    let regimen = opdivo_only(2, 4, 100.0, 2);
    let report = simulate(&regimen, &test_params()).unwrap();

    let c1 = &report.timeline[0];
    assert_eq!(c1.opdivo_paid, 58_850.0);
    assert_eq!(c1.status, PaymentStatus::Paid);
    assert_eq!(report.opdivo_paid_rounds, 1.0);
}

#[test]
fn test_yervoy_half_price_does_not_mark_the_entry() {
    // Yervoy-only cycle billed at 50%: the half-price status marker
    // follows the Opdivo outcome, so the entry still reads "Paid"
    let regimen = Regimen {
        phase1_cycle_limit: 2,
        phase1_opdivo_freq_weeks: 4,
        phase1_yervoy_freq_weeks: 4,
        pap_cap_months: 1,
        phase1_opdivo_dose: DoseSpec::Absent,
        phase1_yervoy_dose: DoseSpec::AbsoluteMg(50.0),
        phase2_opdivo_dose: DoseSpec::Absent,
        phase2_freq_weeks: 1,
    };
    let report = simulate(&regimen, &test_params()).unwrap();

    let c1 = &report.timeline[0];
    assert_eq!(c1.opdivo_vials, "-");
    assert_eq!(c1.yervoy_paid, 60_348.0 * 0.5);
    assert_eq!(c1.status, PaymentStatus::Paid);
    // Yervoy never feeds the Opdivo paid-rounds accumulator
    assert_eq!(report.opdivo_paid_rounds, 0.0);
}

#[test]
fn test_two_year_horizon_bound() {
    // q2w with a 60-cycle limit would run to week 119; the horizon stops
    // the loop after week 103 (the 52nd administration)
    let regimen = opdivo_only(60, 2, 240.0, 0);
    let report = simulate(&regimen, &test_params()).unwrap();

    assert_eq!(report.timeline.len(), 52);
    assert!(report.timeline.iter().all(|e| e.week <= 104));
    assert_eq!(report.timeline.last().unwrap().week, 103);
    // Cap of 0 months: every administration is free
    assert_eq!(report.total_paid, 0.0);
    assert!(report
        .timeline
        .iter()
        .all(|e| e.status == PaymentStatus::Free));
}

#[test]
fn test_no_phase2_regimen_stops_at_cycle_limit() {
    let regimen = opdivo_only(6, 2, 240.0, 100);
    let report = simulate(&regimen, &test_params()).unwrap();
    assert_eq!(report.timeline.len(), 6);
    assert!(!report.has_phase2);
}

#[test]
fn test_phase2_transition_and_cycle_costs() {
    // Phase 1: 240 mg q2w for 2 cycles (120 x 2 = 141,240).
    // Phase 2: 480 mg q4w (120 x 4 = 282,480).
    let regimen = Regimen {
        phase1_cycle_limit: 2,
        phase1_opdivo_freq_weeks: 2,
        phase1_yervoy_freq_weeks: 2,
        pap_cap_months: 100,
        phase1_opdivo_dose: DoseSpec::AbsoluteMg(240.0),
        phase1_yervoy_dose: DoseSpec::Absent,
        phase2_opdivo_dose: DoseSpec::AbsoluteMg(480.0),
        phase2_freq_weeks: 4,
    };
    let report = simulate(&regimen, &test_params()).unwrap();

    assert!(report.has_phase2);

    // Cycles 1-2 are Phase 1 (weeks 1, 3); cycle 3 enters Phase 2 at week 5
    assert_eq!(report.timeline[0].phase, 1);
    assert_eq!(report.timeline[1].phase, 1);
    let c3 = &report.timeline[2];
    assert_eq!((c3.phase, c3.cycle, c3.week), (2, 3, 5));
    assert_eq!(c3.opdivo_vials, "120mg x 4");

    // Administration counting continues across the phase switch: cycle 2
    // was the free 2nd administration, so cycle 3 is the billed 3rd
    assert_eq!(c3.opdivo_paid, 282_480.0);

    // Phase 2 runs q4w from week 5 through week 101 (25 cycles)
    assert_eq!(report.timeline.len(), 27);
    assert_eq!(report.timeline.last().unwrap().week, 101);

    assert_eq!(report.phase1_cycle_cost, 141_240.0);
    assert_eq!(report.phase2_cycle_cost, 282_480.0);

    // 1 billed Phase-1 administration + 13 billed Phase-2 ones
    assert_eq!(report.opdivo_paid_rounds, 14.0);
    assert_eq!(report.total_paid, 141_240.0 + 13.0 * 282_480.0);
}

#[test]
fn test_weekend_start_shifts_display_only() {
    // 2026-01-03 is a Saturday
    let mut params = test_params();
    params.start_date = date(2026, 1, 3);
    let report = simulate(&example_regimen(), &params).unwrap();

    // Displayed on Monday, but the underlying clock keeps the Saturday
    // grid: week 3 lands on 2026-01-17 (Saturday), shown as the 19th
    assert_eq!(report.timeline[0].date, date(2026, 1, 5));
    assert_eq!(report.timeline[1].date, date(2026, 1, 19));

    // With shifting off, the raw Saturdays come through
    params.skip_weekends = false;
    let report = simulate(&example_regimen(), &params).unwrap();
    assert_eq!(report.timeline[0].date, date(2026, 1, 3));
    assert_eq!(report.timeline[1].date, date(2026, 1, 17));
}

#[test]
fn test_multiplier_scales_schedule_uniformly() {
    let base = simulate(&example_regimen(), &test_params()).unwrap();

    let mut params = test_params();
    params.price_multiplier = 2.0;
    let marked_up = simulate(&example_regimen(), &params).unwrap();

    assert_eq!(marked_up.total_paid, base.total_paid * 2.0);
    // Vial choices are unaffected by a uniform multiplier
    for (a, b) in base.timeline.iter().zip(&marked_up.timeline) {
        assert_eq!(a.opdivo_vials, b.opdivo_vials);
        assert_eq!(a.yervoy_vials, b.yervoy_vials);
    }
}

#[test]
fn test_invalid_params_are_rejected() {
    let cases = [
        SimulationParams {
            weight_kg: 0.0,
            ..test_params()
        },
        SimulationParams {
            price_multiplier: 0.9,
            ..test_params()
        },
        SimulationParams {
            stocked_sizes: vec![40, 50],
            ..test_params()
        },
    ];
    for params in cases {
        let err = Simulator::new(example_regimen(), params).err().unwrap();
        assert!(matches!(err, SimulationError::InvalidParams(_)));
    }
}

#[test]
fn test_empty_stock_surfaces_infeasible_allocation() {
    let mut params = test_params();
    params.stocked_sizes = Vec::new();
    let err = simulate(&example_regimen(), &params).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::NoFeasibleAllocation { cycle: 1, .. }
    ));
}

#[test]
fn test_zero_cycle_limit_without_phase2_yields_empty_schedule() {
    let regimen = opdivo_only(0, 2, 240.0, 10);
    let report = simulate(&regimen, &test_params()).unwrap();
    assert!(report.timeline.is_empty());
    assert_eq!(report.total_paid, 0.0);
}
