//! Integration tests for calendar arithmetic
//!
//! Tests cover:
//! - 4-week billing month index
//! - Next-dose month used by the cap rule
//! - Weekend display shifting
//! - Treatment clock advancement

use chrono::NaiveDate;
use regimen_simulator_core_rs::{
    display_date, month_index, next_dose_month, TreatmentClock, HORIZON_WEEKS,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_month_index_four_week_boundaries() {
    // Weeks 1-4 are month 1, weeks 5-8 month 2, ...
    assert_eq!(month_index(1), 1);
    assert_eq!(month_index(4), 1);
    assert_eq!(month_index(5), 2);
    assert_eq!(month_index(8), 2);
    assert_eq!(month_index(9), 3);
    // The horizon week sits in month 26 (two years)
    assert_eq!(month_index(HORIZON_WEEKS), 26);
}

#[test]
fn test_next_dose_month_uses_own_frequency() {
    // Dosed at week 1 on a 2-week interval: next dose is week 3, month 1
    assert_eq!(next_dose_month(1, 2), 1);
    // Dosed at week 3 on a 2-week interval: next dose is week 5, month 2
    assert_eq!(next_dose_month(3, 2), 2);
    // Dosed at week 1 on a 6-week interval: next dose is week 7, month 2
    assert_eq!(next_dose_month(1, 6), 2);
}

#[test]
fn test_saturday_shifts_to_monday() {
    // 2026-08-22 is a Saturday
    assert_eq!(display_date(date(2026, 8, 22), true), date(2026, 8, 24));
}

#[test]
fn test_sunday_shifts_to_monday() {
    // 2026-08-23 is a Sunday
    assert_eq!(display_date(date(2026, 8, 23), true), date(2026, 8, 24));
}

#[test]
fn test_weekday_never_shifts() {
    // 2026-08-24 is a Monday, 2026-08-21 a Friday
    assert_eq!(display_date(date(2026, 8, 24), true), date(2026, 8, 24));
    assert_eq!(display_date(date(2026, 8, 21), true), date(2026, 8, 21));
}

#[test]
fn test_shift_disabled_leaves_weekends() {
    assert_eq!(display_date(date(2026, 8, 22), false), date(2026, 8, 22));
    assert_eq!(display_date(date(2026, 8, 23), false), date(2026, 8, 23));
}

#[test]
fn test_clock_advances_week_cycle_and_date_in_lockstep() {
    let mut clock = TreatmentClock::new(date(2026, 1, 5));
    assert_eq!(clock.week(), 1);
    assert_eq!(clock.cycle(), 1);
    assert_eq!(clock.month(), 1);

    clock.advance(2);
    assert_eq!(clock.week(), 3);
    assert_eq!(clock.cycle(), 2);
    assert_eq!(clock.date(), date(2026, 1, 19));

    clock.advance(6);
    assert_eq!(clock.week(), 9);
    assert_eq!(clock.cycle(), 3);
    assert_eq!(clock.month(), 3);
    assert_eq!(clock.date(), date(2026, 3, 2));
}

#[test]
fn test_clock_horizon() {
    let mut clock = TreatmentClock::new(date(2026, 1, 5));
    assert!(!clock.past_horizon());
    // Week 1 + 103 = 104 is still inside the two-year horizon
    clock.advance(103);
    assert!(!clock.past_horizon());
    clock.advance(1);
    assert!(clock.past_horizon());
}
