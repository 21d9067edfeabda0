// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::analytics::{ScheduleAnalytics, compute_schedule_analytics};
use crate::status::ShiftStatus;
use crate::tests::helpers::{date, test_shift, time};
use crate::types::{PayRate, Shift};

fn sample_shifts() -> Vec<Shift> {
    let mut bar: Shift = test_shift(1, date(2024, 6, 1), time(18, 0), time(22, 0));
    bar.pay = PayRate::Hourly { rate: 20.0 };
    bar.status = ShiftStatus::Completed;

    let mut door: Shift = test_shift(2, date(2024, 6, 1), time(20, 0), time(23, 0));
    door.department = String::from("Door");
    door.pay = PayRate::Flat { amount: 100.0 };

    let mut kitchen: Shift = test_shift(3, date(2024, 6, 2), time(10, 0), time(14, 30));
    kitchen.department = String::from("Kitchen");
    kitchen.pay = PayRate::Hourly { rate: 18.0 };

    vec![bar, door, kitchen]
}

#[test]
fn test_totals_and_cost_mix_hourly_and_flat() {
    let analytics: ScheduleAnalytics = compute_schedule_analytics(&sample_shifts());

    assert_eq!(analytics.total_shifts, 3);
    // 4h + 3h + 4.5h
    assert!((analytics.total_hours - 11.5).abs() < f64::EPSILON);
    // 4 * 20 + 100 flat + 4.5 * 18
    assert!((analytics.total_cost - (80.0 + 100.0 + 81.0)).abs() < 1e-9);
}

#[test]
fn test_completion_rate_is_percentage() {
    let analytics: ScheduleAnalytics = compute_schedule_analytics(&sample_shifts());

    assert_eq!(analytics.completed_shifts, 1);
    assert!((analytics.completion_rate - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_department_rollups() {
    let analytics: ScheduleAnalytics = compute_schedule_analytics(&sample_shifts());

    assert_eq!(analytics.by_department.len(), 3);
    let door = &analytics.by_department["Door"];
    assert_eq!(door.shift_count, 1);
    assert!((door.hours - 3.0).abs() < f64::EPSILON);
    assert!((door.cost - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_empty_input_has_zero_completion_rate() {
    let analytics: ScheduleAnalytics = compute_schedule_analytics(&[]);

    assert_eq!(analytics.total_shifts, 0);
    assert!((analytics.completion_rate - 0.0).abs() < f64::EPSILON);
    assert!(analytics.by_department.is_empty());
}

#[test]
fn test_identical_input_produces_identical_output() {
    let shifts: Vec<Shift> = sample_shifts();

    let first: ScheduleAnalytics = compute_schedule_analytics(&shifts);
    let second: ScheduleAnalytics = compute_schedule_analytics(&shifts);

    assert_eq!(first, second);
}
