// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure schedule aggregation.
//!
//! `compute_schedule_analytics` is a pure function of the shift records it
//! is handed: identical input always produces identical output. The
//! per-department map is a `BTreeMap` so iteration order is stable too.

use crate::status::ShiftStatus;
use crate::types::Shift;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregates for one department within a date range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentRollup {
    /// Number of shifts in the department.
    pub shift_count: u32,
    /// Total shift hours.
    pub hours: f64,
    /// Total scheduled cost.
    pub cost: f64,
}

/// Schedule aggregates over a set of shifts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleAnalytics {
    /// Total shift count.
    pub total_shifts: u32,
    /// Total scheduled hours across all shifts.
    pub total_hours: f64,
    /// Total scheduled cost across all shifts.
    pub total_cost: f64,
    /// Number of completed shifts.
    pub completed_shifts: u32,
    /// Completed shifts as a percentage of all shifts (0 when empty).
    pub completion_rate: f64,
    /// Per-department rollups, keyed by department name.
    pub by_department: BTreeMap<String, DepartmentRollup>,
}

/// Computes schedule aggregates over the given shifts.
///
/// Hours are the per-shift `end - start` duration; cost is the hourly
/// rate times hours when the shift pays hourly, else the flat amount.
/// Cancelled shifts still count toward totals; only completed ones move
/// the completion rate.
#[must_use]
pub fn compute_schedule_analytics(shifts: &[Shift]) -> ScheduleAnalytics {
    let mut analytics: ScheduleAnalytics = ScheduleAnalytics::default();

    for shift in shifts {
        let hours: f64 = shift.duration_hours();
        let cost: f64 = shift.cost();

        analytics.total_shifts += 1;
        analytics.total_hours += hours;
        analytics.total_cost += cost;
        if shift.status == ShiftStatus::Completed {
            analytics.completed_shifts += 1;
        }

        let rollup: &mut DepartmentRollup = analytics
            .by_department
            .entry(shift.department.clone())
            .or_default();
        rollup.shift_count += 1;
        rollup.hours += hours;
        rollup.cost += cost;
    }

    if analytics.total_shifts > 0 {
        analytics.completion_rate =
            f64::from(analytics.completed_shifts) / f64::from(analytics.total_shifts) * 100.0;
    }

    analytics
}
