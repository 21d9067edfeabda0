// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Greedy auto-scheduling of open shifts.
//!
//! One pass per shift: rank the eligible roster and take staff in order
//! until the shift fills or candidates run out. Ranking is by
//! performance rating, highest first, with the staff id as a stable
//! tie-break so a run over the same tables always produces the same
//! assignments.

use crate::assignments::create_assignment;
use crate::audit;
use crate::conflicts::detect_conflicts;
use crate::error::CoreError;
use crate::permissions::{self, PermissionPolicy};
use chrono::{DateTime, Utc};
use rota_audit::Actor;
use rota_domain::{Shift, ShiftId, ShiftStatus, StaffId, StaffMember, UserId, VenueId};
use rota_store::{Clock, Store, Tables};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What auto-scheduling did to one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftFillReport {
    /// The shift the report covers.
    pub shift_id: ShiftId,
    /// Staff assigned by this run, in assignment order.
    pub assigned_staff: Vec<StaffId>,
    /// Slots still empty after the run.
    pub slots_unfilled: u32,
}

/// Greedy auto-scheduler.
pub struct AutoScheduler<'a, S> {
    store: &'a S,
    clock: &'a dyn Clock,
    policy: &'a dyn PermissionPolicy,
}

impl<'a, S: Store> AutoScheduler<'a, S> {
    /// Creates a scheduler over a store handle, a clock, and a
    /// permission policy.
    #[must_use]
    pub const fn new(store: &'a S, clock: &'a dyn Clock, policy: &'a dyn PermissionPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// Fills open shifts from the venue roster, one report per requested
    /// shift.
    ///
    /// Shifts that are not `open` or belong to another venue are
    /// reported untouched with their current unfilled count (missing
    /// shifts report zero). Candidates must be active, available, in the
    /// shift's department, hold the required role when the shift names
    /// one, and be conflict-free against the transaction's view of the
    /// schedule, which includes assignments made earlier in the same
    /// run. The whole run commits as one transaction.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::PermissionDenied` or a store error. Per-staff
    /// capacity and conflict checks never fail the run; they only shrink
    /// the candidate pool.
    pub fn fill_open_shifts(
        &self,
        venue_id: VenueId,
        shift_ids: &[ShiftId],
        assigned_by: UserId,
    ) -> Result<Vec<ShiftFillReport>, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            permissions::check(self.policy, tables, assigned_by, venue_id, "auto_schedule")?;
            let mut reports: Vec<ShiftFillReport> = Vec::with_capacity(shift_ids.len());
            for &shift_id in shift_ids {
                reports.push(fill_one(tables, venue_id, shift_id, assigned_by, now));
            }
            let total_assigned: usize = reports.iter().map(|r| r.assigned_staff.len()).sum();
            audit::record(
                tables,
                Actor::user(assigned_by),
                "AutoSchedule",
                format!(
                    "auto-scheduled {total_assigned} assignments across {} shifts at venue {venue_id}",
                    shift_ids.len()
                ),
                now,
            );
            Ok(reports)
        })
    }
}

fn fill_one(
    tables: &mut Tables,
    venue_id: VenueId,
    shift_id: ShiftId,
    assigned_by: UserId,
    now: DateTime<Utc>,
) -> ShiftFillReport {
    let Some(shift) = tables.shift(shift_id).cloned() else {
        return ShiftFillReport {
            shift_id,
            assigned_staff: Vec::new(),
            slots_unfilled: 0,
        };
    };
    if shift.status != ShiftStatus::Open || shift.venue_id != venue_id {
        return ShiftFillReport {
            shift_id,
            assigned_staff: Vec::new(),
            slots_unfilled: shift.staff_needed.saturating_sub(shift.staff_assigned),
        };
    }

    let needed: usize = usize::try_from(shift.staff_needed.saturating_sub(shift.staff_assigned))
        .unwrap_or(usize::MAX);
    let mut candidates: Vec<StaffId> = ranked_candidates(tables, venue_id, &shift);
    candidates.truncate(needed);

    let mut assigned_staff: Vec<StaffId> = Vec::new();
    for staff_id in candidates {
        match create_assignment(tables, shift_id, staff_id, assigned_by, now) {
            Ok(_) => assigned_staff.push(staff_id),
            Err(error) => {
                // Eligibility was checked against the same tables, so a
                // failure here is a race within the run, not a bug.
                debug!(%shift_id, %staff_id, %error, "auto-schedule candidate skipped");
            }
        }
    }

    let slots_unfilled: u32 = tables
        .shift(shift_id)
        .map_or(0, |s| s.staff_needed.saturating_sub(s.staff_assigned));
    ShiftFillReport {
        shift_id,
        assigned_staff,
        slots_unfilled,
    }
}

/// Ranks eligible roster members for a shift, best first.
fn ranked_candidates(tables: &Tables, venue_id: VenueId, shift: &Shift) -> Vec<StaffId> {
    let mut eligible: Vec<&StaffMember> = tables
        .staff_for_venue(venue_id)
        .filter(|staff| staff.is_active && staff.is_available)
        .filter(|staff| staff.department == shift.department)
        .filter(|staff| {
            shift
                .required_role
                .as_ref()
                .is_none_or(|role| staff.role == *role)
        })
        .filter(|staff| {
            tables
                .active_assignment_for(shift.shift_id, staff.staff_id)
                .is_none()
                && detect_conflicts(tables, staff.staff_id, shift).is_empty()
        })
        .collect();
    eligible.sort_by(|a, b| {
        b.performance_rating
            .total_cmp(&a.performance_rating)
            .then(a.staff_id.cmp(&b.staff_id))
    });
    eligible.into_iter().map(|staff| staff.staff_id).collect()
}
