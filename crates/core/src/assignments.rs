// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment lifecycle: binding staff to shifts, status transitions,
//! and the cached `staff_assigned` bookkeeping.

use crate::audit;
use crate::conflicts::detect_conflicts;
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rota_audit::Actor;
use rota_domain::{
    Assignment, AssignmentId, AssignmentStatus, Shift, ShiftId, ShiftStatus, StaffId, UserId,
};
use rota_store::{Clock, Store, Tables};

/// Creates an assignment inside an open transaction.
///
/// Checks capacity and conflicts against the transaction's view of the
/// tables, so the caller's whole write commits or rolls back with the
/// check. Updates the shift's cached counter and flips `open` shifts to
/// `filled` when the last slot is taken.
///
/// # Errors
///
/// Returns `CoreError::NotFound`, `CoreError::ShiftFull`, or
/// `CoreError::SchedulingConflict`.
pub fn create_assignment(
    tables: &mut Tables,
    shift_id: ShiftId,
    staff_id: StaffId,
    assigned_by: UserId,
    now: DateTime<Utc>,
) -> Result<AssignmentId, CoreError> {
    let shift: &Shift = tables
        .shift(shift_id)
        .ok_or_else(|| CoreError::not_found("shift", shift_id))?;
    if shift.is_full() {
        return Err(CoreError::ShiftFull {
            shift_id,
            staff_needed: shift.staff_needed,
        });
    }
    if tables.staff_member(staff_id).is_none() {
        return Err(CoreError::not_found("staff_member", staff_id));
    }
    if tables.active_assignment_for(shift_id, staff_id).is_some() {
        return Err(CoreError::Store(rota_store::StoreError::Constraint {
            message: format!("staff member {staff_id} already holds shift {shift_id}"),
        }));
    }
    let candidate: Shift = shift.clone();
    let conflicts = detect_conflicts(tables, staff_id, &candidate);
    if !conflicts.is_empty() {
        return Err(CoreError::SchedulingConflict { conflicts });
    }

    let assignment_id: AssignmentId = tables.add_assignment(|id| Assignment {
        assignment_id: id,
        shift_id,
        staff_id,
        assigned_by,
        status: AssignmentStatus::Assigned,
        assigned_at: now,
        confirmed_at: None,
        declined_at: None,
        decline_reason: None,
        notes: None,
    });
    take_slot(tables, shift_id);
    Ok(assignment_id)
}

/// Bumps a shift's cached counter after a counting assignment appears
/// and flips `open` to `filled` at capacity.
fn take_slot(tables: &mut Tables, shift_id: ShiftId) {
    if let Some(shift) = tables.shift_mut(shift_id) {
        shift.staff_assigned += 1;
        if shift.status == ShiftStatus::Open && shift.is_full() {
            shift.status = ShiftStatus::Filled;
        }
    }
}

/// Drops a shift's cached counter after a counting assignment stops
/// counting and reopens `filled` shifts that fall below capacity.
pub fn release_slot(tables: &mut Tables, shift_id: ShiftId) {
    if let Some(shift) = tables.shift_mut(shift_id) {
        shift.staff_assigned = shift.staff_assigned.saturating_sub(1);
        if shift.status == ShiftStatus::Filled && !shift.is_full() {
            shift.status = ShiftStatus::Open;
        }
    }
}

/// Cancels an assignment inside an open transaction, releasing its slot
/// when it was counting. Used by swap approval and shift deletion.
pub fn cancel_assignment(tables: &mut Tables, assignment_id: AssignmentId, note: String) {
    let Some(assignment) = tables.assignment_mut(assignment_id) else {
        return;
    };
    if assignment.status == AssignmentStatus::Cancelled {
        return;
    }
    let was_counting: bool = assignment.counts_toward_staffing();
    let shift_id: ShiftId = assignment.shift_id;
    assignment.status = AssignmentStatus::Cancelled;
    assignment.notes = Some(note);
    if was_counting {
        release_slot(tables, shift_id);
    }
}

/// Direct assignment operations.
pub struct AssignmentManager<'a, S> {
    store: &'a S,
    clock: &'a dyn Clock,
}

impl<'a, S: Store> AssignmentManager<'a, S> {
    /// Creates a manager over a store handle and a clock.
    #[must_use]
    pub const fn new(store: &'a S, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    /// Assigns a staff member to a shift.
    ///
    /// The capacity and conflict checks run inside the same transaction
    /// as the insert.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the shift or staff member does
    /// not exist, `CoreError::ShiftFull` when every slot is taken,
    /// `CoreError::SchedulingConflict` when the staff member holds an
    /// overlapping shift, or a store error.
    pub fn assign(
        &self,
        shift_id: ShiftId,
        staff_id: StaffId,
        assigned_by: UserId,
    ) -> Result<Assignment, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let assignment_id: AssignmentId =
                create_assignment(tables, shift_id, staff_id, assigned_by, now)?;
            audit::record(
                tables,
                Actor::user(assigned_by),
                "AssignStaff",
                format!("assigned staff {staff_id} to shift {shift_id}"),
                now,
            );
            tables
                .assignment(assignment_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("assignment", assignment_id))
        })
    }

    /// Fetches an assignment by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the assignment does not exist.
    pub fn get(&self, assignment_id: AssignmentId) -> Result<Assignment, CoreError> {
        self.store.read(|tables| {
            tables
                .assignment(assignment_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("assignment", assignment_id))
        })
    }

    /// Lists every assignment on a shift, in id order.
    ///
    /// # Errors
    ///
    /// Returns a store error if the read fails.
    pub fn list_for_shift(&self, shift_id: ShiftId) -> Result<Vec<Assignment>, CoreError> {
        self.store
            .read(|tables| Ok(tables.assignments_for_shift(shift_id).cloned().collect()))
    }

    /// Lists every assignment held by a staff member, in id order.
    ///
    /// # Errors
    ///
    /// Returns a store error if the read fails.
    pub fn list_for_staff(&self, staff_id: StaffId) -> Result<Vec<Assignment>, CoreError> {
        self.store
            .read(|tables| Ok(tables.assignments_for_staff(staff_id).cloned().collect()))
    }

    /// Moves an assignment to a new status.
    ///
    /// Confirming stamps `confirmed_at`; declining stamps `declined_at`
    /// and the reason. When the assignment stops counting toward
    /// staffing, the shift's slot is released.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the assignment does not exist,
    /// `CoreError::InvalidTransition` when the status machine forbids the
    /// move, or a store error.
    pub fn update_status(
        &self,
        assignment_id: AssignmentId,
        new_status: AssignmentStatus,
        reason: Option<String>,
        changed_by: UserId,
    ) -> Result<Assignment, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let assignment = tables
                .assignment_mut(assignment_id)
                .ok_or_else(|| CoreError::not_found("assignment", assignment_id))?;
            let old_status: AssignmentStatus = assignment.status;
            if !old_status.can_transition_to(new_status) {
                return Err(CoreError::InvalidTransition {
                    entity: "assignment",
                    from: old_status.to_string(),
                    to: new_status.to_string(),
                });
            }
            assignment.status = new_status;
            match new_status {
                AssignmentStatus::Confirmed => assignment.confirmed_at = Some(now),
                AssignmentStatus::Declined => {
                    assignment.declined_at = Some(now);
                    assignment.decline_reason = reason;
                }
                AssignmentStatus::Cancelled => {
                    if let Some(note) = reason {
                        assignment.notes = Some(note);
                    }
                }
                AssignmentStatus::Assigned => {}
            }
            let shift_id: ShiftId = assignment.shift_id;
            let counted_before: bool = matches!(
                old_status,
                AssignmentStatus::Assigned | AssignmentStatus::Confirmed
            );
            let counts_now: bool = matches!(
                new_status,
                AssignmentStatus::Assigned | AssignmentStatus::Confirmed
            );
            if counted_before && !counts_now {
                release_slot(tables, shift_id);
            }
            audit::record(
                tables,
                Actor::user(changed_by),
                "UpdateAssignmentStatus",
                format!("assignment {assignment_id} moved from {old_status} to {new_status}"),
                now,
            );
            tables
                .assignment(assignment_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("assignment", assignment_id))
        })
    }

    /// Hard-deletes an assignment, releasing its slot when it was
    /// counting.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the assignment does not exist,
    /// or a store error.
    pub fn remove(&self, assignment_id: AssignmentId, removed_by: UserId) -> Result<(), CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let assignment = tables
                .remove_assignment(assignment_id)
                .ok_or_else(|| CoreError::not_found("assignment", assignment_id))?;
            if assignment.counts_toward_staffing() {
                release_slot(tables, assignment.shift_id);
            }
            audit::record(
                tables,
                Actor::user(removed_by),
                "RemoveAssignment",
                format!(
                    "removed assignment {assignment_id} of staff {} from shift {}",
                    assignment.staff_id, assignment.shift_id
                ),
                now,
            );
            Ok(())
        })
    }
}
