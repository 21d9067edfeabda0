// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff-initiated scheduling workflows: shift swaps and drop/pickup
//! requests.
//!
//! Proposals are checked twice. Proposing fails fast on conditions the
//! proposer can see (no assignment to hand over, shift not open, an
//! obvious overlap). Approval re-checks everything inside its own
//! transaction, because the schedule may have changed between the two;
//! an approval that no longer applies rolls back whole and leaves the
//! proposal pending.

use crate::assignments::{cancel_assignment, create_assignment, release_slot};
use crate::audit;
use crate::conflicts::detect_conflicts;
use crate::error::CoreError;
use crate::permissions::{self, PermissionPolicy};
use chrono::{DateTime, Utc};
use rota_audit::Actor;
use rota_domain::{
    DomainError, ProposalStatus, RequestId, RequestKind, Shift, ShiftId, ShiftRequest, ShiftStatus,
    ShiftSwap, StaffId, SwapId, UserId,
};
use rota_store::{Clock, Store};

/// Swap and drop/pickup operations.
pub struct WorkflowManager<'a, S> {
    store: &'a S,
    clock: &'a dyn Clock,
    policy: &'a dyn PermissionPolicy,
}

impl<'a, S: Store> WorkflowManager<'a, S> {
    /// Creates a manager over a store handle, a clock, and a permission
    /// policy.
    #[must_use]
    pub const fn new(store: &'a S, clock: &'a dyn Clock, policy: &'a dyn PermissionPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// Proposes that `requested_staff_id` take over the shift currently
    /// held by `original_staff_id`.
    ///
    /// Fails fast when the handover is visibly impossible; the decisive
    /// checks re-run at approval time.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` with `DomainError::SameStaffSwap`
    /// when both staff ids match, `CoreError::NotFound` when the shift or
    /// the original staff member's active assignment is missing,
    /// `CoreError::SchedulingConflict` when the requested staff member
    /// already holds an overlapping shift, or a store error.
    pub fn propose_swap(
        &self,
        shift_id: ShiftId,
        original_staff_id: StaffId,
        requested_staff_id: StaffId,
        reason: Option<String>,
    ) -> Result<ShiftSwap, CoreError> {
        if original_staff_id == requested_staff_id {
            return Err(CoreError::Validation(DomainError::SameStaffSwap));
        }
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let shift: Shift = tables
                .shift(shift_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift", shift_id))?;
            if tables.staff_member(requested_staff_id).is_none() {
                return Err(CoreError::not_found("staff_member", requested_staff_id));
            }
            tables
                .active_assignment_for(shift_id, original_staff_id)
                .ok_or_else(|| CoreError::not_found("assignment", shift_id))?;
            let conflicts = detect_conflicts(tables, requested_staff_id, &shift);
            if !conflicts.is_empty() {
                return Err(CoreError::SchedulingConflict { conflicts });
            }
            let swap_id: SwapId = tables.add_swap(|id| ShiftSwap {
                swap_id: id,
                shift_id,
                original_staff_id,
                requested_staff_id,
                reason,
                status: ProposalStatus::Pending,
                requested_at: now,
                decided_by: None,
                decided_at: None,
                denial_reason: None,
            });
            tables
                .swap(swap_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift_swap", swap_id))
        })
    }

    /// Approves a pending swap: cancels the original assignment and
    /// assigns the requested staff member, in one transaction.
    ///
    /// If the requested staff member can no longer take the shift, the
    /// whole transaction rolls back and the swap stays pending.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` when the swap or the original
    /// assignment is missing, `CoreError::InvalidTransition` when the
    /// swap is already decided, `CoreError::PermissionDenied`,
    /// `CoreError::SchedulingConflict` or `CoreError::ShiftFull` from the
    /// re-check, or a store error.
    pub fn approve_swap(&self, swap_id: SwapId, approved_by: UserId) -> Result<ShiftSwap, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let swap: ShiftSwap = tables
                .swap(swap_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift_swap", swap_id))?;
            ensure_pending(swap.status, ProposalStatus::Approved, "shift_swap")?;
            let venue_id = tables
                .shift(swap.shift_id)
                .map(|s| s.venue_id)
                .ok_or_else(|| CoreError::not_found("shift", swap.shift_id))?;
            permissions::check(self.policy, tables, approved_by, venue_id, "approve_swap")?;
            let original = tables
                .active_assignment_for(swap.shift_id, swap.original_staff_id)
                .map(|a| a.assignment_id)
                .ok_or_else(|| CoreError::not_found("assignment", swap.shift_id))?;
            cancel_assignment(
                tables,
                original,
                format!("Cancelled by approved swap {swap_id}"),
            );
            create_assignment(
                tables,
                swap.shift_id,
                swap.requested_staff_id,
                approved_by,
                now,
            )?;
            if let Some(record) = tables.swap_mut(swap_id) {
                record.status = ProposalStatus::Approved;
                record.decided_by = Some(approved_by);
                record.decided_at = Some(now);
            }
            audit::record(
                tables,
                Actor::user(approved_by),
                "ApproveSwap",
                format!(
                    "approved swap {swap_id}: shift {} from staff {} to staff {}",
                    swap.shift_id, swap.original_staff_id, swap.requested_staff_id
                ),
                now,
            );
            tables
                .swap(swap_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift_swap", swap_id))
        })
    }

    /// Denies a pending swap. The original assignment is untouched.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` when the swap or its shift is
    /// missing, `CoreError::InvalidTransition` when the swap is already
    /// decided, `CoreError::PermissionDenied`, or a store error.
    pub fn deny_swap(
        &self,
        swap_id: SwapId,
        denied_by: UserId,
        denial_reason: Option<String>,
    ) -> Result<ShiftSwap, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let swap: ShiftSwap = tables
                .swap(swap_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift_swap", swap_id))?;
            ensure_pending(swap.status, ProposalStatus::Denied, "shift_swap")?;
            let venue_id = tables
                .shift(swap.shift_id)
                .map(|s| s.venue_id)
                .ok_or_else(|| CoreError::not_found("shift", swap.shift_id))?;
            permissions::check(self.policy, tables, denied_by, venue_id, "approve_swap")?;
            if let Some(record) = tables.swap_mut(swap_id) {
                record.status = ProposalStatus::Denied;
                record.decided_by = Some(denied_by);
                record.decided_at = Some(now);
                record.denial_reason = denial_reason;
            }
            audit::record(
                tables,
                Actor::user(denied_by),
                "DenySwap",
                format!("denied swap {swap_id}"),
                now,
            );
            tables
                .swap(swap_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift_swap", swap_id))
        })
    }

    /// Proposes a drop (staff wants off an assigned shift) or pickup
    /// (staff wants an open shift).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` when the shift, staff member, or
    /// (for drops) the active assignment is missing; for pickups,
    /// `CoreError::Validation` with `DomainError::ShiftNotOpen` when the
    /// shift is not open, `CoreError::ShiftFull`, or
    /// `CoreError::SchedulingConflict`; or a store error.
    pub fn propose_request(
        &self,
        kind: RequestKind,
        shift_id: ShiftId,
        staff_id: StaffId,
        reason: Option<String>,
    ) -> Result<ShiftRequest, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let shift: Shift = tables
                .shift(shift_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift", shift_id))?;
            if tables.staff_member(staff_id).is_none() {
                return Err(CoreError::not_found("staff_member", staff_id));
            }
            match kind {
                RequestKind::Drop => {
                    tables
                        .active_assignment_for(shift_id, staff_id)
                        .ok_or_else(|| CoreError::not_found("assignment", shift_id))?;
                }
                RequestKind::Pickup => {
                    if shift.status != ShiftStatus::Open {
                        return Err(CoreError::Validation(DomainError::ShiftNotOpen {
                            status: shift.status,
                        }));
                    }
                    if shift.is_full() {
                        return Err(CoreError::ShiftFull {
                            shift_id,
                            staff_needed: shift.staff_needed,
                        });
                    }
                    let conflicts = detect_conflicts(tables, staff_id, &shift);
                    if !conflicts.is_empty() {
                        return Err(CoreError::SchedulingConflict { conflicts });
                    }
                }
            }
            let request_id: RequestId = tables.add_request(|id| ShiftRequest {
                request_id: id,
                kind,
                shift_id,
                staff_id,
                reason,
                status: ProposalStatus::Pending,
                requested_at: now,
                decided_by: None,
                decided_at: None,
                denial_reason: None,
            });
            tables
                .request(request_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift_request", request_id))
        })
    }

    /// Approves a pending drop or pickup request.
    ///
    /// A drop removes the assignment outright, so the slot reopens and
    /// the staff member's history carries no cancelled row for a shift
    /// they were excused from. A pickup assigns the staff member with the
    /// full capacity and conflict re-check; a failed re-check rolls the
    /// transaction back and leaves the request pending.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` when the request, its shift, or (for
    /// drops) the active assignment is missing,
    /// `CoreError::InvalidTransition` when the request is already
    /// decided, `CoreError::PermissionDenied`,
    /// `CoreError::SchedulingConflict` or `CoreError::ShiftFull` from the
    /// pickup re-check, or a store error.
    pub fn approve_request(
        &self,
        request_id: RequestId,
        approved_by: UserId,
    ) -> Result<ShiftRequest, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let request: ShiftRequest = tables
                .request(request_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift_request", request_id))?;
            ensure_pending(request.status, ProposalStatus::Approved, "shift_request")?;
            let venue_id = tables
                .shift(request.shift_id)
                .map(|s| s.venue_id)
                .ok_or_else(|| CoreError::not_found("shift", request.shift_id))?;
            permissions::check(self.policy, tables, approved_by, venue_id, "approve_request")?;
            match request.kind {
                RequestKind::Drop => {
                    let assignment = tables
                        .active_assignment_for(request.shift_id, request.staff_id)
                        .map(|a| (a.assignment_id, a.counts_toward_staffing()))
                        .ok_or_else(|| CoreError::not_found("assignment", request.shift_id))?;
                    let (assignment_id, was_counting) = assignment;
                    if tables.remove_assignment(assignment_id).is_some() && was_counting {
                        release_slot(tables, request.shift_id);
                    }
                }
                RequestKind::Pickup => {
                    create_assignment(
                        tables,
                        request.shift_id,
                        request.staff_id,
                        approved_by,
                        now,
                    )?;
                }
            }
            if let Some(record) = tables.request_mut(request_id) {
                record.status = ProposalStatus::Approved;
                record.decided_by = Some(approved_by);
                record.decided_at = Some(now);
            }
            audit::record(
                tables,
                Actor::user(approved_by),
                "ApproveRequest",
                format!(
                    "approved {} request {request_id} for staff {} on shift {}",
                    request.kind, request.staff_id, request.shift_id
                ),
                now,
            );
            tables
                .request(request_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift_request", request_id))
        })
    }

    /// Denies a pending drop or pickup request.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` when the request or its shift is
    /// missing, `CoreError::InvalidTransition` when the request is
    /// already decided, `CoreError::PermissionDenied`, or a store error.
    pub fn deny_request(
        &self,
        request_id: RequestId,
        denied_by: UserId,
        denial_reason: Option<String>,
    ) -> Result<ShiftRequest, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let request: ShiftRequest = tables
                .request(request_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift_request", request_id))?;
            ensure_pending(request.status, ProposalStatus::Denied, "shift_request")?;
            let venue_id = tables
                .shift(request.shift_id)
                .map(|s| s.venue_id)
                .ok_or_else(|| CoreError::not_found("shift", request.shift_id))?;
            permissions::check(self.policy, tables, denied_by, venue_id, "approve_request")?;
            if let Some(record) = tables.request_mut(request_id) {
                record.status = ProposalStatus::Denied;
                record.decided_by = Some(denied_by);
                record.decided_at = Some(now);
                record.denial_reason = denial_reason;
            }
            audit::record(
                tables,
                Actor::user(denied_by),
                "DenyRequest",
                format!("denied {} request {request_id}", request.kind),
                now,
            );
            tables
                .request(request_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift_request", request_id))
        })
    }
}

fn ensure_pending(
    current: ProposalStatus,
    target: ProposalStatus,
    entity: &'static str,
) -> Result<(), CoreError> {
    if current.can_transition_to(target) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            entity,
            from: current.to_string(),
            to: target.to_string(),
        })
    }
}
