// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conflict detection for staff assignments.
//!
//! The detector answers: does this staff member already hold a
//! non-cancelled assignment whose shift overlaps the candidate shift in
//! time? The same scan runs in two places: through
//! [`ConflictDetector::check_conflicts`] as a standalone read, and via
//! [`detect_conflicts`] inside every write transaction that creates an
//! assignment, so the check and the write commit atomically.

use crate::error::CoreError;
use rota_domain::{Conflict, ConflictKind, Shift, ShiftId, StaffId, shifts_overlap};
use rota_store::{Store, Tables};

/// Cap on the number of existing assignments scanned per check.
///
/// A staff member with a longer history than this needs pagination at
/// the query layer before the cap matters.
pub const CONFLICT_SCAN_CAP: usize = 500;

/// Scans a staff member's non-cancelled assignments for shifts that
/// overlap the candidate. Returns every conflict found.
#[must_use]
pub fn detect_conflicts(tables: &Tables, staff_id: StaffId, candidate: &Shift) -> Vec<Conflict> {
    let mut conflicts: Vec<Conflict> = Vec::new();
    for assignment in tables
        .assignments_for_staff(staff_id)
        .filter(|a| a.blocks_schedule())
        .take(CONFLICT_SCAN_CAP)
    {
        // A dangling assignment (shift hard-deleted) cannot conflict.
        let Some(existing) = tables.shift(assignment.shift_id) else {
            continue;
        };
        if shifts_overlap(existing, candidate) {
            conflicts.push(Conflict {
                kind: ConflictKind::Overlap,
                candidate_shift_id: candidate.shift_id,
                existing_shift_id: existing.shift_id,
                detail: format!(
                    "Staff member {staff_id} is already assigned to shift {} on {} from {} to {}",
                    existing.shift_id, existing.shift_date, existing.start_time, existing.end_time
                ),
                suggested_resolution: String::from(
                    "Pick a different staff member or reschedule one of the shifts",
                ),
            });
        }
    }
    conflicts
}

/// Read-only conflict checks against the store.
pub struct ConflictDetector<'a, S> {
    store: &'a S,
}

impl<'a, S: Store> ConflictDetector<'a, S> {
    /// Creates a detector over a store handle.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Returns every conflict between a staff member's current
    /// assignments and the candidate shift.
    ///
    /// An empty vector means the staff member is free to take the shift
    /// as of this read; writers must re-run the scan inside their own
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the shift does not exist, or a
    /// store error.
    pub fn check_conflicts(
        &self,
        staff_id: StaffId,
        shift_id: ShiftId,
    ) -> Result<Vec<Conflict>, CoreError> {
        self.store.read(|tables| {
            let candidate: &Shift = tables
                .shift(shift_id)
                .ok_or_else(|| CoreError::not_found("shift", shift_id))?;
            Ok(detect_conflicts(tables, staff_id, candidate))
        })
    }
}
