// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{MANAGER, VENUE, add_staff, add_staff_in, clock, date, shift_draft, time};
use crate::assignments::AssignmentManager;
use crate::permissions::AllowAll;
use crate::scheduler::{AutoScheduler, ShiftFillReport};
use crate::shifts::ShiftManager;
use rota_domain::{Shift, ShiftDraft, ShiftId, ShiftStatus, StaffId};
use rota_store::{MemoryStore, Store, StoreError};

#[test]
fn test_fills_by_rating_with_stable_tie_break() {
    let store: MemoryStore = MemoryStore::new();
    let clock = clock();
    let shifts: ShiftManager<'_, MemoryStore> = ShiftManager::new(&store, &clock, &AllowAll);
    let scheduler: AutoScheduler<'_, MemoryStore> = AutoScheduler::new(&store, &clock, &AllowAll);

    add_staff(&store, 2, 3.0);
    let tied_first: StaffId = add_staff(&store, 3, 4.5);
    let tied_second: StaffId = add_staff(&store, 4, 4.5);
    let shift: Shift = shifts
        .create_shift(
            &shift_draft(date(2024, 6, 7), time(18, 0), time(23, 0), 2),
            MANAGER,
        )
        .unwrap();

    let reports: Vec<ShiftFillReport> = scheduler
        .fill_open_shifts(VENUE, &[shift.shift_id], MANAGER)
        .unwrap();

    assert_eq!(reports.len(), 1);
    // Ties break toward the lower staff id, so the run is deterministic.
    assert_eq!(reports[0].assigned_staff, vec![tied_first, tied_second]);
    assert_eq!(reports[0].slots_unfilled, 0);

    let after: Shift = shifts.get_shift(shift.shift_id).unwrap();
    assert_eq!(after.status, ShiftStatus::Filled);
    assert_eq!(after.staff_assigned, 2);
}

#[test]
fn test_skips_wrong_department_role_and_unavailable_staff() {
    let store: MemoryStore = MemoryStore::new();
    let clock = clock();
    let shifts: ShiftManager<'_, MemoryStore> = ShiftManager::new(&store, &clock, &AllowAll);
    let scheduler: AutoScheduler<'_, MemoryStore> = AutoScheduler::new(&store, &clock, &AllowAll);

    add_staff_in(&store, 2, 5.0, "Kitchen", "Chef");
    add_staff_in(&store, 3, 5.0, "Bar", "Barback");
    let unavailable: StaffId = add_staff(&store, 4, 5.0);
    store
        .transaction(|tables| {
            tables
                .staff_member_mut(unavailable)
                .map(|s| s.is_available = false)
                .ok_or(StoreError::Constraint {
                    message: String::from("missing staff"),
                })
        })
        .unwrap();
    let qualified: StaffId = add_staff(&store, 5, 2.0);

    let mut draft: ShiftDraft = shift_draft(date(2024, 6, 7), time(18, 0), time(23, 0), 3);
    draft.required_role = Some(String::from("Bartender"));
    let shift: Shift = shifts.create_shift(&draft, MANAGER).unwrap();

    let reports: Vec<ShiftFillReport> = scheduler
        .fill_open_shifts(VENUE, &[shift.shift_id], MANAGER)
        .unwrap();

    assert_eq!(reports[0].assigned_staff, vec![qualified]);
    assert_eq!(reports[0].slots_unfilled, 2);
}

#[test]
fn test_skips_staff_with_conflicting_assignments_across_shifts() {
    let store: MemoryStore = MemoryStore::new();
    let clock = clock();
    let shifts: ShiftManager<'_, MemoryStore> = ShiftManager::new(&store, &clock, &AllowAll);
    let scheduler: AutoScheduler<'_, MemoryStore> = AutoScheduler::new(&store, &clock, &AllowAll);

    // Best-rated staff member, but both shifts overlap, so one run can
    // only use them once.
    let star: StaffId = add_staff(&store, 2, 5.0);
    let backup: StaffId = add_staff(&store, 3, 3.0);
    let first: Shift = shifts
        .create_shift(
            &shift_draft(date(2024, 6, 7), time(18, 0), time(23, 0), 1),
            MANAGER,
        )
        .unwrap();
    let second: Shift = shifts
        .create_shift(
            &shift_draft(date(2024, 6, 7), time(20, 0), time(23, 30), 1),
            MANAGER,
        )
        .unwrap();

    let reports: Vec<ShiftFillReport> = scheduler
        .fill_open_shifts(VENUE, &[first.shift_id, second.shift_id], MANAGER)
        .unwrap();

    assert_eq!(reports[0].assigned_staff, vec![star]);
    assert_eq!(reports[1].assigned_staff, vec![backup]);
}

#[test]
fn test_non_open_and_foreign_shifts_are_left_alone() {
    let store: MemoryStore = MemoryStore::new();
    let clock = clock();
    let shifts: ShiftManager<'_, MemoryStore> = ShiftManager::new(&store, &clock, &AllowAll);
    let scheduler: AutoScheduler<'_, MemoryStore> = AutoScheduler::new(&store, &clock, &AllowAll);
    add_staff(&store, 2, 4.0);

    let mut unpublished: ShiftDraft = shift_draft(date(2024, 6, 7), time(18, 0), time(23, 0), 2);
    unpublished.publish = false;
    let draft_shift: Shift = shifts.create_shift(&unpublished, MANAGER).unwrap();

    let reports: Vec<ShiftFillReport> = scheduler
        .fill_open_shifts(VENUE, &[draft_shift.shift_id, ShiftId::new(999)], MANAGER)
        .unwrap();

    assert!(reports[0].assigned_staff.is_empty());
    assert_eq!(reports[0].slots_unfilled, 2);
    assert!(reports[1].assigned_staff.is_empty());
    assert_eq!(reports[1].slots_unfilled, 0);
    assert_eq!(
        shifts.get_shift(draft_shift.shift_id).unwrap().staff_assigned,
        0
    );
}

#[test]
fn test_partial_fill_reports_remaining_slots() {
    let store: MemoryStore = MemoryStore::new();
    let clock = clock();
    let shifts: ShiftManager<'_, MemoryStore> = ShiftManager::new(&store, &clock, &AllowAll);
    let scheduler: AutoScheduler<'_, MemoryStore> = AutoScheduler::new(&store, &clock, &AllowAll);
    let assignments: AssignmentManager<'_, MemoryStore> = AssignmentManager::new(&store, &clock);

    let already: StaffId = add_staff(&store, 2, 4.0);
    let fresh: StaffId = add_staff(&store, 3, 4.0);
    let shift: Shift = shifts
        .create_shift(
            &shift_draft(date(2024, 6, 7), time(18, 0), time(23, 0), 3),
            MANAGER,
        )
        .unwrap();
    assignments.assign(shift.shift_id, already, MANAGER).unwrap();

    let reports: Vec<ShiftFillReport> = scheduler
        .fill_open_shifts(VENUE, &[shift.shift_id], MANAGER)
        .unwrap();

    // The already-assigned member is not assigned twice.
    assert_eq!(reports[0].assigned_staff, vec![fresh]);
    assert_eq!(reports[0].slots_unfilled, 1);
}
