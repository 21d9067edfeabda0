// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Randomized soak of the assignment write paths.
//!
//! Drives a few hundred random operations through the managers with a
//! fixed seed, then asserts the two structural invariants the engine
//! promises: no staff member ever holds two overlapping non-cancelled
//! assignments, and every shift's cached counter matches a recount.

use super::helpers::{MANAGER, VENUE, add_staff, clock, date, shift_draft, time};
use crate::assignments::AssignmentManager;
use crate::permissions::AllowAll;
use crate::scheduler::AutoScheduler;
use crate::shifts::ShiftManager;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use rota_domain::{Assignment, AssignmentStatus, ShiftId, StaffId, shifts_overlap};
use rota_store::{MemoryStore, Store, StoreError};

fn assert_invariants(store: &MemoryStore) {
    store
        .read(|tables| {
            // No staff member holds two overlapping blocking assignments.
            let blocking: Vec<&Assignment> = tables
                .assignments()
                .filter(|a| a.blocks_schedule())
                .collect();
            for (i, a) in blocking.iter().enumerate() {
                for b in &blocking[i + 1..] {
                    if a.staff_id != b.staff_id {
                        continue;
                    }
                    let (Some(shift_a), Some(shift_b)) =
                        (tables.shift(a.shift_id), tables.shift(b.shift_id))
                    else {
                        continue;
                    };
                    assert!(
                        !shifts_overlap(shift_a, shift_b),
                        "staff {} double-booked across shifts {} and {}",
                        a.staff_id,
                        shift_a.shift_id,
                        shift_b.shift_id
                    );
                }
            }

            // Every cached counter matches a recount.
            for shift in tables.shifts() {
                let counted: u32 = u32::try_from(
                    tables
                        .assignments_for_shift(shift.shift_id)
                        .filter(|a| a.counts_toward_staffing())
                        .count(),
                )
                .unwrap();
                assert_eq!(
                    shift.staff_assigned, counted,
                    "cached count drifted on shift {}",
                    shift.shift_id
                );
                assert!(shift.staff_assigned <= shift.staff_needed);
            }
            Ok::<_, StoreError>(())
        })
        .unwrap();
}

#[test]
fn test_random_operations_never_double_book_or_drift_counts() {
    let store: MemoryStore = MemoryStore::new();
    let clock = clock();
    let shifts: ShiftManager<'_, MemoryStore> = ShiftManager::new(&store, &clock, &AllowAll);
    let assignments: AssignmentManager<'_, MemoryStore> = AssignmentManager::new(&store, &clock);
    let scheduler: AutoScheduler<'_, MemoryStore> = AutoScheduler::new(&store, &clock, &AllowAll);

    let staff: Vec<StaffId> = (0..8).map(|i| add_staff(&store, i + 2, 3.5)).collect();
    let mut shift_ids: Vec<ShiftId> = Vec::new();
    let mut rng: StdRng = StdRng::seed_from_u64(0x5eed);

    for step in 0..300 {
        match rng.random_range(0..5_u8) {
            // Create a shift on one of a handful of days with one of a
            // few overlapping windows.
            0 => {
                let day: u32 = rng.random_range(1..6);
                let start: u32 = rng.random_range(8..20);
                let len: u32 = rng.random_range(2..5);
                let needed: u32 = rng.random_range(1..4);
                let shift = shifts
                    .create_shift(
                        &shift_draft(
                            date(2024, 7, day),
                            time(start, 0),
                            time(start + len, 0),
                            needed,
                        ),
                        MANAGER,
                    )
                    .unwrap();
                shift_ids.push(shift.shift_id);
            }
            // Try a direct assignment; rejection is a valid outcome.
            1 => {
                if shift_ids.is_empty() {
                    continue;
                }
                let shift_id: ShiftId = shift_ids[rng.random_range(0..shift_ids.len())];
                let member: StaffId = staff[rng.random_range(0..staff.len())];
                let _ = assignments.assign(shift_id, member, MANAGER);
            }
            // Cancel a random assignment.
            2 => {
                let ids: Vec<_> = store
                    .read(|tables| {
                        Ok::<_, StoreError>(
                            tables
                                .assignments()
                                .filter(|a| a.blocks_schedule())
                                .map(|a| a.assignment_id)
                                .collect::<Vec<_>>(),
                        )
                    })
                    .unwrap();
                if ids.is_empty() {
                    continue;
                }
                let id = ids[rng.random_range(0..ids.len())];
                let _ = assignments.update_status(
                    id,
                    AssignmentStatus::Cancelled,
                    None,
                    MANAGER,
                );
            }
            // Auto-schedule a random slice of shifts.
            3 => {
                if shift_ids.is_empty() {
                    continue;
                }
                let take: usize = rng.random_range(1..=shift_ids.len().min(4));
                let picked: Vec<ShiftId> = shift_ids.iter().copied().take(take).collect();
                scheduler.fill_open_shifts(VENUE, &picked, MANAGER).unwrap();
            }
            // Delete a random shift, cascading cancellation.
            _ => {
                if shift_ids.is_empty() || step % 7 != 0 {
                    continue;
                }
                let index: usize = rng.random_range(0..shift_ids.len());
                let shift_id: ShiftId = shift_ids.swap_remove(index);
                shifts.delete_shift(shift_id, MANAGER).unwrap();
            }
        }

        if step % 25 == 0 {
            assert_invariants(&store);
        }
    }

    assert_invariants(&store);
}
