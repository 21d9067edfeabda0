// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tables::Tables;
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rota_domain::{
    Assignment, AssignmentId, AssignmentStatus, CheckIn, CheckInId, NoteId, PayRate, Shift,
    ShiftId, ShiftNote, ShiftStatus, StaffId, UserId, VenueId,
};

fn build_shift(shift_id: ShiftId) -> Shift {
    Shift {
        shift_id,
        venue_id: VenueId::new(1),
        event_id: None,
        shift_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        department: String::from("Bar"),
        required_role: None,
        staff_needed: 1,
        staff_assigned: 0,
        pay: PayRate::Flat { amount: 80.0 },
        status: ShiftStatus::Open,
        created_by: UserId::new(1),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        recurring_rule_id: None,
        remarks: None,
    }
}

fn build_assignment(
    assignment_id: AssignmentId,
    shift_id: ShiftId,
    staff_id: StaffId,
    status: AssignmentStatus,
) -> Assignment {
    Assignment {
        assignment_id,
        shift_id,
        staff_id,
        assigned_by: UserId::new(1),
        status,
        assigned_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        confirmed_at: None,
        declined_at: None,
        decline_reason: None,
        notes: None,
    }
}

#[test]
fn test_ids_are_unique_across_collections() {
    let mut tables: Tables = Tables::new();
    let shift_id: ShiftId = tables.add_shift(build_shift);
    let assignment_id: AssignmentId = tables.add_assignment(|id| {
        build_assignment(id, shift_id, StaffId::new(99), AssignmentStatus::Assigned)
    });

    assert_ne!(shift_id.value(), assignment_id.value());
}

#[test]
fn test_active_assignment_ignores_cancelled() {
    let mut tables: Tables = Tables::new();
    let shift_id: ShiftId = tables.add_shift(build_shift);
    let staff_id: StaffId = StaffId::new(7);
    tables.add_assignment(|id| {
        build_assignment(id, shift_id, staff_id, AssignmentStatus::Cancelled)
    });

    assert!(tables.active_assignment_for(shift_id, staff_id).is_none());

    tables
        .add_assignment(|id| build_assignment(id, shift_id, staff_id, AssignmentStatus::Assigned));
    assert!(tables.active_assignment_for(shift_id, staff_id).is_some());
}

#[test]
fn test_notes_sorted_pinned_first_then_newest() {
    let mut tables: Tables = Tables::new();
    let shift_id: ShiftId = tables.add_shift(build_shift);
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();

    let make = |note_id: NoteId, body: &str, pinned: bool, minutes: i64| ShiftNote {
        note_id,
        shift_id,
        author: UserId::new(1),
        body: body.to_string(),
        is_pinned: pinned,
        created_at: base + Duration::minutes(minutes),
    };

    tables.add_note(|id| make(id, "old", false, 0));
    tables.add_note(|id| make(id, "pinned", true, 5));
    tables.add_note(|id| make(id, "new", false, 10));

    let bodies: Vec<&str> = tables
        .notes_for_shift(shift_id)
        .iter()
        .map(|n| n.body.as_str())
        .collect();
    assert_eq!(bodies, vec!["pinned", "new", "old"]);
}

#[test]
fn test_earliest_open_check_in_wins() {
    let mut tables: Tables = Tables::new();
    let assignment_id: AssignmentId = AssignmentId::new(500);
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap();

    let make = |check_in_id: CheckInId, minutes: i64| CheckIn {
        check_in_id,
        assignment_id,
        check_in_time: base + Duration::minutes(minutes),
        check_in_location: None,
        check_out_time: None,
        check_out_location: None,
    };

    tables.add_check_in(|id| make(id, 30));
    let earliest: CheckInId = tables.add_check_in(|id| make(id, 0));

    assert_eq!(tables.earliest_open_check_in(assignment_id), Some(earliest));
}
