// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The entity collections a store backend holds.
//!
//! Identifiers are allocated from a single monotonic counter so that no
//! two records ever share a raw id, which keeps audit details and error
//! messages unambiguous.

use chrono::NaiveDate;
use rota_audit::AuditEvent;
use rota_domain::{
    Assignment, AssignmentId, CheckIn, CheckInId, NoteId, QrToken, RecurringShiftRule, RequestId,
    RuleId, Shift, ShiftId, ShiftNote, ShiftRequest, ShiftSwap, ShiftTemplate, StaffId,
    StaffMember, SwapId, TemplateId, TokenId, VenueId,
};
use std::collections::BTreeMap;

macro_rules! collection {
    ($field:ident, $id:ty, $record:ty, $add:ident, $get:ident, $get_mut:ident, $remove:ident, $iter:ident) => {
        /// Inserts a record built around a freshly allocated id.
        pub fn $add(&mut self, build: impl FnOnce($id) -> $record) -> $id {
            let id: $id = <$id>::new(self.next_id());
            self.$field.insert(id, build(id));
            id
        }

        /// Looks up a record by id.
        #[must_use]
        pub fn $get(&self, id: $id) -> Option<&$record> {
            self.$field.get(&id)
        }

        /// Looks up a record by id for in-place mutation.
        pub fn $get_mut(&mut self, id: $id) -> Option<&mut $record> {
            self.$field.get_mut(&id)
        }

        /// Removes a record, returning it if it existed.
        pub fn $remove(&mut self, id: $id) -> Option<$record> {
            self.$field.remove(&id)
        }

        /// Iterates all records in id order.
        pub fn $iter(&self) -> impl Iterator<Item = &$record> {
            self.$field.values()
        }
    };
}

/// The scheduling entity collections plus the audit log.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    id_counter: i64,
    shifts: BTreeMap<ShiftId, Shift>,
    staff: BTreeMap<StaffId, StaffMember>,
    assignments: BTreeMap<AssignmentId, Assignment>,
    templates: BTreeMap<TemplateId, ShiftTemplate>,
    rules: BTreeMap<RuleId, RecurringShiftRule>,
    swaps: BTreeMap<SwapId, ShiftSwap>,
    requests: BTreeMap<RequestId, ShiftRequest>,
    notes: BTreeMap<NoteId, ShiftNote>,
    check_ins: BTreeMap<CheckInId, CheckIn>,
    qr_tokens: BTreeMap<TokenId, QrToken>,
    audit_log: Vec<AuditEvent>,
}

impl Tables {
    /// Creates empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> i64 {
        self.id_counter += 1;
        self.id_counter
    }

    collection!(shifts, ShiftId, Shift, add_shift, shift, shift_mut, remove_shift, shifts);
    collection!(
        staff,
        StaffId,
        StaffMember,
        add_staff_member,
        staff_member,
        staff_member_mut,
        remove_staff_member,
        staff_members
    );
    collection!(
        assignments,
        AssignmentId,
        Assignment,
        add_assignment,
        assignment,
        assignment_mut,
        remove_assignment,
        assignments
    );
    collection!(
        templates,
        TemplateId,
        ShiftTemplate,
        add_template,
        template,
        template_mut,
        remove_template,
        templates
    );
    collection!(rules, RuleId, RecurringShiftRule, add_rule, rule, rule_mut, remove_rule, rules);
    collection!(swaps, SwapId, ShiftSwap, add_swap, swap, swap_mut, remove_swap, swaps);
    collection!(
        requests,
        RequestId,
        ShiftRequest,
        add_request,
        request,
        request_mut,
        remove_request,
        requests
    );
    collection!(notes, NoteId, ShiftNote, add_note, note, note_mut, remove_note, notes);
    collection!(
        check_ins,
        CheckInId,
        CheckIn,
        add_check_in,
        check_in,
        check_in_mut,
        remove_check_in,
        check_ins
    );
    collection!(
        qr_tokens,
        TokenId,
        QrToken,
        add_qr_token,
        qr_token,
        qr_token_mut,
        remove_qr_token,
        qr_tokens
    );

    /// Iterates every assignment held by a staff member.
    pub fn assignments_for_staff(&self, staff_id: StaffId) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .values()
            .filter(move |a| a.staff_id == staff_id)
    }

    /// Iterates every assignment on a shift.
    pub fn assignments_for_shift(&self, shift_id: ShiftId) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .values()
            .filter(move |a| a.shift_id == shift_id)
    }

    /// Finds the non-cancelled assignment binding a staff member to a
    /// shift, if one exists.
    #[must_use]
    pub fn active_assignment_for(
        &self,
        shift_id: ShiftId,
        staff_id: StaffId,
    ) -> Option<&Assignment> {
        self.assignments
            .values()
            .find(|a| a.shift_id == shift_id && a.staff_id == staff_id && a.blocks_schedule())
    }

    /// Iterates every shift at a venue.
    pub fn shifts_for_venue(&self, venue_id: VenueId) -> impl Iterator<Item = &Shift> {
        self.shifts.values().filter(move |s| s.venue_id == venue_id)
    }

    /// Finds the shift a rule already materialized for a date, if any.
    ///
    /// This is the uniqueness rule that makes re-materialization
    /// idempotent per `(rule, date)`.
    #[must_use]
    pub fn shift_for_rule_on(&self, rule_id: RuleId, date: NaiveDate) -> Option<&Shift> {
        self.shifts
            .values()
            .find(|s| s.recurring_rule_id == Some(rule_id) && s.shift_date == date)
    }

    /// Iterates every roster entry at a venue.
    pub fn staff_for_venue(&self, venue_id: VenueId) -> impl Iterator<Item = &StaffMember> {
        self.staff.values().filter(move |s| s.venue_id == venue_id)
    }

    /// Returns the id of the earliest still-open check-in for an
    /// assignment.
    #[must_use]
    pub fn earliest_open_check_in(&self, assignment_id: AssignmentId) -> Option<CheckInId> {
        self.check_ins
            .values()
            .filter(|c| c.assignment_id == assignment_id && c.is_open())
            .min_by_key(|c| c.check_in_time)
            .map(|c| c.check_in_id)
    }

    /// Finds a QR token record by its stored hash.
    #[must_use]
    pub fn qr_token_by_hash(&self, token_hash: &str) -> Option<&QrToken> {
        self.qr_tokens
            .values()
            .find(|t| t.token_hash == token_hash)
    }

    /// Returns a shift's notes, pinned first, then most recent first.
    #[must_use]
    pub fn notes_for_shift(&self, shift_id: ShiftId) -> Vec<&ShiftNote> {
        let mut notes: Vec<&ShiftNote> = self
            .notes
            .values()
            .filter(|n| n.shift_id == shift_id)
            .collect();
        notes.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then(b.created_at.cmp(&a.created_at))
        });
        notes
    }

    /// Appends an audit event. Called inside the same transaction as the
    /// mutation it records.
    pub fn record_audit(&mut self, event: AuditEvent) {
        self.audit_log.push(event);
    }

    /// The audit log, oldest first.
    #[must_use]
    pub fn audit_log(&self) -> &[AuditEvent] {
        &self.audit_log
    }
}
