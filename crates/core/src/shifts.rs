// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift CRUD, cloning, notes, and templates.

use crate::assignments::cancel_assignment;
use crate::audit;
use crate::error::CoreError;
use crate::permissions::{self, PermissionPolicy};
use chrono::{DateTime, NaiveDate, Utc};
use rota_audit::Actor;
use rota_domain::{
    AssignmentId, DomainError, NoteId, RuleId, Shift, ShiftDraft, ShiftId, ShiftNote, ShiftPatch,
    ShiftStatus, ShiftTemplate, StaffId, TemplateDraft, TemplateId, UserId, VenueId,
    validate_shift_times, validate_staff_needed,
};
use rota_store::{Clock, Store, Tables};
use serde::{Deserialize, Serialize};

/// Filter for shift listings. `None` fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftListFilter {
    /// Earliest date to include, inclusive.
    pub from: Option<NaiveDate>,
    /// Latest date to include, inclusive.
    pub to: Option<NaiveDate>,
    /// Statuses to include.
    pub statuses: Option<Vec<ShiftStatus>>,
    /// Department to include.
    pub department: Option<String>,
    /// Only shifts this staff member holds a non-cancelled assignment on.
    pub staff_id: Option<StaffId>,
}

impl ShiftListFilter {
    fn matches(&self, tables: &Tables, shift: &Shift) -> bool {
        if self.from.is_some_and(|from| shift.shift_date < from) {
            return false;
        }
        if self.to.is_some_and(|to| shift.shift_date > to) {
            return false;
        }
        if self
            .statuses
            .as_ref()
            .is_some_and(|statuses| !statuses.contains(&shift.status))
        {
            return false;
        }
        if self
            .department
            .as_ref()
            .is_some_and(|department| shift.department != *department)
        {
            return false;
        }
        if let Some(staff_id) = self.staff_id {
            if tables
                .active_assignment_for(shift.shift_id, staff_id)
                .is_none()
            {
                return false;
            }
        }
        true
    }
}

/// Inserts a shift record inside an open transaction. Shared by direct
/// creation, templates, and recurrence materialization.
///
/// # Errors
///
/// Returns `CoreError::Validation` when the draft's times or staffing
/// need are invalid.
pub fn create_shift_record(
    tables: &mut Tables,
    draft: &ShiftDraft,
    created_by: UserId,
    now: DateTime<Utc>,
    recurring_rule_id: Option<RuleId>,
) -> Result<ShiftId, CoreError> {
    validate_shift_times(draft.start_time, draft.end_time)?;
    validate_staff_needed(draft.staff_needed)?;
    let status: ShiftStatus = if draft.publish {
        ShiftStatus::Open
    } else {
        ShiftStatus::Draft
    };
    let shift_id: ShiftId = tables.add_shift(|id| Shift {
        shift_id: id,
        venue_id: draft.venue_id,
        event_id: draft.event_id,
        shift_date: draft.shift_date,
        start_time: draft.start_time,
        end_time: draft.end_time,
        department: draft.department.clone(),
        required_role: draft.required_role.clone(),
        staff_needed: draft.staff_needed,
        staff_assigned: 0,
        pay: draft.pay,
        status,
        created_by,
        created_at: now,
        recurring_rule_id,
        remarks: draft.remarks.clone(),
    });
    Ok(shift_id)
}

/// Shift operations.
pub struct ShiftManager<'a, S> {
    store: &'a S,
    clock: &'a dyn Clock,
    policy: &'a dyn PermissionPolicy,
}

impl<'a, S: Store> ShiftManager<'a, S> {
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

    /// Creates a shift from a draft. Published drafts open immediately;
    /// unpublished ones stay `draft`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the times or staffing need
    /// are invalid, `CoreError::PermissionDenied` when the creator is not
    /// allowed to schedule at the venue, or a store error.
    pub fn create_shift(&self, draft: &ShiftDraft, created_by: UserId) -> Result<Shift, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            permissions::check(self.policy, tables, created_by, draft.venue_id, "create_shift")?;
            let shift_id: ShiftId = create_shift_record(tables, draft, created_by, now, None)?;
            audit::record(
                tables,
                Actor::user(created_by),
                "CreateShift",
                format!("created shift {shift_id} at venue {}", draft.venue_id),
                now,
            );
            tables
                .shift(shift_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift", shift_id))
        })
    }

    /// Fetches a shift by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the shift does not exist.
    pub fn get_shift(&self, shift_id: ShiftId) -> Result<Shift, CoreError> {
        self.store.read(|tables| {
            tables
                .shift(shift_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift", shift_id))
        })
    }

    /// Lists a venue's shifts matching a filter, ordered by date, then
    /// start time, then id.
    ///
    /// # Errors
    ///
    /// Returns a store error if the read fails.
    pub fn list_shifts(
        &self,
        venue_id: VenueId,
        filter: &ShiftListFilter,
    ) -> Result<Vec<Shift>, CoreError> {
        self.store.read(|tables| {
            let mut shifts: Vec<Shift> = tables
                .shifts_for_venue(venue_id)
                .filter(|shift| filter.matches(tables, shift))
                .cloned()
                .collect();
            shifts.sort_by(|a, b| {
                a.shift_date
                    .cmp(&b.shift_date)
                    .then(a.start_time.cmp(&b.start_time))
                    .then(a.shift_id.cmp(&b.shift_id))
            });
            Ok(shifts)
        })
    }

    /// Applies a field patch to a shift.
    ///
    /// The merged record is re-validated: times must still be ordered and
    /// the staffing need can never drop below the assigned count.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the shift does not exist,
    /// `CoreError::Validation` when the merged record is invalid,
    /// `CoreError::PermissionDenied`, or a store error.
    pub fn update_shift(
        &self,
        shift_id: ShiftId,
        patch: &ShiftPatch,
        updated_by: UserId,
    ) -> Result<Shift, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let venue_id = tables
                .shift(shift_id)
                .map(|s| s.venue_id)
                .ok_or_else(|| CoreError::not_found("shift", shift_id))?;
            permissions::check(self.policy, tables, updated_by, venue_id, "update_shift")?;
            let shift = tables
                .shift_mut(shift_id)
                .ok_or_else(|| CoreError::not_found("shift", shift_id))?;
            let merged_start = patch.start_time.unwrap_or(shift.start_time);
            let merged_end = patch.end_time.unwrap_or(shift.end_time);
            validate_shift_times(merged_start, merged_end)?;
            if let Some(needed) = patch.staff_needed {
                validate_staff_needed(needed)?;
                if needed < shift.staff_assigned {
                    return Err(CoreError::Validation(DomainError::InvalidStaffNeeded {
                        count: needed,
                    }));
                }
            }
            if let Some(date) = patch.shift_date {
                shift.shift_date = date;
            }
            shift.start_time = merged_start;
            shift.end_time = merged_end;
            if let Some(department) = patch.department.clone() {
                shift.department = department;
            }
            if let Some(role) = patch.required_role.clone() {
                shift.required_role = Some(role);
            }
            if let Some(needed) = patch.staff_needed {
                shift.staff_needed = needed;
            }
            if let Some(pay) = patch.pay {
                shift.pay = pay;
            }
            if let Some(status) = patch.status {
                shift.status = status;
            }
            if let Some(remarks) = patch.remarks.clone() {
                shift.remarks = Some(remarks);
            }
            audit::record(
                tables,
                Actor::user(updated_by),
                "UpdateShift",
                format!("updated shift {shift_id}"),
                now,
            );
            tables
                .shift(shift_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift", shift_id))
        })
    }

    /// Deletes a shift, cancelling its non-cancelled assignments. Notes
    /// and check-in records are retained for history.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the shift does not exist,
    /// `CoreError::PermissionDenied`, or a store error.
    pub fn delete_shift(&self, shift_id: ShiftId, deleted_by: UserId) -> Result<(), CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let venue_id = tables
                .shift(shift_id)
                .map(|s| s.venue_id)
                .ok_or_else(|| CoreError::not_found("shift", shift_id))?;
            permissions::check(self.policy, tables, deleted_by, venue_id, "delete_shift")?;
            let blocking: Vec<AssignmentId> = tables
                .assignments_for_shift(shift_id)
                .filter(|a| a.blocks_schedule())
                .map(|a| a.assignment_id)
                .collect();
            for assignment_id in blocking {
                cancel_assignment(tables, assignment_id, String::from("Shift deleted"));
            }
            tables
                .remove_shift(shift_id)
                .ok_or_else(|| CoreError::not_found("shift", shift_id))?;
            audit::record(
                tables,
                Actor::user(deleted_by),
                "DeleteShift",
                format!("deleted shift {shift_id}"),
                now,
            );
            Ok(())
        })
    }

    /// Clones a shift's skeleton to a new date.
    ///
    /// Assignments, the recurring-rule link, and the event link do not
    /// carry over; the clone starts `open` with zero staff assigned.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the source shift does not exist,
    /// `CoreError::PermissionDenied`, or a store error.
    pub fn clone_shift(
        &self,
        shift_id: ShiftId,
        new_date: NaiveDate,
        cloned_by: UserId,
    ) -> Result<Shift, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let source: Shift = tables
                .shift(shift_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift", shift_id))?;
            permissions::check(self.policy, tables, cloned_by, source.venue_id, "create_shift")?;
            let draft: ShiftDraft = ShiftDraft {
                venue_id: source.venue_id,
                event_id: None,
                shift_date: new_date,
                start_time: source.start_time,
                end_time: source.end_time,
                department: source.department,
                required_role: source.required_role,
                staff_needed: source.staff_needed,
                pay: source.pay,
                publish: true,
                remarks: source.remarks,
            };
            let clone_id: ShiftId = create_shift_record(tables, &draft, cloned_by, now, None)?;
            audit::record(
                tables,
                Actor::user(cloned_by),
                "CloneShift",
                format!("cloned shift {shift_id} to {clone_id} on {new_date}"),
                now,
            );
            tables
                .shift(clone_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift", clone_id))
        })
    }

    /// Adds a free-text note to a shift.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the shift does not exist, or a
    /// store error.
    pub fn add_note(
        &self,
        shift_id: ShiftId,
        author: UserId,
        body: String,
        is_pinned: bool,
    ) -> Result<ShiftNote, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            if tables.shift(shift_id).is_none() {
                return Err(CoreError::not_found("shift", shift_id));
            }
            let note_id: NoteId = tables.add_note(|id| ShiftNote {
                note_id: id,
                shift_id,
                author,
                body,
                is_pinned,
                created_at: now,
            });
            tables
                .note(note_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift_note", note_id))
        })
    }

    /// Lists a shift's notes, pinned first, then most recent first.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the shift does not exist.
    pub fn list_notes(&self, shift_id: ShiftId) -> Result<Vec<ShiftNote>, CoreError> {
        self.store.read(|tables| {
            if tables.shift(shift_id).is_none() {
                return Err(CoreError::not_found("shift", shift_id));
            }
            Ok(tables
                .notes_for_shift(shift_id)
                .into_iter()
                .cloned()
                .collect())
        })
    }

    /// Creates a reusable shift template.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the template's times or
    /// staffing need are invalid, `CoreError::PermissionDenied`, or a
    /// store error.
    pub fn create_template(
        &self,
        draft: &TemplateDraft,
        created_by: UserId,
    ) -> Result<ShiftTemplate, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            permissions::check(
                self.policy,
                tables,
                created_by,
                draft.venue_id,
                "manage_templates",
            )?;
            validate_shift_times(draft.start_time, draft.end_time)?;
            validate_staff_needed(draft.staff_needed)?;
            let template_id: TemplateId = tables.add_template(|id| ShiftTemplate {
                template_id: id,
                venue_id: draft.venue_id,
                name: draft.name.clone(),
                department: draft.department.clone(),
                required_role: draft.required_role.clone(),
                start_time: draft.start_time,
                end_time: draft.end_time,
                staff_needed: draft.staff_needed,
                pay: draft.pay,
                is_active: true,
            });
            audit::record(
                tables,
                Actor::user(created_by),
                "CreateTemplate",
                format!("created template {template_id} at venue {}", draft.venue_id),
                now,
            );
            tables
                .template(template_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift_template", template_id))
        })
    }

    /// Creates an `open` shift on a date from an active template.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the template does not exist,
    /// `CoreError::Validation` with `DomainError::InactiveTemplate` when
    /// the template was deactivated, `CoreError::PermissionDenied`, or a
    /// store error.
    pub fn create_from_template(
        &self,
        template_id: TemplateId,
        shift_date: NaiveDate,
        created_by: UserId,
    ) -> Result<Shift, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let template: ShiftTemplate = tables
                .template(template_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift_template", template_id))?;
            if !template.is_active {
                return Err(CoreError::Validation(DomainError::InactiveTemplate));
            }
            permissions::check(
                self.policy,
                tables,
                created_by,
                template.venue_id,
                "create_shift",
            )?;
            let draft: ShiftDraft = ShiftDraft {
                venue_id: template.venue_id,
                event_id: None,
                shift_date,
                start_time: template.start_time,
                end_time: template.end_time,
                department: template.department,
                required_role: template.required_role,
                staff_needed: template.staff_needed,
                pay: template.pay,
                publish: true,
                remarks: None,
            };
            let shift_id: ShiftId = create_shift_record(tables, &draft, created_by, now, None)?;
            audit::record(
                tables,
                Actor::user(created_by),
                "CreateShiftFromTemplate",
                format!("created shift {shift_id} from template {template_id} on {shift_date}"),
                now,
            );
            tables
                .shift(shift_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("shift", shift_id))
        })
    }

    /// Soft-deletes a template. Shifts already created from it keep
    /// existing.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the template does not exist,
    /// `CoreError::PermissionDenied`, or a store error.
    pub fn deactivate_template(
        &self,
        template_id: TemplateId,
        deactivated_by: UserId,
    ) -> Result<(), CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let venue_id = tables
                .template(template_id)
                .map(|t| t.venue_id)
                .ok_or_else(|| CoreError::not_found("shift_template", template_id))?;
            permissions::check(
                self.policy,
                tables,
                deactivated_by,
                venue_id,
                "manage_templates",
            )?;
            if let Some(template) = tables.template_mut(template_id) {
                template.is_active = false;
            }
            audit::record(
                tables,
                Actor::user(deactivated_by),
                "DeactivateTemplate",
                format!("deactivated template {template_id}"),
                now,
            );
            Ok(())
        })
    }

    /// Lists a venue's active templates, in id order.
    ///
    /// # Errors
    ///
    /// Returns a store error if the read fails.
    pub fn list_templates(&self, venue_id: VenueId) -> Result<Vec<ShiftTemplate>, CoreError> {
        self.store.read(|tables| {
            Ok(tables
                .templates()
                .filter(|t| t.venue_id == venue_id && t.is_active)
                .cloned()
                .collect())
        })
    }
}
