// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recurring shift rules and their explicit materialization into
//! concrete shifts.

use crate::audit;
use crate::error::CoreError;
use crate::permissions::{self, PermissionPolicy};
use crate::shifts::create_shift_record;
use chrono::{DateTime, NaiveDate, Utc};
use rota_audit::Actor;
use rota_domain::{
    DomainError, RecurringShiftRule, RuleDraft, RuleId, Shift, ShiftDraft, ShiftId, UserId,
    expand_dates, validate_recurrence_interval, validate_shift_times, validate_staff_needed,
};
use rota_store::{Clock, Store};

/// Recurring-rule operations.
pub struct RecurrenceManager<'a, S> {
    store: &'a S,
    clock: &'a dyn Clock,
    policy: &'a dyn PermissionPolicy,
}

impl<'a, S: Store> RecurrenceManager<'a, S> {
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

    /// Creates a recurring shift rule. No shifts exist until the rule is
    /// materialized.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the blueprint times, staffing
    /// need, or interval are invalid, `CoreError::PermissionDenied`, or a
    /// store error.
    pub fn create_rule(
        &self,
        draft: &RuleDraft,
        created_by: UserId,
    ) -> Result<RecurringShiftRule, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        validate_shift_times(draft.start_time, draft.end_time)?;
        validate_staff_needed(draft.staff_needed)?;
        validate_recurrence_interval(draft.interval)?;
        self.store.transaction(|tables| {
            permissions::check(self.policy, tables, created_by, draft.venue_id, "manage_rules")?;
            let rule_id: RuleId = tables.add_rule(|id| RecurringShiftRule {
                rule_id: id,
                venue_id: draft.venue_id,
                name: draft.name.clone(),
                department: draft.department.clone(),
                required_role: draft.required_role.clone(),
                start_time: draft.start_time,
                end_time: draft.end_time,
                staff_needed: draft.staff_needed,
                pay: draft.pay,
                anchor_date: draft.anchor_date,
                frequency: draft.frequency,
                interval: draft.interval,
                end: draft.end,
                is_active: true,
                created_by,
            });
            audit::record(
                tables,
                Actor::user(created_by),
                "CreateRecurringRule",
                format!("created recurring rule {rule_id} at venue {}", draft.venue_id),
                now,
            );
            tables
                .rule(rule_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("recurring_rule", rule_id))
        })
    }

    /// Fetches a rule by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the rule does not exist.
    pub fn get_rule(&self, rule_id: RuleId) -> Result<RecurringShiftRule, CoreError> {
        self.store.read(|tables| {
            tables
                .rule(rule_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("recurring_rule", rule_id))
        })
    }

    /// Soft-deletes a rule. Shifts already materialized from it keep
    /// existing.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the rule does not exist,
    /// `CoreError::PermissionDenied`, or a store error.
    pub fn deactivate_rule(&self, rule_id: RuleId, deactivated_by: UserId) -> Result<(), CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let venue_id = tables
                .rule(rule_id)
                .map(|r| r.venue_id)
                .ok_or_else(|| CoreError::not_found("recurring_rule", rule_id))?;
            permissions::check(self.policy, tables, deactivated_by, venue_id, "manage_rules")?;
            if let Some(rule) = tables.rule_mut(rule_id) {
                rule.is_active = false;
            }
            audit::record(
                tables,
                Actor::user(deactivated_by),
                "DeactivateRecurringRule",
                format!("deactivated recurring rule {rule_id}"),
                now,
            );
            Ok(())
        })
    }

    /// Expands a rule into concrete `open` shifts.
    ///
    /// Dates the rule already materialized are skipped, so running this
    /// twice never duplicates shifts. Returns the shifts created by this
    /// call, in date order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the rule does not exist,
    /// `CoreError::Validation` with `DomainError::InactiveRule` when the
    /// rule was deactivated, `CoreError::PermissionDenied`, or a store
    /// error.
    pub fn materialize(
        &self,
        rule_id: RuleId,
        generated_by: UserId,
    ) -> Result<Vec<Shift>, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let rule: RecurringShiftRule = tables
                .rule(rule_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("recurring_rule", rule_id))?;
            if !rule.is_active {
                return Err(CoreError::Validation(DomainError::InactiveRule));
            }
            permissions::check(self.policy, tables, generated_by, rule.venue_id, "manage_rules")?;
            let dates: Vec<NaiveDate> = expand_dates(&rule).collect();
            let mut created: Vec<Shift> = Vec::new();
            for date in dates {
                if tables.shift_for_rule_on(rule_id, date).is_some() {
                    continue;
                }
                let draft: ShiftDraft = ShiftDraft {
                    venue_id: rule.venue_id,
                    event_id: None,
                    shift_date: date,
                    start_time: rule.start_time,
                    end_time: rule.end_time,
                    department: rule.department.clone(),
                    required_role: rule.required_role.clone(),
                    staff_needed: rule.staff_needed,
                    pay: rule.pay,
                    publish: true,
                    remarks: None,
                };
                let shift_id: ShiftId =
                    create_shift_record(tables, &draft, generated_by, now, Some(rule_id))?;
                if let Some(shift) = tables.shift(shift_id) {
                    created.push(shift.clone());
                }
            }
            audit::record(
                tables,
                Actor::user(generated_by),
                "MaterializeRecurringRule",
                format!("materialized {} shifts from rule {rule_id}", created.len()),
                now,
            );
            Ok(created)
        })
    }
}
