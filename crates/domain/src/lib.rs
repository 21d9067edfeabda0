// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod analytics;
mod error;
mod overlap;
mod recurrence;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use analytics::{DepartmentRollup, ScheduleAnalytics, compute_schedule_analytics};
pub use error::DomainError;
pub use overlap::{Conflict, ConflictKind, intervals_overlap, shifts_overlap};
pub use recurrence::{MAX_OCCURRENCES, Occurrences, RecurrenceEnd, expand_dates};
pub use status::{AssignmentStatus, ProposalStatus, RecurrenceFrequency, RequestKind, ShiftStatus};
pub use types::{
    Assignment, AssignmentId, CheckIn, CheckInId, EventId, GeoPoint, NoteId, PayRate, QrToken,
    RequestId, RuleDraft, RuleId, RecurringShiftRule, Shift, ShiftDraft, ShiftId, ShiftNote,
    ShiftPatch, ShiftRequest, ShiftSwap, ShiftTemplate, StaffId, StaffMember, SwapId,
    TemplateDraft, TemplateId, TokenId, UserId, VenueId,
};
pub use validation::{validate_recurrence_interval, validate_shift_times, validate_staff_needed};
