// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entity records for the scheduling engine.
//!
//! Records carry canonical numeric identifiers assigned by the store.
//! Construction inputs (drafts) are separate structs so that callers can
//! never supply an identifier or a cached counter themselves.

use crate::status::{
    AssignmentStatus, ProposalStatus, RecurrenceFrequency, RequestKind, ShiftStatus,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Declares a copyable identifier newtype over `i64`.
macro_rules! define_id {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw store-assigned identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier value.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a venue (owned by the hosting platform).
    VenueId
);
define_id!(
    /// Identifier of an event a shift may be linked to.
    EventId
);
define_id!(
    /// Identifier of an acting user (creator, assigner, approver).
    UserId
);
define_id!(
    /// Identifier of a staff member on a venue roster.
    StaffId
);
define_id!(
    /// Identifier of a shift.
    ShiftId
);
define_id!(
    /// Identifier of a staff-to-shift assignment.
    AssignmentId
);
define_id!(
    /// Identifier of a shift template.
    TemplateId
);
define_id!(
    /// Identifier of a recurring shift rule.
    RuleId
);
define_id!(
    /// Identifier of a shift swap proposal.
    SwapId
);
define_id!(
    /// Identifier of a drop/pickup request.
    RequestId
);
define_id!(
    /// Identifier of a shift note.
    NoteId
);
define_id!(
    /// Identifier of a check-in record.
    CheckInId
);
define_id!(
    /// Identifier of a QR check-in token.
    TokenId
);

/// Compensation for a shift: an hourly rate or a flat amount, never both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayRate {
    /// Paid per hour worked.
    Hourly {
        /// The hourly rate.
        rate: f64,
    },
    /// Paid a fixed amount regardless of duration.
    Flat {
        /// The flat amount.
        amount: f64,
    },
}

impl PayRate {
    /// Returns the cost of staffing one slot for the given duration.
    #[must_use]
    pub fn cost_for_hours(&self, hours: f64) -> f64 {
        match self {
            Self::Hourly { rate } => rate * hours,
            Self::Flat { amount } => *amount,
        }
    }
}

/// One staffing slot for a venue on a date.
///
/// Invariants maintained by the engine:
/// - `start_time < end_time`
/// - `staff_assigned <= staff_needed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Canonical identifier assigned by the store.
    pub shift_id: ShiftId,
    /// The venue this shift belongs to.
    pub venue_id: VenueId,
    /// Optional linked event.
    pub event_id: Option<EventId>,
    /// The date of the shift (venue-local).
    pub shift_date: NaiveDate,
    /// Start of the shift (venue-local wall clock).
    pub start_time: NaiveTime,
    /// End of the shift (venue-local wall clock, exclusive).
    pub end_time: NaiveTime,
    /// The department this shift staffs.
    pub department: String,
    /// Role required of assigned staff, if any.
    pub required_role: Option<String>,
    /// How many staff the shift needs.
    pub staff_needed: u32,
    /// Cached count of assignments currently counting toward staffing.
    pub staff_assigned: u32,
    /// Compensation for the slot.
    pub pay: PayRate,
    /// Lifecycle status.
    pub status: ShiftStatus,
    /// The user who created the shift.
    pub created_by: UserId,
    /// When the shift record was created.
    pub created_at: DateTime<Utc>,
    /// The recurring rule this shift was materialized from, if any.
    pub recurring_rule_id: Option<RuleId>,
    /// Free-text remarks carried on the shift itself.
    pub remarks: Option<String>,
}

impl Shift {
    /// Returns the shift duration in hours.
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        let minutes: i64 = self
            .end_time
            .signed_duration_since(self.start_time)
            .num_minutes();
        #[allow(clippy::cast_precision_loss)]
        {
            minutes as f64 / 60.0
        }
    }

    /// Returns the cost of running this shift: the hourly rate times the
    /// duration when the shift pays hourly, else the flat amount.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.pay.cost_for_hours(self.duration_hours())
    }

    /// Returns whether every needed slot is taken.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.staff_assigned >= self.staff_needed
    }
}

/// Construction input for a new shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDraft {
    /// The venue this shift belongs to.
    pub venue_id: VenueId,
    /// Optional linked event.
    pub event_id: Option<EventId>,
    /// The date of the shift.
    pub shift_date: NaiveDate,
    /// Start of the shift.
    pub start_time: NaiveTime,
    /// End of the shift.
    pub end_time: NaiveTime,
    /// The department this shift staffs.
    pub department: String,
    /// Role required of assigned staff, if any.
    pub required_role: Option<String>,
    /// How many staff the shift needs.
    pub staff_needed: u32,
    /// Compensation for the slot.
    pub pay: PayRate,
    /// Whether the shift is published immediately (`open`) or kept `draft`.
    pub publish: bool,
    /// Free-text remarks carried on the shift itself.
    pub remarks: Option<String>,
}

/// Field patch for an existing shift. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftPatch {
    /// New shift date.
    pub shift_date: Option<NaiveDate>,
    /// New start time.
    pub start_time: Option<NaiveTime>,
    /// New end time.
    pub end_time: Option<NaiveTime>,
    /// New department.
    pub department: Option<String>,
    /// New required role.
    pub required_role: Option<String>,
    /// New staffing need.
    pub staff_needed: Option<u32>,
    /// New compensation.
    pub pay: Option<PayRate>,
    /// New lifecycle status.
    pub status: Option<ShiftStatus>,
    /// New remarks.
    pub remarks: Option<String>,
}

/// A venue roster entry.
///
/// Roster management itself is owned by the hosting platform; the engine
/// reads these records for auto-scheduling and the team-membership
/// permission policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Canonical identifier assigned by the store.
    pub staff_id: StaffId,
    /// The platform user behind this roster entry.
    pub user_id: UserId,
    /// The venue this roster entry belongs to.
    pub venue_id: VenueId,
    /// Display name.
    pub name: String,
    /// The department this staff member works in.
    pub department: String,
    /// The role this staff member holds.
    pub role: String,
    /// Whether the roster entry is active.
    pub is_active: bool,
    /// Whether the staff member is currently available for new shifts.
    pub is_available: bool,
    /// Performance rating used to rank auto-scheduling candidates.
    pub performance_rating: f64,
}

/// Binding of one staff member to one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Canonical identifier assigned by the store.
    pub assignment_id: AssignmentId,
    /// The shift being staffed.
    pub shift_id: ShiftId,
    /// The staff member bound to the shift.
    pub staff_id: StaffId,
    /// The user who made the assignment.
    pub assigned_by: UserId,
    /// Lifecycle status.
    pub status: AssignmentStatus,
    /// When the assignment was created.
    pub assigned_at: DateTime<Utc>,
    /// When the staff member confirmed, if they did.
    pub confirmed_at: Option<DateTime<Utc>>,
    /// When the staff member declined, if they did.
    pub declined_at: Option<DateTime<Utc>>,
    /// Why the staff member declined, if they did.
    pub decline_reason: Option<String>,
    /// Free-text notes (e.g. cancellation context).
    pub notes: Option<String>,
}

impl Assignment {
    /// Returns whether this assignment blocks the staff member's schedule.
    ///
    /// Every non-cancelled assignment participates in conflict detection.
    #[must_use]
    pub fn blocks_schedule(&self) -> bool {
        self.status != AssignmentStatus::Cancelled
    }

    /// Returns whether this assignment counts toward the shift's cached
    /// `staff_assigned` total.
    #[must_use]
    pub fn counts_toward_staffing(&self) -> bool {
        matches!(
            self.status,
            AssignmentStatus::Assigned | AssignmentStatus::Confirmed
        )
    }
}

/// Reusable shift blueprint. Soft-deleted via `is_active = false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    /// Canonical identifier assigned by the store.
    pub template_id: TemplateId,
    /// The venue this template belongs to.
    pub venue_id: VenueId,
    /// Template name.
    pub name: String,
    /// Default department.
    pub department: String,
    /// Default required role.
    pub required_role: Option<String>,
    /// Default start time.
    pub start_time: NaiveTime,
    /// Default end time.
    pub end_time: NaiveTime,
    /// Default staffing need.
    pub staff_needed: u32,
    /// Default compensation.
    pub pay: PayRate,
    /// Soft-delete flag.
    pub is_active: bool,
}

/// A shift blueprint plus a recurrence specification.
///
/// Expansion into concrete shifts is explicit (`materialize`), never
/// implicit. Soft-deleted via `is_active = false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringShiftRule {
    /// Canonical identifier assigned by the store.
    pub rule_id: RuleId,
    /// The venue this rule belongs to.
    pub venue_id: VenueId,
    /// Rule name.
    pub name: String,
    /// Department of generated shifts.
    pub department: String,
    /// Required role of generated shifts.
    pub required_role: Option<String>,
    /// Start time of generated shifts.
    pub start_time: NaiveTime,
    /// End time of generated shifts.
    pub end_time: NaiveTime,
    /// Staffing need of generated shifts.
    pub staff_needed: u32,
    /// Compensation of generated shifts.
    pub pay: PayRate,
    /// First occurrence date.
    pub anchor_date: NaiveDate,
    /// Step frequency.
    pub frequency: RecurrenceFrequency,
    /// Step multiplier (>= 1).
    pub interval: u32,
    /// End condition.
    pub end: crate::recurrence::RecurrenceEnd,
    /// Soft-delete flag.
    pub is_active: bool,
    /// The user who created the rule.
    pub created_by: UserId,
}

/// Construction input for a new shift template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDraft {
    /// The venue this template belongs to.
    pub venue_id: VenueId,
    /// Template name.
    pub name: String,
    /// Default department.
    pub department: String,
    /// Default required role.
    pub required_role: Option<String>,
    /// Default start time.
    pub start_time: NaiveTime,
    /// Default end time.
    pub end_time: NaiveTime,
    /// Default staffing need.
    pub staff_needed: u32,
    /// Default compensation.
    pub pay: PayRate,
}

/// Construction input for a new recurring shift rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDraft {
    /// The venue this rule belongs to.
    pub venue_id: VenueId,
    /// Rule name.
    pub name: String,
    /// Department of generated shifts.
    pub department: String,
    /// Required role of generated shifts.
    pub required_role: Option<String>,
    /// Start time of generated shifts.
    pub start_time: NaiveTime,
    /// End time of generated shifts.
    pub end_time: NaiveTime,
    /// Staffing need of generated shifts.
    pub staff_needed: u32,
    /// Compensation of generated shifts.
    pub pay: PayRate,
    /// First occurrence date.
    pub anchor_date: NaiveDate,
    /// Step frequency.
    pub frequency: RecurrenceFrequency,
    /// Step multiplier (>= 1).
    pub interval: u32,
    /// End condition.
    pub end: crate::recurrence::RecurrenceEnd,
}

/// A proposal that a second staff member take over an assigned shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSwap {
    /// Canonical identifier assigned by the store.
    pub swap_id: SwapId,
    /// The shift being handed over.
    pub shift_id: ShiftId,
    /// The staff member currently assigned.
    pub original_staff_id: StaffId,
    /// The staff member proposed to take over.
    pub requested_staff_id: StaffId,
    /// Why the swap was requested.
    pub reason: Option<String>,
    /// Lifecycle status (pending until decided, terminal after).
    pub status: ProposalStatus,
    /// When the swap was proposed.
    pub requested_at: DateTime<Utc>,
    /// The user who approved or denied the swap.
    pub decided_by: Option<UserId>,
    /// When the swap was approved or denied.
    pub decided_at: Option<DateTime<Utc>>,
    /// Why the swap was denied, if it was.
    pub denial_reason: Option<String>,
}

/// A drop (staff wants off a shift) or pickup (staff wants an open shift)
/// proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Canonical identifier assigned by the store.
    pub request_id: RequestId,
    /// Drop or pickup.
    pub kind: RequestKind,
    /// The shift in question.
    pub shift_id: ShiftId,
    /// The staff member making the request.
    pub staff_id: StaffId,
    /// Why the request was made.
    pub reason: Option<String>,
    /// Lifecycle status (pending until decided, terminal after).
    pub status: ProposalStatus,
    /// When the request was made.
    pub requested_at: DateTime<Utc>,
    /// The user who approved or denied the request.
    pub decided_by: Option<UserId>,
    /// When the request was approved or denied.
    pub decided_at: Option<DateTime<Utc>>,
    /// Why the request was denied, if it was.
    pub denial_reason: Option<String>,
}

/// Free-text annotation on a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftNote {
    /// Canonical identifier assigned by the store.
    pub note_id: NoteId,
    /// The shift this note annotates.
    pub shift_id: ShiftId,
    /// The user who wrote the note.
    pub author: UserId,
    /// Note body.
    pub body: String,
    /// Pinned notes sort before everything else.
    pub is_pinned: bool,
    /// When the note was written.
    pub created_at: DateTime<Utc>,
}

/// An optional geolocation captured with a check-in or check-out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// A check-in/check-out record tied to one assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    /// Canonical identifier assigned by the store.
    pub check_in_id: CheckInId,
    /// The assignment being worked.
    pub assignment_id: AssignmentId,
    /// When the staff member checked in.
    pub check_in_time: DateTime<Utc>,
    /// Where the staff member checked in, if captured.
    pub check_in_location: Option<GeoPoint>,
    /// When the staff member checked out. `None` while the row is open.
    pub check_out_time: Option<DateTime<Utc>>,
    /// Where the staff member checked out, if captured.
    pub check_out_location: Option<GeoPoint>,
}

impl CheckIn {
    /// Returns whether the row is still open (no check-out recorded).
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.check_out_time.is_none()
    }
}

/// A time-boxed QR check-in token. Only the hash of the token is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrToken {
    /// Canonical identifier assigned by the store.
    pub token_id: TokenId,
    /// The venue the token was issued for.
    pub venue_id: VenueId,
    /// The shift the token authorizes check-in against.
    pub shift_id: ShiftId,
    /// Hex-encoded hash of the token value.
    pub token_hash: String,
    /// The user who generated the token.
    pub created_by: UserId,
    /// When the token was generated.
    pub created_at: DateTime<Utc>,
    /// When the token stops validating.
    pub expires_at: DateTime<Utc>,
    /// Manually revocable flag.
    pub is_active: bool,
}
