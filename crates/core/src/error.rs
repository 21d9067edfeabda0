// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::{Conflict, DomainError, ShiftId, UserId, VenueId};
use rota_store::StoreError;

/// Errors produced by the scheduling engine.
///
/// Each variant maps to one caller-visible failure mode; nothing is
/// swallowed, and `SchedulingConflict` always carries every conflict
/// found, not just the first.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A referenced record does not exist.
    NotFound {
        /// The entity kind (e.g. "shift", "assignment").
        entity: &'static str,
        /// The key that failed to resolve.
        key: String,
    },
    /// One or more overlapping assignments were detected.
    SchedulingConflict {
        /// Every conflict found, for caller display.
        conflicts: Vec<Conflict>,
    },
    /// A status change not permitted from the current state.
    InvalidTransition {
        /// The entity kind.
        entity: &'static str,
        /// The current state.
        from: String,
        /// The requested state.
        to: String,
    },
    /// Malformed input.
    Validation(DomainError),
    /// Every needed slot on the shift is already taken.
    ShiftFull {
        /// The full shift.
        shift_id: ShiftId,
        /// Its staffing need.
        staff_needed: u32,
    },
    /// A QR token failed validation (expired or deactivated).
    TokenExpiredOrInvalid {
        /// Why the token was rejected.
        reason: String,
    },
    /// The acting user is not allowed to perform the action at the venue.
    PermissionDenied {
        /// The acting user.
        user_id: UserId,
        /// The venue the action targeted.
        venue_id: VenueId,
        /// The attempted action.
        action: &'static str,
    },
    /// The underlying store failed.
    Store(StoreError),
}

impl CoreError {
    /// Builds a `NotFound` error for an entity kind and key.
    #[must_use]
    pub fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, key } => write!(f, "{entity} '{key}' not found"),
            Self::SchedulingConflict { conflicts } => {
                write!(f, "Scheduling conflict ({} found):", conflicts.len())?;
                for conflict in conflicts {
                    write!(f, " [{conflict}]")?;
                }
                Ok(())
            }
            Self::InvalidTransition { entity, from, to } => {
                write!(f, "Invalid {entity} transition: {from} -> {to}")
            }
            Self::Validation(err) => write!(f, "Validation failed: {err}"),
            Self::ShiftFull {
                shift_id,
                staff_needed,
            } => {
                write!(
                    f,
                    "Shift {shift_id} is fully staffed ({staff_needed} needed)"
                )
            }
            Self::TokenExpiredOrInvalid { reason } => {
                write!(f, "QR token expired or invalid: {reason}")
            }
            Self::PermissionDenied {
                user_id,
                venue_id,
                action,
            } => {
                write!(
                    f,
                    "User {user_id} is not permitted to {action} at venue {venue_id}"
                )
            }
            Self::Store(err) => write!(f, "Store error: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
