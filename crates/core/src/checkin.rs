// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift attendance: check-in/check-out records and the QR token path.

use crate::audit;
use crate::error::CoreError;
use crate::permissions::{self, PermissionPolicy};
use crate::tokens::{QR_TOKEN_TTL_HOURS, TokenGenerator, token_hash};
use chrono::{DateTime, Duration, Utc};
use rota_audit::Actor;
use rota_domain::{
    Assignment, AssignmentId, AssignmentStatus, CheckIn, CheckInId, GeoPoint, QrToken, ShiftId,
    TokenId, UserId, VenueId,
};
use rota_store::{Clock, Store, Tables};

/// Looks up and validates a presented token inside an open transaction.
///
/// Valid means: the hash is known, the token has not been deactivated,
/// and `expires_at` is strictly in the future.
///
/// # Errors
///
/// Returns `CoreError::NotFound` when no token matches the hash, or
/// `CoreError::TokenExpiredOrInvalid`.
pub fn validate_token_in<'t>(
    tables: &'t Tables,
    token: &str,
    now: DateTime<Utc>,
) -> Result<&'t QrToken, CoreError> {
    let record: &QrToken = tables
        .qr_token_by_hash(&token_hash(token))
        .ok_or_else(|| CoreError::not_found("qr_token", "presented value"))?;
    if !record.is_active {
        return Err(CoreError::TokenExpiredOrInvalid {
            reason: String::from("token has been deactivated"),
        });
    }
    if record.expires_at <= now {
        return Err(CoreError::TokenExpiredOrInvalid {
            reason: format!("token expired at {}", record.expires_at),
        });
    }
    Ok(record)
}

/// Check-in, check-out, and QR token operations.
pub struct CheckInTracker<'a, S> {
    store: &'a S,
    clock: &'a dyn Clock,
    policy: &'a dyn PermissionPolicy,
    tokens: &'a dyn TokenGenerator,
}

impl<'a, S: Store> CheckInTracker<'a, S> {
    /// Creates a tracker over a store handle, a clock, a permission
    /// policy, and a token source.
    #[must_use]
    pub const fn new(
        store: &'a S,
        clock: &'a dyn Clock,
        policy: &'a dyn PermissionPolicy,
        tokens: &'a dyn TokenGenerator,
    ) -> Self {
        Self {
            store,
            clock,
            policy,
            tokens,
        }
    }

    /// Opens a check-in row against an assignment.
    ///
    /// Only `assigned` or `confirmed` assignments can check in.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the assignment does not exist,
    /// `CoreError::InvalidTransition` when its status cannot check in, or
    /// a store error.
    pub fn check_in(
        &self,
        assignment_id: AssignmentId,
        location: Option<GeoPoint>,
    ) -> Result<CheckIn, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store
            .transaction(|tables| open_check_in(tables, assignment_id, location, now))
    }

    /// Closes the earliest open check-in row on an assignment.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` when the assignment does not exist
    /// or has no open check-in, or a store error.
    pub fn check_out(
        &self,
        assignment_id: AssignmentId,
        location: Option<GeoPoint>,
    ) -> Result<CheckIn, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            if tables.assignment(assignment_id).is_none() {
                return Err(CoreError::not_found("assignment", assignment_id));
            }
            let check_in_id: CheckInId = tables
                .earliest_open_check_in(assignment_id)
                .ok_or_else(|| CoreError::not_found("open_check_in", assignment_id))?;
            let row = tables
                .check_in_mut(check_in_id)
                .ok_or_else(|| CoreError::not_found("check_in", check_in_id))?;
            row.check_out_time = Some(now);
            row.check_out_location = location;
            tables
                .check_in(check_in_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("check_in", check_in_id))
        })
    }

    /// Lists an assignment's check-in rows, earliest first.
    ///
    /// # Errors
    ///
    /// Returns a store error if the read fails.
    pub fn list_for_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Vec<CheckIn>, CoreError> {
        self.store.read(|tables| {
            let mut rows: Vec<CheckIn> = tables
                .check_ins()
                .filter(|c| c.assignment_id == assignment_id)
                .cloned()
                .collect();
            rows.sort_by_key(|c| c.check_in_time);
            Ok(rows)
        })
    }

    /// Generates a time-boxed QR token for a shift.
    ///
    /// Returns the plaintext value once, alongside the stored record;
    /// only the hash persists.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the shift does not exist,
    /// `CoreError::PermissionDenied`, or a store error.
    pub fn generate_qr_token(
        &self,
        venue_id: VenueId,
        shift_id: ShiftId,
        created_by: UserId,
    ) -> Result<(String, QrToken), CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        let plaintext: String = self.tokens.generate();
        let hash: String = token_hash(&plaintext);
        self.store.transaction(|tables| {
            if tables.shift(shift_id).is_none() {
                return Err(CoreError::not_found("shift", shift_id));
            }
            permissions::check(self.policy, tables, created_by, venue_id, "manage_qr_tokens")?;
            let token_id: TokenId = tables.add_qr_token(|id| QrToken {
                token_id: id,
                venue_id,
                shift_id,
                token_hash: hash,
                created_by,
                created_at: now,
                expires_at: now + Duration::hours(QR_TOKEN_TTL_HOURS),
                is_active: true,
            });
            audit::record(
                tables,
                Actor::user(created_by),
                "GenerateQrToken",
                format!("generated QR token {token_id} for shift {shift_id}"),
                now,
            );
            let record: QrToken = tables
                .qr_token(token_id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("qr_token", token_id))?;
            Ok((plaintext, record))
        })
    }

    /// Validates a presented token value and returns its record.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` when no token matches, or
    /// `CoreError::TokenExpiredOrInvalid` when the matching token has
    /// been deactivated or has expired.
    pub fn validate_qr_token(&self, token: &str) -> Result<QrToken, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store
            .read(|tables| validate_token_in(tables, token, now).cloned())
    }

    /// Revokes a token before its expiry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the token does not exist,
    /// `CoreError::PermissionDenied`, or a store error.
    pub fn deactivate_qr_token(
        &self,
        token_id: TokenId,
        deactivated_by: UserId,
    ) -> Result<(), CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let venue_id = tables
                .qr_token(token_id)
                .map(|t| t.venue_id)
                .ok_or_else(|| CoreError::not_found("qr_token", token_id))?;
            permissions::check(
                self.policy,
                tables,
                deactivated_by,
                venue_id,
                "manage_qr_tokens",
            )?;
            if let Some(record) = tables.qr_token_mut(token_id) {
                record.is_active = false;
            }
            audit::record(
                tables,
                Actor::user(deactivated_by),
                "DeactivateQrToken",
                format!("deactivated QR token {token_id}"),
                now,
            );
            Ok(())
        })
    }

    /// Checks a staff member in by presenting a QR token.
    ///
    /// The token must validate and must have been issued for the same
    /// shift the assignment binds.
    ///
    /// # Errors
    ///
    /// Returns the token validation errors, `CoreError::NotFound` if the
    /// assignment does not exist, `CoreError::TokenExpiredOrInvalid` when
    /// the token was issued for a different shift,
    /// `CoreError::InvalidTransition` when the assignment cannot check
    /// in, or a store error.
    pub fn check_in_with_token(
        &self,
        assignment_id: AssignmentId,
        token: &str,
        location: Option<GeoPoint>,
    ) -> Result<CheckIn, CoreError> {
        let now: DateTime<Utc> = self.clock.now();
        self.store.transaction(|tables| {
            let token_shift: ShiftId = validate_token_in(tables, token, now)?.shift_id;
            let assignment_shift: ShiftId = tables
                .assignment(assignment_id)
                .map(|a| a.shift_id)
                .ok_or_else(|| CoreError::not_found("assignment", assignment_id))?;
            if token_shift != assignment_shift {
                return Err(CoreError::TokenExpiredOrInvalid {
                    reason: format!(
                        "token was issued for shift {token_shift}, not shift {assignment_shift}"
                    ),
                });
            }
            open_check_in(tables, assignment_id, location, now)
        })
    }
}

/// Inserts a check-in row after verifying the assignment can check in.
fn open_check_in(
    tables: &mut Tables,
    assignment_id: AssignmentId,
    location: Option<GeoPoint>,
    now: DateTime<Utc>,
) -> Result<CheckIn, CoreError> {
    let assignment: &Assignment = tables
        .assignment(assignment_id)
        .ok_or_else(|| CoreError::not_found("assignment", assignment_id))?;
    if !matches!(
        assignment.status,
        AssignmentStatus::Assigned | AssignmentStatus::Confirmed
    ) {
        return Err(CoreError::InvalidTransition {
            entity: "assignment",
            from: assignment.status.to_string(),
            to: String::from("checked_in"),
        });
    }
    let check_in_id: CheckInId = tables.add_check_in(|id| CheckIn {
        check_in_id: id,
        assignment_id,
        check_in_time: now,
        check_in_location: location,
        check_out_time: None,
        check_out_location: None,
    });
    tables
        .check_in(check_in_id)
        .cloned()
        .ok_or_else(|| CoreError::not_found("check_in", check_in_id))
}
