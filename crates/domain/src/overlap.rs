// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The half-open interval overlap predicate behind conflict detection.
//!
//! Shift intervals are `[start, end)`: a shift ending at 20:00 does not
//! overlap one starting at 20:00. The predicate is symmetric, so detection
//! from either side of a pair yields the same verdict.

use crate::types::{Shift, ShiftId};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Returns whether two half-open time intervals on the same date overlap.
#[must_use]
pub fn intervals_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Returns whether two shifts occupy overlapping time on the same date.
#[must_use]
pub fn shifts_overlap(a: &Shift, b: &Shift) -> bool {
    a.shift_date == b.shift_date
        && intervals_overlap(a.start_time, a.end_time, b.start_time, b.end_time)
}

/// The kind of a detected scheduling conflict.
///
/// Availability-calendar and time-off conflicts are deliberately not
/// modeled; overlap is the only kind the engine detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// An existing assignment overlaps the candidate shift in time.
    Overlap,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overlap => write!(f, "overlap"),
        }
    }
}

/// One detected conflict between a candidate shift and an existing
/// assignment held by the same staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// The kind of conflict.
    pub kind: ConflictKind,
    /// The shift the staff member was being considered for.
    pub candidate_shift_id: ShiftId,
    /// The already-assigned shift that clashes.
    pub existing_shift_id: ShiftId,
    /// Human-readable description of the clash.
    pub detail: String,
    /// What the caller can do about it.
    pub suggested_resolution: String,
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}
