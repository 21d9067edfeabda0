// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveTime;

use crate::status::ShiftStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Shift start time is not strictly before its end time.
    InvalidShiftTimes {
        /// The offending start time.
        start: NaiveTime,
        /// The offending end time.
        end: NaiveTime,
    },
    /// Staffing need must be at least one.
    InvalidStaffNeeded {
        /// The invalid count.
        count: u32,
    },
    /// Recurrence interval must be at least one.
    InvalidRecurrenceInterval {
        /// The invalid interval.
        interval: u32,
    },
    /// Shift status string is not recognized.
    InvalidShiftStatus(String),
    /// Assignment status string is not recognized.
    InvalidAssignmentStatus(String),
    /// Proposal status string is not recognized.
    InvalidProposalStatus(String),
    /// Request kind string is not recognized.
    InvalidRequestKind(String),
    /// Recurrence frequency string is not recognized.
    InvalidFrequency(String),
    /// A swap must name two distinct staff members.
    SameStaffSwap,
    /// A pickup target must be an open shift.
    ShiftNotOpen {
        /// The shift's actual status.
        status: ShiftStatus,
    },
    /// The recurring rule has been deactivated.
    InactiveRule,
    /// The template has been deactivated.
    InactiveTemplate,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidShiftTimes { start, end } => {
                write!(f, "Shift start time {start} must be before end time {end}")
            }
            Self::InvalidStaffNeeded { count } => {
                write!(f, "Invalid staffing need: {count}. Must be at least 1")
            }
            Self::InvalidRecurrenceInterval { interval } => {
                write!(f, "Invalid recurrence interval: {interval}. Must be at least 1")
            }
            Self::InvalidShiftStatus(value) => write!(f, "Invalid shift status: {value}"),
            Self::InvalidAssignmentStatus(value) => {
                write!(f, "Invalid assignment status: {value}")
            }
            Self::InvalidProposalStatus(value) => write!(f, "Invalid proposal status: {value}"),
            Self::InvalidRequestKind(value) => write!(f, "Invalid request kind: {value}"),
            Self::InvalidFrequency(value) => write!(f, "Invalid recurrence frequency: {value}"),
            Self::SameStaffSwap => {
                write!(f, "A swap must name a staff member other than the current one")
            }
            Self::ShiftNotOpen { status } => {
                write!(f, "Shift is not open for pickup (status: {status})")
            }
            Self::InactiveRule => write!(f, "Recurring shift rule has been deactivated"),
            Self::InactiveTemplate => write!(f, "Shift template has been deactivated"),
        }
    }
}

impl std::error::Error for DomainError {}
