// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::NaiveTime;

/// Validates that a shift's start time strictly precedes its end time.
///
/// Shifts are single-day; overnight ranges are rejected here.
///
/// # Errors
///
/// Returns `DomainError::InvalidShiftTimes` if `start >= end`.
pub fn validate_shift_times(start: NaiveTime, end: NaiveTime) -> Result<(), DomainError> {
    if start >= end {
        return Err(DomainError::InvalidShiftTimes { start, end });
    }
    Ok(())
}

/// Validates that a shift needs at least one staff member.
///
/// # Errors
///
/// Returns `DomainError::InvalidStaffNeeded` if `count` is zero.
pub const fn validate_staff_needed(count: u32) -> Result<(), DomainError> {
    if count == 0 {
        return Err(DomainError::InvalidStaffNeeded { count });
    }
    Ok(())
}

/// Validates that a recurrence interval is at least one.
///
/// # Errors
///
/// Returns `DomainError::InvalidRecurrenceInterval` if `interval` is zero.
pub const fn validate_recurrence_interval(interval: u32) -> Result<(), DomainError> {
    if interval == 0 {
        return Err(DomainError::InvalidRecurrenceInterval { interval });
    }
    Ok(())
}
