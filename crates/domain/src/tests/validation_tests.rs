// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::tests::helpers::time;
use crate::validation::{
    validate_recurrence_interval, validate_shift_times, validate_staff_needed,
};

#[test]
fn test_start_before_end_is_valid() {
    assert!(validate_shift_times(time(18, 0), time(22, 0)).is_ok());
}

#[test]
fn test_start_equal_to_end_is_rejected() {
    let result = validate_shift_times(time(18, 0), time(18, 0));
    assert_eq!(
        result,
        Err(DomainError::InvalidShiftTimes {
            start: time(18, 0),
            end: time(18, 0),
        })
    );
}

#[test]
fn test_start_after_end_is_rejected() {
    assert!(validate_shift_times(time(22, 0), time(18, 0)).is_err());
}

#[test]
fn test_staff_needed_must_be_positive() {
    assert!(validate_staff_needed(1).is_ok());
    assert_eq!(
        validate_staff_needed(0),
        Err(DomainError::InvalidStaffNeeded { count: 0 })
    );
}

#[test]
fn test_recurrence_interval_must_be_positive() {
    assert!(validate_recurrence_interval(1).is_ok());
    assert_eq!(
        validate_recurrence_interval(0),
        Err(DomainError::InvalidRecurrenceInterval { interval: 0 })
    );
}
