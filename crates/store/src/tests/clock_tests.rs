// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::clock::{Clock, ManualClock, SystemClock};
use chrono::{DateTime, Duration, TimeZone, Utc};

#[test]
fn test_manual_clock_is_frozen_until_advanced() {
    let start: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let clock: ManualClock = ManualClock::new(start);

    assert_eq!(clock.now(), start);
    assert_eq!(clock.now(), start);

    clock.advance(Duration::hours(24));
    assert_eq!(clock.now(), start + Duration::hours(24));
}

#[test]
fn test_manual_clock_set_absolute() {
    let clock: ManualClock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    let target: DateTime<Utc> = Utc.with_ymd_and_hms(2025, 3, 9, 8, 30, 0).unwrap();

    clock.set(target);
    assert_eq!(clock.now(), target);
}

#[test]
fn test_system_clock_moves_forward() {
    let clock: SystemClock = SystemClock;
    let first: DateTime<Utc> = clock.now();
    let second: DateTime<Utc> = clock.now();
    assert!(second >= first);
}
