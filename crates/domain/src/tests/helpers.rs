// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::ShiftStatus;
use crate::types::{PayRate, Shift, ShiftId, UserId, VenueId};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn test_shift(id: i64, day: NaiveDate, start: NaiveTime, end: NaiveTime) -> Shift {
    Shift {
        shift_id: ShiftId::new(id),
        venue_id: VenueId::new(1),
        event_id: None,
        shift_date: day,
        start_time: start,
        end_time: end,
        department: String::from("Bar"),
        required_role: None,
        staff_needed: 2,
        staff_assigned: 0,
        pay: PayRate::Hourly { rate: 20.0 },
        status: ShiftStatus::Open,
        created_by: UserId::new(1),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        recurring_rule_id: None,
        remarks: None,
    }
}
