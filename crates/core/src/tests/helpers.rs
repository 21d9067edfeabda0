// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use rota_domain::{PayRate, ShiftDraft, StaffId, StaffMember, UserId, VenueId};
use rota_store::{ManualClock, MemoryStore, Store, StoreError};

pub const VENUE: VenueId = VenueId::new(1);
pub const MANAGER: UserId = UserId::new(100);

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
}

pub fn shift_draft(day: NaiveDate, start: NaiveTime, end: NaiveTime, needed: u32) -> ShiftDraft {
    ShiftDraft {
        venue_id: VENUE,
        event_id: None,
        shift_date: day,
        start_time: start,
        end_time: end,
        department: String::from("Bar"),
        required_role: None,
        staff_needed: needed,
        pay: PayRate::Hourly { rate: 20.0 },
        publish: true,
        remarks: None,
    }
}

pub fn add_staff(store: &MemoryStore, user: i64, rating: f64) -> StaffId {
    add_staff_in(store, user, rating, "Bar", "Bartender")
}

pub fn add_staff_in(
    store: &MemoryStore,
    user: i64,
    rating: f64,
    department: &str,
    role: &str,
) -> StaffId {
    store
        .transaction(|tables| {
            Ok::<_, StoreError>(tables.add_staff_member(|id| StaffMember {
                staff_id: id,
                user_id: UserId::new(user),
                venue_id: VENUE,
                name: format!("Staff {user}"),
                department: department.to_string(),
                role: role.to_string(),
                is_active: true,
                is_available: true,
                performance_rating: rating,
            }))
        })
        .unwrap()
}
