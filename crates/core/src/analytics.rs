// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Venue schedule analytics over a date window.

use crate::error::CoreError;
use chrono::NaiveDate;
use rota_domain::{ScheduleAnalytics, Shift, VenueId, compute_schedule_analytics};
use rota_store::Store;

/// Read-only analytics queries.
pub struct AnalyticsService<'a, S> {
    store: &'a S,
}

impl<'a, S: Store> AnalyticsService<'a, S> {
    /// Creates a service over a store handle.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Aggregates a venue's shifts over an inclusive date window.
    ///
    /// # Errors
    ///
    /// Returns a store error if the read fails.
    pub fn schedule_analytics(
        &self,
        venue_id: VenueId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ScheduleAnalytics, CoreError> {
        self.store.read(|tables| {
            let shifts: Vec<Shift> = tables
                .shifts_for_venue(venue_id)
                .filter(|shift| shift.shift_date >= start && shift.shift_date <= end)
                .cloned()
                .collect();
            Ok(compute_schedule_analytics(&shifts))
        })
    }
}
