// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recurrence expansion for recurring shift rules.
//!
//! Expansion is a lazy, finite sequence of dates starting at the rule's
//! anchor, stepping by frequency and interval, ending at the first
//! satisfied end condition. A hard cap bounds the sequence even if a
//! caller supplies a distant end date.
//!
//! ## Invariants
//!
//! - Expansion always terminates.
//! - `Count(n)` produces exactly `min(n, MAX_OCCURRENCES)` dates.
//! - `Until(d)` produces no date after `d`.
//! - Every occurrence is computed from the anchor, not from the
//!   previous occurrence. Monthly expansion clamps to the last day of
//!   shorter months (Jan 31 + 1 month = Feb 28/29) but keeps the
//!   anchor's day-of-month, so March yields the 31st again.

use crate::status::RecurrenceFrequency;
use crate::types::RecurringShiftRule;
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Hard cap on expanded occurrences: two years of daily shifts.
pub const MAX_OCCURRENCES: usize = 731;

/// End condition of a recurring shift rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceEnd {
    /// Expand up to and including this date.
    Until(NaiveDate),
    /// Expand exactly this many occurrences.
    Count(u32),
}

/// Lazy iterator over the occurrence dates of a rule.
#[derive(Debug, Clone)]
pub struct Occurrences {
    anchor: NaiveDate,
    frequency: RecurrenceFrequency,
    interval: u32,
    end: RecurrenceEnd,
    emitted: usize,
    done: bool,
}

impl Occurrences {
    /// Creates an occurrence sequence from raw recurrence parameters.
    ///
    /// A zero `interval` yields an empty sequence; rule creation rejects
    /// it before a rule can be stored.
    #[must_use]
    pub const fn new(
        anchor: NaiveDate,
        frequency: RecurrenceFrequency,
        interval: u32,
        end: RecurrenceEnd,
    ) -> Self {
        Self {
            anchor,
            frequency,
            interval,
            end,
            emitted: 0,
            done: interval == 0,
        }
    }

    /// Computes the `index`-th occurrence relative to the anchor.
    ///
    /// Monthly dates are always `anchor + index * interval` months, so a
    /// clamped short-month occurrence never shifts the ones after it.
    fn nth_occurrence(&self, index: usize) -> Option<NaiveDate> {
        let steps: u64 = u64::try_from(index).ok()? * u64::from(self.interval);
        match self.frequency {
            RecurrenceFrequency::Daily => self.anchor.checked_add_days(Days::new(steps)),
            RecurrenceFrequency::Weekly => self.anchor.checked_add_days(Days::new(steps * 7)),
            RecurrenceFrequency::Biweekly => self.anchor.checked_add_days(Days::new(steps * 14)),
            RecurrenceFrequency::Monthly => {
                let months: u32 = u32::try_from(steps).ok()?;
                self.anchor.checked_add_months(Months::new(months))
            }
        }
    }
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.done || self.emitted >= MAX_OCCURRENCES {
            return None;
        }
        let Some(current) = self.nth_occurrence(self.emitted) else {
            self.done = true;
            return None;
        };
        match self.end {
            RecurrenceEnd::Until(last) if current > last => {
                self.done = true;
                return None;
            }
            RecurrenceEnd::Count(count)
                if self.emitted >= count.try_into().unwrap_or(usize::MAX) =>
            {
                self.done = true;
                return None;
            }
            _ => {}
        }
        self.emitted += 1;
        Some(current)
    }
}

/// Expands a rule into its concrete occurrence dates.
#[must_use]
pub fn expand_dates(rule: &RecurringShiftRule) -> Occurrences {
    Occurrences::new(rule.anchor_date, rule.frequency, rule.interval, rule.end)
}
