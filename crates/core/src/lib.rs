// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! The Rota venue staff shift-scheduling engine.
//!
//! Each manager is constructed over a [`rota_store::Store`] handle plus
//! whatever collaborators it needs (clock, token generator, permission
//! policy) — no globals. Every mutation that changes staff-to-shift
//! bindings runs the conflict detector and commits inside a single store
//! transaction, so a failed step leaves no partial state behind.

mod analytics;
mod assignments;
mod audit;
mod checkin;
mod conflicts;
mod error;
mod permissions;
mod recurrence;
mod scheduler;
mod shifts;
mod tokens;
mod workflow;

#[cfg(test)]
mod tests;

pub use analytics::AnalyticsService;
pub use assignments::AssignmentManager;
pub use checkin::CheckInTracker;
pub use conflicts::{CONFLICT_SCAN_CAP, ConflictDetector, detect_conflicts};
pub use error::CoreError;
pub use permissions::{ActiveTeamMember, AllowAll, PermissionPolicy};
pub use recurrence::RecurrenceManager;
pub use scheduler::{AutoScheduler, ShiftFillReport};
pub use shifts::{ShiftListFilter, ShiftManager};
pub use tokens::{
    FixedTokenGenerator, QR_TOKEN_TTL_HOURS, RandomTokenGenerator, TokenGenerator, token_hash,
};
pub use workflow::WorkflowManager;
