// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The permission seam between the engine and the hosting platform.
//!
//! The engine only ever asks one question: may this user perform this
//! action at this venue? The shipped policy answers with team
//! membership; anything finer-grained is the embedding service's policy
//! engine, injected through the same trait.

use crate::error::CoreError;
use rota_domain::{UserId, VenueId};
use rota_store::Tables;

/// Decides whether a user may perform an action at a venue.
pub trait PermissionPolicy: Send + Sync {
    /// Returns whether `user_id` may perform `action` at `venue_id`.
    fn allows(&self, tables: &Tables, user_id: UserId, venue_id: VenueId, action: &str) -> bool;
}

/// Permits any user with an active roster entry at the venue, with no
/// per-action granularity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveTeamMember;

impl PermissionPolicy for ActiveTeamMember {
    fn allows(&self, tables: &Tables, user_id: UserId, venue_id: VenueId, _action: &str) -> bool {
        tables
            .staff_for_venue(venue_id)
            .any(|s| s.user_id == user_id && s.is_active)
    }
}

/// Permits everything. Useful for tests and trusted embeddings.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionPolicy for AllowAll {
    fn allows(&self, _tables: &Tables, _user_id: UserId, _venue_id: VenueId, _action: &str) -> bool {
        true
    }
}

/// Maps a policy denial to `CoreError::PermissionDenied`.
///
/// # Errors
///
/// Returns `CoreError::PermissionDenied` when the policy says no.
pub fn check(
    policy: &dyn PermissionPolicy,
    tables: &Tables,
    user_id: UserId,
    venue_id: VenueId,
    action: &'static str,
) -> Result<(), CoreError> {
    if policy.allows(tables, user_id, venue_id, action) {
        Ok(())
    } else {
        Err(CoreError::PermissionDenied {
            user_id,
            venue_id,
            action,
        })
    }
}
