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
    clippy::all
)]

//! Audit types for the Rota shift engine.
//!
//! Every successful mutation of scheduling state must produce exactly one
//! audit event, committed in the same transaction as the mutation itself.
//! Events are immutable once created.

use chrono::{DateTime, Utc};
use rota_domain::UserId;
use serde::{Deserialize, Serialize};

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// a user, or the system itself (e.g. the auto-scheduler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g. "user", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates an actor for a platform user.
    #[must_use]
    pub fn user(user_id: UserId) -> Self {
        Self {
            id: user_id.to_string(),
            actor_type: String::from("user"),
        }
    }

    /// Creates a system actor (e.g. a scheduled job).
    #[must_use]
    pub fn system(name: &str) -> Self {
        Self {
            id: name.to_string(),
            actor_type: String::from("system"),
        }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g. "`AssignStaff`", "`ApproveSwap`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// An immutable audit event recording one committed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Who performed the action.
    pub actor: Actor,
    /// What action was performed.
    pub action: Action,
    /// When the action was committed.
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - Who performed the action
    /// * `action` - What action was performed
    /// * `occurred_at` - When the action was committed
    #[must_use]
    pub const fn new(actor: Actor, action: Action, occurred_at: DateTime<Utc>) -> Self {
        Self {
            actor,
            action,
            occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_actor_carries_user_id() {
        let actor: Actor = Actor::user(UserId::new(42));
        assert_eq!(actor.id, "42");
        assert_eq!(actor.actor_type, "user");
    }

    #[test]
    fn test_system_actor() {
        let actor: Actor = Actor::system("auto-scheduler");
        assert_eq!(actor.id, "auto-scheduler");
        assert_eq!(actor.actor_type, "system");
    }

    #[test]
    fn test_event_round_trips_through_json() {
        let event: AuditEvent = AuditEvent::new(
            Actor::user(UserId::new(7)),
            Action::new(
                String::from("AssignStaff"),
                Some(String::from("staff 3 onto shift 9")),
            ),
            Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap(),
        );

        let json: String = serde_json::to_string(&event).unwrap();
        let back: AuditEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
