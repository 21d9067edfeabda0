// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};
use rota_audit::{Action, Actor, AuditEvent};
use rota_store::Tables;

/// Appends one audit event inside the current transaction.
///
/// Every successful mutation records exactly one event; a rolled-back
/// transaction discards the event along with everything else.
pub fn record(
    tables: &mut Tables,
    actor: Actor,
    action: &str,
    detail: String,
    now: DateTime<Utc>,
) {
    tables.record_audit(AuditEvent::new(
        actor,
        Action::new(action.to_string(), Some(detail)),
        now,
    ));
}
