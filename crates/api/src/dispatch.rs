// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification fan-out after a committed transition.
//!
//! Dispatch is best-effort: a failure to resolve recipients or persist
//! rows is logged and swallowed, never failing the request that
//! triggered it. Replays are absorbed by the persistence layer's
//! dedupe key of (recipient, ticket, kind, transition instant).

use std::collections::HashMap;

use helpdesk::{FanOut, NotificationKind};
use helpdesk_domain::{Capability, Role, Ticket};
use helpdesk_persistence::{NewNotification, SqlitePersistence};

/// Resolves recipients for a committed transition and persists their
/// notification rows.
///
/// `transitioned_at` identifies the transition instant and feeds the
/// dedupe key, so dispatching the same transition twice inserts
/// nothing new the second time.
///
/// Returns the number of rows actually inserted.
pub fn dispatch_notifications(
    persistence: &mut SqlitePersistence,
    ticket: &Ticket,
    fan_out: &FanOut,
    kind: NotificationKind,
    transitioned_at: &str,
    now: &str,
) -> usize {
    let Some(ticket_id) = ticket.ticket_id else {
        tracing::warn!("skipping dispatch for unpersisted ticket");
        return 0;
    };

    let recipients: Vec<i64> = match fan_out {
        FanOut::None => return 0,
        FanOut::Requester { requester_id } => vec![*requester_id],
        FanOut::BroadcastToStaff => match resolve_viewing_staff(persistence, ticket.requester_id) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(ticket_id, error = %e, "failed to resolve broadcast recipients");
                return 0;
            }
        },
    };

    if recipients.is_empty() {
        return 0;
    }

    let body: String = notification_body(ticket, kind);
    let rows: Vec<NewNotification> = recipients
        .into_iter()
        .map(|recipient_id| NewNotification {
            recipient_id,
            ticket_id,
            kind: kind.as_str().to_string(),
            body: body.clone(),
            transitioned_at: transitioned_at.to_string(),
            created_at: now.to_string(),
        })
        .collect();

    match persistence.insert_notifications(&rows) {
        Ok(inserted) => {
            tracing::debug!(ticket_id, inserted, kind = kind.as_str(), "dispatched notifications");
            inserted
        }
        Err(e) => {
            tracing::warn!(ticket_id, error = %e, "failed to persist notifications");
            0
        }
    }
}

/// Resolves every staff member whose role currently grants the view
/// capability, excluding the requester themselves.
fn resolve_viewing_staff(
    persistence: &mut SqlitePersistence,
    requester_id: i64,
) -> Result<Vec<i64>, helpdesk_persistence::PersistenceError> {
    let staff = persistence.list_staff(None)?;

    // One permission read per distinct role, not per staff member.
    let mut role_allows: HashMap<Role, bool> = HashMap::new();
    let mut recipients: Vec<i64> = Vec::new();
    for profile in staff {
        // A requester who is also view-holding staff is not notified
        // about their own ticket; they already hold its creation
        // response.
        if profile.staff_id == requester_id {
            continue;
        }
        let allowed: bool = match role_allows.get(&profile.role) {
            Some(allowed) => *allowed,
            None => {
                let allowed: bool = persistence
                    .get_role_permissions(profile.role)?
                    .allows(Capability::ViewTickets);
                role_allows.insert(profile.role, allowed);
                allowed
            }
        };
        if allowed {
            recipients.push(profile.staff_id);
        }
    }
    Ok(recipients)
}

fn notification_body(ticket: &Ticket, kind: NotificationKind) -> String {
    match kind {
        NotificationKind::TicketCreated => {
            format!("New ticket: {}", ticket.title)
        }
        NotificationKind::TicketUpdated => {
            format!("Ticket '{}' is now {}", ticket.title, ticket.status.as_str())
        }
    }
}
