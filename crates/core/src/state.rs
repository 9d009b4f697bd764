// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use helpdesk_domain::{StaffProfile, Ticket, TicketStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The snapshot a command is evaluated against.
///
/// `ticket` is the current row read before the transition (`None` for
/// creation). `actor_staff` is the staff profile of the acting caller,
/// when one exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// The ticket being acted on, if it already exists.
    pub ticket: Option<Ticket>,
    /// The acting caller's staff profile, if they have one.
    pub actor_staff: Option<StaffProfile>,
}

impl State {
    /// Creates a snapshot for ticket creation (no prior row).
    #[must_use]
    pub const fn for_creation() -> Self {
        Self {
            ticket: None,
            actor_staff: None,
        }
    }

    /// Creates a snapshot around an existing ticket.
    #[must_use]
    pub const fn for_ticket(ticket: Ticket, actor_staff: Option<StaffProfile>) -> Self {
        Self {
            ticket: Some(ticket),
            actor_staff,
        }
    }
}

/// The kind of a notification fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A new ticket was opened.
    TicketCreated,
    /// A ticket the recipient cares about changed state.
    TicketUpdated,
}

impl NotificationKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TicketCreated => "ticket_created",
            Self::TicketUpdated => "ticket_updated",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ticket_created" => Ok(Self::TicketCreated),
            "ticket_updated" => Ok(Self::TicketUpdated),
            _ => Err(format!("unknown notification kind: {s}")),
        }
    }
}

/// Who a transition notifies.
///
/// The engine plans the fan-out; the dispatcher resolves recipient
/// lists and persists rows after the transition commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FanOut {
    /// No notification for this transition.
    None,
    /// Notify every staff member holding the view capability.
    BroadcastToStaff,
    /// Notify the ticket's requester.
    Requester {
        /// The requester's identifier.
        requester_id: i64,
    },
}

/// The staff availability side effect of a transition.
///
/// Applied in the same transaction as the ticket update. `OnLeave`
/// profiles are never touched by these effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityEffect {
    /// No availability change.
    None,
    /// Mark the staff member busy.
    MarkBusy {
        /// The staff member's identifier.
        staff_id: i64,
    },
    /// Mark the staff member available again, unless other in-progress
    /// tickets remain assigned to them.
    RecomputeAfterClose {
        /// The staff member's identifier.
        staff_id: i64,
    },
}

/// The result of a successful transition plan.
///
/// The plan is advisory until the persistence layer executes it: the
/// guarded update must still match `expected_status` (and, for rating,
/// an unset rating column) at commit time, or the transition is
/// reported as a conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The ticket as it should read after the transition.
    pub ticket: Ticket,
    /// Status the stored row must still hold for the update to apply.
    /// `None` for creation (a plain insert).
    pub expected_status: Option<TicketStatus>,
    /// Staff availability change to apply in the same transaction.
    pub availability_effect: AvailabilityEffect,
    /// Notification fan-out to dispatch after commit.
    pub fan_out: FanOut,
    /// Kind of the planned notification, when `fan_out` names one.
    pub notification_kind: Option<NotificationKind>,
}
