// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use helpdesk_domain::Urgency;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request ticket state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a new ticket.
    CreateTicket {
        /// The requesting user's identifier.
        requester_id: i64,
        /// Short summary of the problem.
        title: String,
        /// Full problem description.
        description: String,
        /// Free-form category label.
        category: String,
        /// Requester-chosen urgency.
        urgency: Urgency,
        /// Optional room or location reference.
        room_id: Option<i64>,
        /// Optional equipment reference.
        equipment_id: Option<i64>,
    },
    /// Claim an unassigned ticket for a staff member.
    AcceptTicket {
        /// The staff member claiming the ticket.
        staff_id: i64,
    },
    /// Decline an unassigned ticket with a reason.
    RejectTicket {
        /// The staff member declining the ticket.
        staff_id: i64,
        /// Why the ticket is being declined.
        reason: String,
    },
    /// Resolve and close an in-progress ticket.
    CloseTicket {
        /// The caller closing the ticket.
        actor_id: i64,
        /// Whether the caller may close tickets assigned to others.
        can_override_assignee: bool,
        /// What was done to resolve the ticket.
        resolution_note: String,
        /// Attachment URLs to append, in submission order.
        attachments: Vec<String>,
    },
    /// Record the requester's satisfaction rating on a closed ticket.
    RateTicket {
        /// The caller submitting the rating.
        caller_id: i64,
        /// The rating value (1-5).
        rating: i32,
    },
}
