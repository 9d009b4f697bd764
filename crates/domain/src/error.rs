// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required ticket field is missing or empty.
    MissingField(&'static str),
    /// Ticket status string is not recognized.
    InvalidStatus {
        /// The invalid status string.
        status: String,
    },
    /// A status transition is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is rejected.
        reason: String,
    },
    /// Urgency string is not recognized.
    InvalidUrgency(String),
    /// Availability string is not recognized.
    InvalidAvailability(String),
    /// Role string is not recognized.
    UnknownRole(String),
    /// Capability string is not recognized.
    UnknownCapability(String),
    /// Rating is outside the permitted range.
    InvalidRating {
        /// The rejected rating value.
        rating: i32,
    },
    /// Ticket has already been rated.
    AlreadyRated {
        /// The ticket identifier.
        ticket_id: i64,
    },
    /// Rating was attempted on a ticket that is not completed.
    NotRatable {
        /// The ticket identifier.
        ticket_id: i64,
        /// The ticket's current status.
        status: String,
    },
    /// Ticket has already been claimed by a staff member.
    AlreadyClaimed {
        /// The ticket identifier.
        ticket_id: i64,
    },
    /// Rejection requires a non-empty reason.
    EmptyRejectionReason,
    /// Closing requires a non-empty resolution note.
    EmptyResolutionNote,
    /// Ticket does not exist.
    TicketNotFound(i64),
    /// Staff profile does not exist.
    StaffNotFound(i64),
    /// Staff member is on leave and cannot take on work.
    StaffOnLeave {
        /// The staff identifier.
        staff_id: i64,
    },
    /// The caller is not the ticket's requester.
    NotRequester {
        /// The ticket identifier.
        ticket_id: i64,
        /// The caller identifier.
        caller_id: i64,
    },
    /// The caller is not the staff member assigned to the ticket.
    NotAssignedStaff {
        /// The ticket identifier.
        ticket_id: i64,
        /// The caller identifier.
        caller_id: i64,
    },
    /// A ticket field invariant does not hold for its status.
    InvariantViolation {
        /// The ticket identifier.
        ticket_id: i64,
        /// Description of the violated invariant.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Required field '{field}' is missing or empty"),
            Self::InvalidStatus { status } => write!(f, "Invalid ticket status: {status}"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition {from} -> {to}: {reason}")
            }
            Self::InvalidUrgency(msg) => write!(f, "Invalid urgency: {msg}"),
            Self::InvalidAvailability(msg) => write!(f, "Invalid availability: {msg}"),
            Self::UnknownRole(msg) => write!(f, "Unknown role: {msg}"),
            Self::UnknownCapability(msg) => write!(f, "Unknown capability: {msg}"),
            Self::InvalidRating { rating } => {
                write!(f, "Invalid rating: {rating}. Must be between 1 and 5")
            }
            Self::AlreadyRated { ticket_id } => {
                write!(f, "Ticket {ticket_id} has already been rated")
            }
            Self::NotRatable { ticket_id, status } => {
                write!(
                    f,
                    "Ticket {ticket_id} is {status}; only completed tickets may be rated"
                )
            }
            Self::AlreadyClaimed { ticket_id } => {
                write!(f, "Ticket {ticket_id} has already been claimed")
            }
            Self::EmptyRejectionReason => write!(f, "Rejection reason must not be empty"),
            Self::EmptyResolutionNote => write!(f, "Resolution note must not be empty"),
            Self::TicketNotFound(id) => write!(f, "Ticket {id} not found"),
            Self::StaffNotFound(id) => write!(f, "Staff profile {id} not found"),
            Self::StaffOnLeave { staff_id } => write!(f, "Staff member {staff_id} is on leave"),
            Self::NotRequester {
                ticket_id,
                caller_id,
            } => {
                write!(
                    f,
                    "Caller {caller_id} is not the requester of ticket {ticket_id}"
                )
            }
            Self::NotAssignedStaff {
                ticket_id,
                caller_id,
            } => {
                write!(
                    f,
                    "Caller {caller_id} is not the assigned staff of ticket {ticket_id}"
                )
            }
            Self::InvariantViolation { ticket_id, reason } => {
                write!(f, "Ticket {ticket_id} invariant violation: {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
