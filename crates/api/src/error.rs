// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use helpdesk::CoreError;
use helpdesk_domain::DomainError;
use helpdesk_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent
/// the API contract. Each variant maps to exactly one HTTP status at
/// the server boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    ValidationError {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The request lost a race or targeted a stale lifecycle state.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The caller does not hold the capability this action requires.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// A human-readable description of the denial.
        message: String,
    },
    /// A requested resource was not found.
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The targeted staff member cannot take on work right now.
    Unavailable {
        /// A human-readable description of the unavailability.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationError { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Conflict { message } => {
                write!(f, "Conflict: {message}")
            }
            Self::Forbidden { action, message } => {
                write!(f, "Forbidden: '{action}': {message}")
            }
            Self::NotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Unavailable { message } => {
                write!(f, "Unavailable: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::MissingField(field) => ApiError::ValidationError {
            field: field.to_string(),
            message: format!("Required field '{field}' is missing or empty"),
        },
        DomainError::InvalidStatus { status } => ApiError::ValidationError {
            field: String::from("status"),
            message: format!("Invalid ticket status: {status}"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => ApiError::Conflict {
            message: format!("Cannot move ticket from '{from}' to '{to}': {reason}"),
        },
        DomainError::InvalidUrgency(msg) => ApiError::ValidationError {
            field: String::from("urgency"),
            message: format!("Invalid urgency: {msg}"),
        },
        DomainError::InvalidAvailability(msg) => ApiError::ValidationError {
            field: String::from("availability"),
            message: format!("Invalid availability: {msg}"),
        },
        DomainError::UnknownRole(msg) => ApiError::ValidationError {
            field: String::from("role"),
            message: format!("Unknown role: {msg}"),
        },
        DomainError::UnknownCapability(msg) => ApiError::ValidationError {
            field: String::from("capability"),
            message: format!("Unknown capability: {msg}"),
        },
        DomainError::InvalidRating { rating } => ApiError::ValidationError {
            field: String::from("rating"),
            message: format!("Invalid rating: {rating}. Must be between 1 and 5"),
        },
        // A repeated or premature rating is invalid input, not a lost
        // race: both report as validation failures.
        DomainError::AlreadyRated { ticket_id } => ApiError::ValidationError {
            field: String::from("rating"),
            message: format!("Ticket {ticket_id} has already been rated"),
        },
        DomainError::NotRatable { ticket_id, status } => ApiError::ValidationError {
            field: String::from("rating"),
            message: format!("Ticket {ticket_id} is {status}; only completed tickets may be rated"),
        },
        DomainError::AlreadyClaimed { ticket_id } => ApiError::Conflict {
            message: format!("Ticket {ticket_id} has already been claimed"),
        },
        DomainError::EmptyRejectionReason => ApiError::ValidationError {
            field: String::from("reason"),
            message: String::from("Rejection reason must not be empty"),
        },
        DomainError::EmptyResolutionNote => ApiError::ValidationError {
            field: String::from("resolution_note"),
            message: String::from("Resolution note must not be empty"),
        },
        DomainError::TicketNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Ticket"),
            message: format!("Ticket {id} does not exist"),
        },
        DomainError::StaffNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Staff profile"),
            message: format!("Staff profile {id} does not exist"),
        },
        DomainError::StaffOnLeave { staff_id } => ApiError::Unavailable {
            message: format!("Staff member {staff_id} is on leave and cannot take on work"),
        },
        DomainError::NotRequester {
            ticket_id,
            caller_id,
        } => ApiError::Forbidden {
            action: String::from("rate_ticket"),
            message: format!("Caller {caller_id} is not the requester of ticket {ticket_id}"),
        },
        DomainError::NotAssignedStaff {
            ticket_id,
            caller_id,
        } => ApiError::Forbidden {
            action: String::from("close_ticket"),
            message: format!("Caller {caller_id} is not the assigned staff of ticket {ticket_id}"),
        },
        DomainError::InvariantViolation { ticket_id, reason } => ApiError::Internal {
            message: format!("Ticket {ticket_id} invariant violation: {reason}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Guarded-update conflicts surface as `Conflict`; row lookups that
/// came back empty surface as `NotFound`. Everything else is an
/// internal failure and is reported without database detail.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::TransitionConflict { ticket_id } => ApiError::Conflict {
            message: format!("Ticket {ticket_id} changed state since it was read"),
        },
        PersistenceError::TicketNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Ticket"),
            message: format!("Ticket {id} does not exist"),
        },
        PersistenceError::StaffNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Staff profile"),
            message: format!("Staff profile {id} does not exist"),
        },
        PersistenceError::RoleNotFound(role) => ApiError::NotFound {
            resource_type: String::from("Role"),
            message: format!("Role '{role}' has no permission row"),
        },
        PersistenceError::NotificationNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Notification"),
            message: format!("Notification {id} does not exist"),
        },
        PersistenceError::NotFound(what) => ApiError::NotFound {
            resource_type: String::from("Resource"),
            message: what,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
