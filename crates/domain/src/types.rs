// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::ticket_status::TicketStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents a caller's role.
///
/// Roles are closed: the permission store holds exactly one row per
/// role, and unknown role strings are rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// IT support staff working the ticket queue.
    ItSupport,
    /// Regular end user raising tickets.
    User,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ItSupport => "it_support",
            Self::User => "user",
        }
    }

    /// All roles, in display order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Admin, Self::ItSupport, Self::User]
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "it_support" => Ok(Self::ItSupport),
            "user" => Ok(Self::User),
            _ => Err(DomainError::UnknownRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Urgency of a ticket, chosen by the requester at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Can wait.
    Low,
    /// Normal queue priority.
    #[default]
    Medium,
    /// Blocking the requester's work.
    High,
    /// Blocking multiple people or a shared resource.
    Critical,
}

impl Urgency {
    /// Converts this urgency to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for Urgency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(DomainError::InvalidUrgency(s.to_string())),
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Availability of a staff member.
///
/// `OnLeave` is an explicit administrative toggle and takes precedence
/// over the engine-derived `Available`/`Busy` states: the lifecycle
/// engine never overwrites it, and an on-leave staff member cannot
/// accept tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// No in-progress tickets assigned.
    #[default]
    Available,
    /// At least one in-progress ticket assigned.
    Busy,
    /// Explicitly marked on leave; excluded from new work.
    OnLeave,
}

impl Availability {
    /// Converts this availability to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::OnLeave => "on_leave",
        }
    }

    /// Returns true if this staff member may claim new tickets.
    #[must_use]
    pub const fn can_accept_work(&self) -> bool {
        matches!(self, Self::Available | Self::Busy)
    }
}

impl FromStr for Availability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "busy" => Ok(Self::Busy),
            "on_leave" => Ok(Self::OnLeave),
            _ => Err(DomainError::InvalidAvailability(s.to_string())),
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A staff member's directory profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfile {
    /// The staff member's user identifier.
    pub staff_id: i64,
    /// Display name.
    pub name: String,
    /// The staff member's role.
    pub role: Role,
    /// Current availability.
    pub availability: Availability,
    /// The in-progress ticket the staff member is working, if any.
    /// A display hint maintained by the lifecycle engine's availability
    /// effects; the tickets table remains the authoritative assignment
    /// record.
    pub current_ticket_id: Option<i64>,
}

impl StaffProfile {
    /// Creates a new profile in the default `Available` state.
    #[must_use]
    pub const fn new(staff_id: i64, name: String, role: Role) -> Self {
        Self {
            staff_id,
            name,
            role,
            availability: Availability::Available,
            current_ticket_id: None,
        }
    }
}

/// A support ticket.
///
/// Timestamps are ISO 8601 strings assigned by the layer that performs
/// the transition. Optional fields are populated only in the lifecycle
/// states that define them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the ticket has not been persisted yet.
    pub ticket_id: Option<i64>,
    /// The requesting user's identifier.
    pub requester_id: i64,
    /// Short summary of the problem.
    pub title: String,
    /// Full problem description.
    pub description: String,
    /// Free-form category label (e.g. "hardware", "network").
    pub category: String,
    /// Requester-chosen urgency.
    pub urgency: Urgency,
    /// Optional room or location reference.
    pub room_id: Option<i64>,
    /// Optional equipment reference.
    pub equipment_id: Option<i64>,
    /// Current lifecycle status.
    pub status: TicketStatus,
    /// Staff member assigned by `accept`; set exactly once.
    pub assigned_staff_id: Option<i64>,
    /// Reason recorded by `reject`.
    pub rejection_reason: Option<String>,
    /// Resolution note recorded by `close`.
    pub resolution_note: Option<String>,
    /// Attachment URLs recorded by `close`, in submission order.
    pub attachments: Vec<String>,
    /// Requester satisfaction rating (1-5), recorded at most once.
    pub rating: Option<i32>,
    /// Creation instant.
    pub created_at: String,
    /// Instant of the terminal transition, when one has occurred.
    pub resolved_at: Option<String>,
}

impl Ticket {
    /// Creates a new unpersisted ticket in the `NotStarted` state.
    #[must_use]
    pub fn new(
        requester_id: i64,
        title: String,
        description: String,
        category: String,
        urgency: Urgency,
        created_at: String,
    ) -> Self {
        Self {
            ticket_id: None,
            requester_id,
            title,
            description,
            category,
            urgency,
            room_id: None,
            equipment_id: None,
            status: TicketStatus::NotStarted,
            assigned_staff_id: None,
            rejection_reason: None,
            resolution_note: None,
            attachments: Vec::new(),
            rating: None,
            created_at,
            resolved_at: None,
        }
    }

    /// Returns the persisted identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TicketNotFound` for an unpersisted ticket.
    pub fn id(&self) -> Result<i64, DomainError> {
        self.ticket_id.ok_or(DomainError::TicketNotFound(0))
    }

    /// Checks the per-status field invariants.
    ///
    /// `InProgress` requires an assignee; `Rejected` requires a reason
    /// and forbids an assignee; `Completed` requires an assignee and a
    /// resolution note; a rating may exist only on a `Completed` ticket.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvariantViolation` naming the first
    /// violated invariant.
    pub fn check_invariants(&self) -> Result<(), DomainError> {
        let ticket_id = self.ticket_id.unwrap_or_default();
        let violation = |reason: &str| DomainError::InvariantViolation {
            ticket_id,
            reason: reason.to_string(),
        };

        match self.status {
            TicketStatus::NotStarted => {
                if self.assigned_staff_id.is_some() {
                    return Err(violation("not_started ticket must have no assignee"));
                }
            }
            TicketStatus::InProgress => {
                if self.assigned_staff_id.is_none() {
                    return Err(violation("in_progress ticket must have an assignee"));
                }
            }
            TicketStatus::Completed => {
                if self.assigned_staff_id.is_none() {
                    return Err(violation("completed ticket must have an assignee"));
                }
                if self.resolution_note.is_none() {
                    return Err(violation("completed ticket must have a resolution note"));
                }
            }
            TicketStatus::Rejected => {
                if self.assigned_staff_id.is_some() {
                    return Err(violation("rejected ticket must have no assignee"));
                }
                if self.rejection_reason.is_none() {
                    return Err(violation("rejected ticket must have a rejection reason"));
                }
            }
        }

        if self.rating.is_some() && self.status != TicketStatus::Completed {
            return Err(violation("only completed tickets may carry a rating"));
        }

        Ok(())
    }
}
