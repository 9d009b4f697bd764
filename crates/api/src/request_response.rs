// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use helpdesk_domain::{
    Availability, PermissionSet, Role, ScheduleEntry, StaffProfile, Ticket, TicketStatus, Urgency,
};
use helpdesk_persistence::NotificationData;

use crate::error::{ApiError, translate_domain_error};

/// API request to open a new ticket.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateTicketRequest {
    /// Short summary of the problem.
    pub title: String,
    /// Full problem description.
    pub description: String,
    /// Free-form category label (e.g. "hardware", "network").
    pub category: String,
    /// Requester-chosen urgency; defaults to medium when omitted.
    pub urgency: Option<Urgency>,
    /// Optional room or location reference.
    pub room_id: Option<i64>,
    /// Optional equipment reference.
    pub equipment_id: Option<i64>,
}

/// API request to reject a ticket.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RejectTicketRequest {
    /// Why the ticket is being rejected.
    pub reason: String,
}

/// API request to close a ticket.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CloseTicketRequest {
    /// What was done to resolve the ticket.
    pub resolution_note: String,
    /// Attachment URLs to record with the resolution.
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// API request to rate a completed ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RateTicketRequest {
    /// Satisfaction rating, 1 through 5.
    pub rating: i32,
}

/// Filters and paging for the ticket listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListTicketsRequest {
    /// Restrict to a single lifecycle status.
    pub status: Option<TicketStatus>,
    /// Restrict to an exact category.
    pub category: Option<String>,
    /// Case-insensitive substring match over title and description.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Page size.
    pub limit: Option<i64>,
}

/// A ticket as presented at the API boundary.
///
/// This DTO is distinct from the domain type: it always carries a
/// persisted identifier.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TicketInfo {
    /// The canonical numeric identifier.
    pub ticket_id: i64,
    /// The requesting user's identifier.
    pub requester_id: i64,
    /// Short summary of the problem.
    pub title: String,
    /// Full problem description.
    pub description: String,
    /// Free-form category label.
    pub category: String,
    /// Requester-chosen urgency.
    pub urgency: Urgency,
    /// Optional room or location reference.
    pub room_id: Option<i64>,
    /// Optional equipment reference.
    pub equipment_id: Option<i64>,
    /// Current lifecycle status.
    pub status: TicketStatus,
    /// Assigned staff member, once claimed.
    pub assigned_staff_id: Option<i64>,
    /// Reason recorded by rejection.
    pub rejection_reason: Option<String>,
    /// Resolution note recorded by closure.
    pub resolution_note: Option<String>,
    /// Attachment URLs recorded by closure.
    pub attachments: Vec<String>,
    /// Requester satisfaction rating (1-5), when recorded.
    pub rating: Option<i32>,
    /// Creation instant, ISO 8601.
    pub created_at: String,
    /// Instant of the terminal transition, when one has occurred.
    pub resolved_at: Option<String>,
}

impl TicketInfo {
    /// Builds the DTO from a persisted domain ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket carries no identifier, which
    /// indicates it was never persisted.
    pub fn from_ticket(ticket: Ticket) -> Result<Self, ApiError> {
        let ticket_id: i64 = ticket.id().map_err(translate_domain_error)?;
        Ok(Self {
            ticket_id,
            requester_id: ticket.requester_id,
            title: ticket.title,
            description: ticket.description,
            category: ticket.category,
            urgency: ticket.urgency,
            room_id: ticket.room_id,
            equipment_id: ticket.equipment_id,
            status: ticket.status,
            assigned_staff_id: ticket.assigned_staff_id,
            rejection_reason: ticket.rejection_reason,
            resolution_note: ticket.resolution_note,
            attachments: ticket.attachments,
            rating: ticket.rating,
            created_at: ticket.created_at,
            resolved_at: ticket.resolved_at,
        })
    }
}

/// One page of tickets plus paging metadata.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListTicketsResponse {
    /// The tickets on this page, newest first.
    pub data: Vec<TicketInfo>,
    /// Total number of tickets matching the filter.
    pub total: i64,
    /// The 1-based page number served.
    pub page: i64,
    /// Total number of pages for this filter.
    pub total_pages: i64,
}

/// The permission flag set for one role.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RolePermissionsResponse {
    /// The role the flags apply to.
    pub role: Role,
    /// The currently persisted capability flags.
    pub permissions: PermissionSet,
}

/// API request to replace a role's permission flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdatePermissionsRequest {
    /// The new capability flags for the role.
    pub permissions: PermissionSet,
}

/// A notification as presented at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NotificationInfo {
    /// The canonical numeric identifier.
    pub notification_id: i64,
    /// The ticket the notification is about.
    pub ticket_id: i64,
    /// The notification kind (`ticket_created` or `ticket_updated`).
    pub kind: String,
    /// Human-readable notification body.
    pub body: String,
    /// Whether the recipient has read the notification.
    pub is_read: bool,
    /// Creation instant, ISO 8601.
    pub created_at: String,
}

impl From<NotificationData> for NotificationInfo {
    fn from(data: NotificationData) -> Self {
        Self {
            notification_id: data.notification_id,
            ticket_id: data.ticket_id,
            kind: data.kind,
            body: data.body,
            is_read: data.is_read,
            created_at: data.created_at,
        }
    }
}

/// A staff directory entry as presented at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StaffInfo {
    /// The staff member's user identifier.
    pub staff_id: i64,
    /// Display name.
    pub name: String,
    /// The staff member's role.
    pub role: Role,
    /// Current availability.
    pub availability: Availability,
    /// The in-progress ticket being worked, if any (display hint).
    pub current_ticket_id: Option<i64>,
}

impl From<StaffProfile> for StaffInfo {
    fn from(profile: StaffProfile) -> Self {
        Self {
            staff_id: profile.staff_id,
            name: profile.name,
            role: profile.role,
            availability: profile.availability,
            current_ticket_id: profile.current_ticket_id,
        }
    }
}

/// API request to set a staff member's availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateAvailabilityRequest {
    /// The new availability state.
    pub availability: Availability,
}

/// A staff member's merged schedule.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleResponse {
    /// The staff member the schedule belongs to.
    pub staff_id: i64,
    /// Chronologically merged entries from every source.
    pub entries: Vec<ScheduleEntry>,
}
