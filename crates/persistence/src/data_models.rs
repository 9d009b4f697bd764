// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diesel_schema::{notifications, personal_tasks, staff_profiles, tickets};
use crate::error::PersistenceError;
use diesel::prelude::*;
use helpdesk_domain::{Availability, Role, StaffProfile, Ticket, TicketStatus, Urgency};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Diesel Queryable struct for ticket rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = tickets)]
pub(crate) struct TicketRow {
    pub ticket_id: i64,
    pub requester_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub urgency: String,
    pub room_id: Option<i64>,
    pub equipment_id: Option<i64>,
    pub status: String,
    pub assigned_staff_id: Option<i64>,
    pub rejection_reason: Option<String>,
    pub resolution_note: Option<String>,
    pub attachments_json: String,
    pub rating: Option<i32>,
    pub created_at: String,
    pub resolved_at: Option<String>,
}

impl TicketRow {
    /// Converts a stored row into a domain ticket.
    pub(crate) fn into_domain(self) -> Result<Ticket, PersistenceError> {
        let status: TicketStatus = TicketStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let urgency: Urgency = Urgency::from_str(&self.urgency)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let attachments: Vec<String> = serde_json::from_str(&self.attachments_json)?;

        Ok(Ticket {
            ticket_id: Some(self.ticket_id),
            requester_id: self.requester_id,
            title: self.title,
            description: self.description,
            category: self.category,
            urgency,
            room_id: self.room_id,
            equipment_id: self.equipment_id,
            status,
            assigned_staff_id: self.assigned_staff_id,
            rejection_reason: self.rejection_reason,
            resolution_note: self.resolution_note,
            attachments,
            rating: self.rating,
            created_at: self.created_at,
            resolved_at: self.resolved_at,
        })
    }
}

/// Diesel Insertable struct for new ticket rows.
#[derive(Insertable)]
#[diesel(table_name = tickets)]
pub(crate) struct NewTicketRow {
    pub requester_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub urgency: String,
    pub room_id: Option<i64>,
    pub equipment_id: Option<i64>,
    pub status: String,
    pub attachments_json: String,
    pub created_at: String,
}

impl NewTicketRow {
    /// Builds an insert row from a domain ticket.
    pub(crate) fn from_domain(ticket: &Ticket) -> Result<Self, PersistenceError> {
        Ok(Self {
            requester_id: ticket.requester_id,
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            category: ticket.category.clone(),
            urgency: ticket.urgency.as_str().to_string(),
            room_id: ticket.room_id,
            equipment_id: ticket.equipment_id,
            status: ticket.status.as_str().to_string(),
            attachments_json: serde_json::to_string(&ticket.attachments)?,
            created_at: ticket.created_at.clone(),
        })
    }
}

/// Diesel Queryable struct for staff profile rows.
#[derive(Queryable, Selectable, Insertable)]
#[diesel(table_name = staff_profiles)]
pub(crate) struct StaffProfileRow {
    pub staff_id: i64,
    pub name: String,
    pub role: String,
    pub availability: String,
    pub current_ticket_id: Option<i64>,
}

impl StaffProfileRow {
    pub(crate) fn into_domain(self) -> Result<StaffProfile, PersistenceError> {
        let role: Role = Role::from_str(&self.role)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let availability: Availability = Availability::from_str(&self.availability)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        Ok(StaffProfile {
            staff_id: self.staff_id,
            name: self.name,
            role,
            availability,
            current_ticket_id: self.current_ticket_id,
        })
    }

    pub(crate) fn from_domain(profile: &StaffProfile) -> Self {
        Self {
            staff_id: profile.staff_id,
            name: profile.name.clone(),
            role: profile.role.as_str().to_string(),
            availability: profile.availability.as_str().to_string(),
            current_ticket_id: profile.current_ticket_id,
        }
    }
}

/// A persisted notification, as returned to recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    pub notification_id: i64,
    pub recipient_id: i64,
    pub ticket_id: i64,
    pub kind: String,
    pub body: String,
    pub transitioned_at: String,
    pub is_read: bool,
    pub created_at: String,
}

/// Diesel Queryable struct for notification rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = notifications)]
pub(crate) struct NotificationRow {
    pub notification_id: i64,
    pub recipient_id: i64,
    pub ticket_id: i64,
    pub kind: String,
    pub body: String,
    pub transitioned_at: String,
    pub is_read: i32,
    pub created_at: String,
}

impl NotificationRow {
    pub(crate) fn into_data(self) -> NotificationData {
        NotificationData {
            notification_id: self.notification_id,
            recipient_id: self.recipient_id,
            ticket_id: self.ticket_id,
            kind: self.kind,
            body: self.body,
            transitioned_at: self.transitioned_at,
            is_read: self.is_read != 0,
            created_at: self.created_at,
        }
    }
}

/// Diesel Insertable struct for new notification rows.
///
/// The `(recipient_id, ticket_id, kind, transitioned_at)` tuple is
/// covered by a unique index; inserts go through insert-or-ignore so a
/// replayed fan-out never duplicates rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotification {
    pub recipient_id: i64,
    pub ticket_id: i64,
    pub kind: String,
    pub body: String,
    pub transitioned_at: String,
    pub created_at: String,
}

/// A personal task appearing on a staff member's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = personal_tasks)]
pub struct PersonalTask {
    pub task_id: i64,
    pub staff_id: i64,
    pub title: String,
    pub starts_at: String,
    pub ends_at: Option<String>,
}

/// Diesel Insertable struct for new personal tasks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = personal_tasks)]
pub struct NewPersonalTask {
    pub staff_id: i64,
    pub title: String,
    pub starts_at: String,
    pub ends_at: Option<String>,
}

/// Filters and paging for ticket listing.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    /// Restrict to a single status.
    pub status: Option<TicketStatus>,
    /// Restrict to an exact category.
    pub category: Option<String>,
    /// Case-insensitive substring match over title and description.
    pub search: Option<String>,
    /// 1-based page number; values below 1 are clamped to 1.
    pub page: i64,
    /// Page size; values below 1 fall back to the default of 20.
    pub limit: i64,
}

/// One page of tickets plus paging metadata.
#[derive(Debug, Clone, Serialize)]
pub struct TicketPage {
    pub data: Vec<Ticket>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}
