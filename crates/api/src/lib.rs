// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the helpdesk ticket routing system.
//!
//! Handlers orchestrate the pure lifecycle engine against the
//! persistence layer and enforce capabilities through the fail-closed
//! guard. The HTTP server sits on top of this crate and stays thin.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod dispatch;
mod error;
mod guard;
mod handlers;
mod request_response;
mod schedule;

#[cfg(test)]
mod tests;

pub use dispatch::dispatch_notifications;
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use guard::{AuthenticatedCaller, authorize, holds_capability};
pub use handlers::{
    ApiResult, accept_ticket, close_ticket, create_ticket, current_timestamp, delete_notification,
    get_role_permissions, get_schedule, get_ticket, list_notifications, list_staff, list_tickets,
    mark_notification_read, rate_ticket, reject_ticket, reset_role_permissions,
    set_staff_availability, update_role_permissions,
};
pub use request_response::{
    CloseTicketRequest, CreateTicketRequest, ListTicketsRequest, ListTicketsResponse,
    NotificationInfo, RateTicketRequest, RejectTicketRequest, RolePermissionsResponse,
    ScheduleResponse, StaffInfo, TicketInfo, UpdateAvailabilityRequest, UpdatePermissionsRequest,
};
pub use schedule::{CalendarError, CalendarProvider, NoExternalCalendar, project_schedule};
