// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every state-changing handler follows the same shape: authorize the
//! caller against the permission store, read the current snapshot,
//! plan the transition through the lifecycle engine, commit it through
//! the guarded update, then dispatch notifications. Dispatch runs
//! after the commit and never fails the request.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use helpdesk::{Command, NotificationKind, State, TransitionResult, apply};
use helpdesk_domain::{Capability, PermissionSet, Role, StaffProfile, Ticket, Urgency};
use helpdesk_persistence::{SqlitePersistence, TicketFilter, TicketPage};

use crate::dispatch::dispatch_notifications;
use crate::error::{ApiError, translate_core_error, translate_persistence_error};
use crate::guard::{AuthenticatedCaller, authorize, holds_capability};
use crate::request_response::{
    CloseTicketRequest, CreateTicketRequest, ListTicketsRequest, ListTicketsResponse,
    NotificationInfo, RateTicketRequest, RejectTicketRequest, RolePermissionsResponse,
    ScheduleResponse, StaffInfo, TicketInfo, UpdateAvailabilityRequest, UpdatePermissionsRequest,
};
use crate::schedule::{CalendarProvider, project_schedule};

/// The result of a state-changing ticket operation.
///
/// Carries the notification kind the transition planned so the server
/// layer can push a matching live event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The kind of notification the transition fanned out, if any.
    pub notification_kind: Option<NotificationKind>,
}

/// Formats the current UTC instant as an ISO 8601 string.
///
/// # Errors
///
/// Returns an internal error if formatting fails.
pub fn current_timestamp() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format timestamp: {e}"),
        })
}

/// Opens a new ticket on behalf of the caller.
///
/// Any authenticated caller may open a ticket; the caller becomes the
/// requester. A broadcast notification fans out to staff holding the
/// view capability.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `caller` - The authenticated caller
/// * `request` - The ticket fields
/// * `now` - The transition instant, ISO 8601
///
/// # Errors
///
/// Returns an error if a required field is missing or the insert fails.
pub fn create_ticket(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    request: CreateTicketRequest,
    now: &str,
) -> Result<ApiResult<TicketInfo>, ApiError> {
    let command: Command = Command::CreateTicket {
        requester_id: caller.caller_id,
        title: request.title,
        description: request.description,
        category: request.category,
        urgency: request.urgency.unwrap_or(Urgency::Medium),
        room_id: request.room_id,
        equipment_id: request.equipment_id,
    };

    let plan: TransitionResult =
        apply(&State::for_creation(), command, now).map_err(translate_core_error)?;
    let stored: Ticket = persistence
        .create_ticket(&plan.ticket)
        .map_err(translate_persistence_error)?;

    let kind: Option<NotificationKind> = plan.notification_kind;
    if let Some(kind) = kind {
        // The creation instant keys the dedupe entry.
        dispatch_notifications(persistence, &stored, &plan.fan_out, kind, now, now);
    }

    Ok(ApiResult {
        response: TicketInfo::from_ticket(stored)?,
        notification_kind: kind,
    })
}

/// Fetches a single ticket.
///
/// # Errors
///
/// Returns `Forbidden` without the view capability and `NotFound` for
/// an unknown identifier.
pub fn get_ticket(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    ticket_id: i64,
) -> Result<TicketInfo, ApiError> {
    authorize(persistence, caller, Capability::ViewTickets, "get_ticket")?;
    let ticket: Ticket = load_ticket(persistence, ticket_id)?;
    TicketInfo::from_ticket(ticket)
}

/// Lists tickets with filters and paging.
///
/// # Errors
///
/// Returns `Forbidden` without the view capability.
pub fn list_tickets(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    request: &ListTicketsRequest,
) -> Result<ListTicketsResponse, ApiError> {
    authorize(persistence, caller, Capability::ViewTickets, "list_tickets")?;

    let filter: TicketFilter = TicketFilter {
        status: request.status,
        category: request.category.clone(),
        search: request.search.clone(),
        page: request.page.unwrap_or(1),
        limit: request.limit.unwrap_or(0),
    };
    let page: TicketPage = persistence
        .list_tickets(&filter)
        .map_err(translate_persistence_error)?;

    let data: Vec<TicketInfo> = page
        .data
        .into_iter()
        .map(TicketInfo::from_ticket)
        .collect::<Result<Vec<TicketInfo>, ApiError>>()?;

    Ok(ListTicketsResponse {
        data,
        total: page.total,
        page: page.page,
        total_pages: page.total_pages,
    })
}

/// Claims a ticket for the calling staff member.
///
/// The commit is a compare-and-set against the status the caller read:
/// if another staff member claimed the ticket first, the request fails
/// with a conflict and nothing changes.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `caller` - The authenticated caller
/// * `ticket_id` - The ticket to claim
/// * `now` - The transition instant, ISO 8601
///
/// # Errors
///
/// Returns an error if:
/// - The caller's role lacks the edit capability
/// - The ticket does not exist or is no longer claimable
/// - The caller has no staff profile or is on leave
/// - Another claim committed first
pub fn accept_ticket(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    ticket_id: i64,
    now: &str,
) -> Result<ApiResult<TicketInfo>, ApiError> {
    authorize(persistence, caller, Capability::EditTickets, "accept_ticket")?;

    let ticket: Ticket = load_ticket(persistence, ticket_id)?;
    let staff: StaffProfile = load_staff(persistence, caller.caller_id)?;
    let state: State = State::for_ticket(ticket, Some(staff));

    let plan: TransitionResult = apply(
        &state,
        Command::AcceptTicket {
            staff_id: caller.caller_id,
        },
        now,
    )
    .map_err(translate_core_error)?;

    commit_and_dispatch(persistence, plan, now)
}

/// Rejects a ticket with a reason.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `caller` - The authenticated caller
/// * `ticket_id` - The ticket to reject
/// * `request` - The rejection reason
/// * `now` - The transition instant, ISO 8601
///
/// # Errors
///
/// Returns an error if:
/// - The caller's role lacks the edit capability
/// - The ticket does not exist or has left the `not_started` state
/// - The reason is empty
/// - The caller has no staff profile or is on leave
pub fn reject_ticket(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    ticket_id: i64,
    request: RejectTicketRequest,
    now: &str,
) -> Result<ApiResult<TicketInfo>, ApiError> {
    authorize(persistence, caller, Capability::EditTickets, "reject_ticket")?;

    let ticket: Ticket = load_ticket(persistence, ticket_id)?;
    let staff: StaffProfile = load_staff(persistence, caller.caller_id)?;
    let state: State = State::for_ticket(ticket, Some(staff));

    let plan: TransitionResult = apply(
        &state,
        Command::RejectTicket {
            staff_id: caller.caller_id,
            reason: request.reason,
        },
        now,
    )
    .map_err(translate_core_error)?;

    commit_and_dispatch(persistence, plan, now)
}

/// Closes an in-progress ticket with a resolution note.
///
/// Only the assigned staff member may close, unless the caller's role
/// holds the assign capability, which permits closing on the
/// assignee's behalf.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `caller` - The authenticated caller
/// * `ticket_id` - The ticket to close
/// * `request` - The resolution note and attachments
/// * `now` - The transition instant, ISO 8601
///
/// # Errors
///
/// Returns an error if:
/// - The caller's role lacks the edit capability
/// - The ticket does not exist or is not in progress
/// - The resolution note is empty
/// - The caller is neither the assignee nor an override holder
pub fn close_ticket(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    ticket_id: i64,
    request: CloseTicketRequest,
    now: &str,
) -> Result<ApiResult<TicketInfo>, ApiError> {
    authorize(persistence, caller, Capability::EditTickets, "close_ticket")?;
    let can_override: bool = holds_capability(persistence, caller, Capability::AssignIt);

    let ticket: Ticket = load_ticket(persistence, ticket_id)?;
    let state: State = State::for_ticket(ticket, None);

    let plan: TransitionResult = apply(
        &state,
        Command::CloseTicket {
            actor_id: caller.caller_id,
            can_override_assignee: can_override,
            resolution_note: request.resolution_note,
            attachments: request.attachments,
        },
        now,
    )
    .map_err(translate_core_error)?;

    commit_and_dispatch(persistence, plan, now)
}

/// Rates a completed ticket.
///
/// Only the ticket's requester may rate it, exactly once. No
/// capability is required beyond being the requester.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `caller` - The authenticated caller
/// * `ticket_id` - The ticket to rate
/// * `request` - The rating value
/// * `now` - The transition instant, ISO 8601
///
/// # Errors
///
/// Returns an error if:
/// - The ticket does not exist or is not completed
/// - The caller is not the requester
/// - The rating is out of range or already recorded
pub fn rate_ticket(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    ticket_id: i64,
    request: RateTicketRequest,
    now: &str,
) -> Result<ApiResult<TicketInfo>, ApiError> {
    let ticket: Ticket = load_ticket(persistence, ticket_id)?;
    let state: State = State::for_ticket(ticket, None);

    let plan: TransitionResult = apply(
        &state,
        Command::RateTicket {
            caller_id: caller.caller_id,
            rating: request.rating,
        },
        now,
    )
    .map_err(translate_core_error)?;

    commit_and_dispatch(persistence, plan, now)
}

/// Fetches the persisted permission flags for a role.
///
/// # Errors
///
/// Returns `Forbidden` without the user management capability.
pub fn get_role_permissions(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    role: Role,
) -> Result<RolePermissionsResponse, ApiError> {
    authorize(
        persistence,
        caller,
        Capability::ManageUsers,
        "get_role_permissions",
    )?;
    let permissions: PermissionSet = persistence
        .get_role_permissions(role)
        .map_err(translate_persistence_error)?;
    Ok(RolePermissionsResponse { role, permissions })
}

/// Replaces the permission flags for a role.
///
/// The change takes effect on the next capability check; there is no
/// caching layer in front of the store.
///
/// # Errors
///
/// Returns `Forbidden` without the user management capability.
pub fn update_role_permissions(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    role: Role,
    request: UpdatePermissionsRequest,
) -> Result<RolePermissionsResponse, ApiError> {
    authorize(
        persistence,
        caller,
        Capability::ManageUsers,
        "update_role_permissions",
    )?;
    persistence
        .set_role_permissions(role, &request.permissions)
        .map_err(translate_persistence_error)?;
    tracing::info!(role = role.as_str(), "role permissions updated");
    Ok(RolePermissionsResponse {
        role,
        permissions: request.permissions,
    })
}

/// Resets a role's permission flags to the factory defaults.
///
/// # Errors
///
/// Returns `Forbidden` without the user management capability.
pub fn reset_role_permissions(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    role: Role,
) -> Result<RolePermissionsResponse, ApiError> {
    authorize(
        persistence,
        caller,
        Capability::ManageUsers,
        "reset_role_permissions",
    )?;
    let permissions: PermissionSet = persistence
        .reset_role_permissions(role)
        .map_err(translate_persistence_error)?;
    tracing::info!(role = role.as_str(), "role permissions reset to defaults");
    Ok(RolePermissionsResponse { role, permissions })
}

/// Lists the caller's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_notifications(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
) -> Result<Vec<NotificationInfo>, ApiError> {
    let rows = persistence
        .list_notifications(caller.caller_id)
        .map_err(translate_persistence_error)?;
    Ok(rows.into_iter().map(NotificationInfo::from).collect())
}

/// Marks one of the caller's notifications as read.
///
/// # Errors
///
/// Returns `NotFound` if the notification does not exist or belongs to
/// someone else.
pub fn mark_notification_read(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    notification_id: i64,
) -> Result<(), ApiError> {
    persistence
        .mark_notification_read(caller.caller_id, notification_id)
        .map_err(translate_persistence_error)
}

/// Deletes one of the caller's notifications.
///
/// # Errors
///
/// Returns `NotFound` if the notification does not exist or belongs to
/// someone else.
pub fn delete_notification(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    notification_id: i64,
) -> Result<(), ApiError> {
    persistence
        .delete_notification(caller.caller_id, notification_id)
        .map_err(translate_persistence_error)
}

/// Lists the staff directory, optionally filtered to one role.
///
/// # Errors
///
/// Returns `Forbidden` without the view capability.
pub fn list_staff(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    role: Option<Role>,
) -> Result<Vec<StaffInfo>, ApiError> {
    authorize(persistence, caller, Capability::ViewTickets, "list_staff")?;
    let staff = persistence
        .list_staff(role)
        .map_err(translate_persistence_error)?;
    Ok(staff.into_iter().map(StaffInfo::from).collect())
}

/// Sets a staff member's availability.
///
/// Staff may set their own availability; changing someone else's
/// requires the user management capability. The on-leave toggle set
/// here takes precedence over the engine-derived states until it is
/// cleared the same way.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is neither the target nor a user manager
/// - The staff profile does not exist
pub fn set_staff_availability(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    staff_id: i64,
    request: UpdateAvailabilityRequest,
) -> Result<StaffInfo, ApiError> {
    if caller.caller_id != staff_id {
        authorize(
            persistence,
            caller,
            Capability::ManageUsers,
            "set_staff_availability",
        )?;
    }

    persistence
        .set_staff_availability(staff_id, request.availability)
        .map_err(translate_persistence_error)?;
    let profile: StaffProfile = load_staff(persistence, staff_id)?;
    Ok(StaffInfo::from(profile))
}

/// Projects a staff member's merged schedule.
///
/// Staff may view their own schedule; viewing someone else's requires
/// the view capability.
///
/// # Errors
///
/// Returns `Forbidden` when viewing another schedule without the view
/// capability. Source failures do not error; they fall out of the
/// merge.
pub fn get_schedule(
    persistence: &mut SqlitePersistence,
    calendar: &dyn CalendarProvider,
    caller: &AuthenticatedCaller,
    staff_id: i64,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<ScheduleResponse, ApiError> {
    if caller.caller_id != staff_id {
        authorize(persistence, caller, Capability::ViewTickets, "get_schedule")?;
    }
    let entries = project_schedule(persistence, calendar, staff_id, from, to);
    Ok(ScheduleResponse { staff_id, entries })
}

fn load_ticket(
    persistence: &mut SqlitePersistence,
    ticket_id: i64,
) -> Result<Ticket, ApiError> {
    persistence
        .get_ticket(ticket_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::NotFound {
            resource_type: String::from("Ticket"),
            message: format!("Ticket {ticket_id} does not exist"),
        })
}

fn load_staff(
    persistence: &mut SqlitePersistence,
    staff_id: i64,
) -> Result<StaffProfile, ApiError> {
    persistence
        .get_staff_profile(staff_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::NotFound {
            resource_type: String::from("Staff profile"),
            message: format!("Staff profile {staff_id} does not exist"),
        })
}

/// Commits a planned transition and dispatches its fan-out.
fn commit_and_dispatch(
    persistence: &mut SqlitePersistence,
    plan: TransitionResult,
    now: &str,
) -> Result<ApiResult<TicketInfo>, ApiError> {
    let stored: Ticket = persistence
        .apply_transition(&plan)
        .map_err(translate_persistence_error)?;

    let kind: Option<NotificationKind> = plan.notification_kind;
    if let Some(kind) = kind {
        dispatch_notifications(persistence, &stored, &plan.fan_out, kind, now, now);
    }

    Ok(ApiResult {
        response: TicketInfo::from_ticket(stored)?,
        notification_kind: kind,
    })
}
