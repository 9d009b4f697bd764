// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handler tests for the ticket lifecycle operations.

use helpdesk::NotificationKind;
use helpdesk_domain::{Availability, Role, TicketStatus};
use helpdesk_persistence::Persistence;

use crate::error::ApiError;
use crate::handlers::{
    accept_ticket, close_ticket, create_ticket, get_ticket, list_tickets, rate_ticket,
    reject_ticket,
};
use crate::request_response::{
    CloseTicketRequest, CreateTicketRequest, ListTicketsRequest, RateTicketRequest,
    RejectTicketRequest, TicketInfo,
};
use crate::tests::helpers::{
    LATER, NOW, admin_caller, complete_ticket, create_request, it_caller, mem, open_ticket,
    seed_staff, seed_staff_on_leave, user_caller,
};

#[test]
fn test_create_ticket_starts_not_started() {
    let mut p: Persistence = mem();
    let result = create_ticket(&mut p, &user_caller(100), create_request("Broken mouse"), NOW)
        .unwrap();

    assert_eq!(result.response.status, TicketStatus::NotStarted);
    assert_eq!(result.response.requester_id, 100);
    assert_eq!(result.response.created_at, NOW);
    assert_eq!(result.notification_kind, Some(NotificationKind::TicketCreated));
}

#[test]
fn test_create_ticket_rejects_empty_title() {
    let mut p: Persistence = mem();
    let mut request: CreateTicketRequest = create_request("x");
    request.title = String::from("   ");

    let err: ApiError = create_ticket(&mut p, &user_caller(100), request, NOW).unwrap_err();
    assert!(matches!(err, ApiError::ValidationError { ref field, .. } if field == "title"));
}

#[test]
fn test_create_ticket_requires_a_room() {
    let mut p: Persistence = mem();
    let mut request: CreateTicketRequest = create_request("Roomless");
    request.room_id = None;

    let err: ApiError = create_ticket(&mut p, &user_caller(100), request, NOW).unwrap_err();
    assert!(matches!(err, ApiError::ValidationError { ref field, .. } if field == "room_id"));
}

#[test]
fn test_accept_assigns_and_notifies_requester() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    let ticket: TicketInfo = open_ticket(&mut p, "Broken mouse");

    let result = accept_ticket(&mut p, &it_caller(7), ticket.ticket_id, LATER).unwrap();
    assert_eq!(result.response.status, TicketStatus::InProgress);
    assert_eq!(result.response.assigned_staff_id, Some(7));
    assert_eq!(result.notification_kind, Some(NotificationKind::TicketUpdated));

    let staff = p.get_staff_profile(7).unwrap().unwrap();
    assert_eq!(staff.availability, Availability::Busy);
    assert_eq!(staff.current_ticket_id, Some(ticket.ticket_id));
}

#[test]
fn test_second_accept_is_a_conflict() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    seed_staff(&mut p, 8, Role::ItSupport);
    let ticket: TicketInfo = open_ticket(&mut p, "Contested");

    accept_ticket(&mut p, &it_caller(7), ticket.ticket_id, LATER).unwrap();
    let err: ApiError = accept_ticket(&mut p, &it_caller(8), ticket.ticket_id, LATER).unwrap_err();
    assert!(matches!(err, ApiError::Conflict { .. }));

    // The loser's state is untouched.
    let loser = p.get_staff_profile(8).unwrap().unwrap();
    assert_eq!(loser.availability, Availability::Available);
}

#[test]
fn test_accept_by_on_leave_staff_is_unavailable() {
    let mut p: Persistence = mem();
    seed_staff_on_leave(&mut p, 7, Role::ItSupport);
    let ticket: TicketInfo = open_ticket(&mut p, "Waiting");

    let err: ApiError = accept_ticket(&mut p, &it_caller(7), ticket.ticket_id, LATER).unwrap_err();
    assert!(matches!(err, ApiError::Unavailable { .. }));
    assert_eq!(
        get_ticket(&mut p, &admin_caller(), ticket.ticket_id)
            .unwrap()
            .status,
        TicketStatus::NotStarted
    );
}

#[test]
fn test_accept_by_plain_user_is_forbidden() {
    let mut p: Persistence = mem();
    let ticket: TicketInfo = open_ticket(&mut p, "Off limits");

    let err: ApiError = accept_ticket(&mut p, &user_caller(101), ticket.ticket_id, LATER).unwrap_err();
    assert!(matches!(err, ApiError::Forbidden { .. }));
}

#[test]
fn test_reject_records_reason_and_resolved_at() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    let ticket: TicketInfo = open_ticket(&mut p, "Out of scope");

    let result = reject_ticket(
        &mut p,
        &it_caller(7),
        ticket.ticket_id,
        RejectTicketRequest {
            reason: "Duplicate of an open ticket".to_string(),
        },
        LATER,
    )
    .unwrap();

    assert_eq!(result.response.status, TicketStatus::Rejected);
    assert_eq!(
        result.response.rejection_reason.as_deref(),
        Some("Duplicate of an open ticket")
    );
    assert_eq!(result.response.resolved_at.as_deref(), Some(LATER));
    assert_eq!(result.response.assigned_staff_id, None);
}

#[test]
fn test_reject_requires_a_reason() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    let ticket: TicketInfo = open_ticket(&mut p, "Unexplained");

    let err: ApiError = reject_ticket(
        &mut p,
        &it_caller(7),
        ticket.ticket_id,
        RejectTicketRequest {
            reason: String::new(),
        },
        LATER,
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError { ref field, .. } if field == "reason"));
}

#[test]
fn test_reject_after_accept_is_a_conflict() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    seed_staff(&mut p, 8, Role::ItSupport);
    let ticket: TicketInfo = open_ticket(&mut p, "Already claimed");
    accept_ticket(&mut p, &it_caller(7), ticket.ticket_id, LATER).unwrap();

    let err: ApiError = reject_ticket(
        &mut p,
        &it_caller(8),
        ticket.ticket_id,
        RejectTicketRequest {
            reason: "Too late".to_string(),
        },
        LATER,
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Conflict { .. }));
}

#[test]
fn test_close_by_assignee_completes_with_note() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    let ticket: TicketInfo = complete_ticket(&mut p, "Fixable");

    assert_eq!(ticket.status, TicketStatus::Completed);
    assert_eq!(ticket.resolution_note.as_deref(), Some("Replaced the cable"));
    assert_eq!(ticket.resolved_at.as_deref(), Some(LATER));
}

#[test]
fn test_close_by_other_staff_is_forbidden() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    seed_staff(&mut p, 8, Role::ItSupport);
    // Strip assign_it from it_support so staff 8's edit attempt cannot
    // ride on the override path either.
    let mut set = helpdesk_domain::PermissionSet::default_for(Role::ItSupport);
    set.assign_it = false;
    p.set_role_permissions(Role::ItSupport, &set).unwrap();

    let ticket: TicketInfo = open_ticket(&mut p, "Guarded");
    accept_ticket(&mut p, &it_caller(7), ticket.ticket_id, NOW).unwrap();

    let err: ApiError = close_ticket(
        &mut p,
        &it_caller(8),
        ticket.ticket_id,
        CloseTicketRequest {
            resolution_note: "Not mine to close".to_string(),
            attachments: Vec::new(),
        },
        LATER,
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden { .. }));
}

#[test]
fn test_close_override_with_assign_capability() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 1, Role::Admin);
    seed_staff(&mut p, 7, Role::ItSupport);
    let ticket: TicketInfo = open_ticket(&mut p, "Escalated");
    accept_ticket(&mut p, &it_caller(7), ticket.ticket_id, NOW).unwrap();

    let result = close_ticket(
        &mut p,
        &admin_caller(),
        ticket.ticket_id,
        CloseTicketRequest {
            resolution_note: "Closed by admin on assignee's behalf".to_string(),
            attachments: vec!["https://files.example/photo.jpg".to_string()],
        },
        LATER,
    )
    .unwrap();

    assert_eq!(result.response.status, TicketStatus::Completed);
    // Assignment is unchanged by the override.
    assert_eq!(result.response.assigned_staff_id, Some(7));
    assert_eq!(result.response.attachments.len(), 1);
}

#[test]
fn test_close_releases_staff() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    complete_ticket(&mut p, "Quick fix");

    let staff = p.get_staff_profile(7).unwrap().unwrap();
    assert_eq!(staff.availability, Availability::Available);
    assert_eq!(staff.current_ticket_id, None);
}

#[test]
fn test_rate_by_requester_succeeds_once() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    let ticket: TicketInfo = complete_ticket(&mut p, "Rateable");

    let result = rate_ticket(
        &mut p,
        &user_caller(100),
        ticket.ticket_id,
        RateTicketRequest { rating: 4 },
        LATER,
    )
    .unwrap();
    assert_eq!(result.response.rating, Some(4));

    let err: ApiError = rate_ticket(
        &mut p,
        &user_caller(100),
        ticket.ticket_id,
        RateTicketRequest { rating: 2 },
        LATER,
    )
    .unwrap_err();
    // A repeat rating is invalid input, not a lost race.
    assert!(matches!(err, ApiError::ValidationError { ref field, .. } if field == "rating"));
}

#[test]
fn test_rate_by_non_requester_is_forbidden() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    let ticket: TicketInfo = complete_ticket(&mut p, "Not yours");

    let err: ApiError = rate_ticket(
        &mut p,
        &user_caller(101),
        ticket.ticket_id,
        RateTicketRequest { rating: 5 },
        LATER,
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden { .. }));
}

#[test]
fn test_rate_out_of_range_is_invalid() {
    let mut p: Persistence = mem();
    seed_staff(&mut p, 7, Role::ItSupport);
    let ticket: TicketInfo = complete_ticket(&mut p, "Overenthusiastic");

    let err: ApiError = rate_ticket(
        &mut p,
        &user_caller(100),
        ticket.ticket_id,
        RateTicketRequest { rating: 6 },
        LATER,
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError { ref field, .. } if field == "rating"));
}

#[test]
fn test_rate_before_completion_is_invalid() {
    let mut p: Persistence = mem();
    let ticket: TicketInfo = open_ticket(&mut p, "Too early");

    let err: ApiError = rate_ticket(
        &mut p,
        &user_caller(100),
        ticket.ticket_id,
        RateTicketRequest { rating: 5 },
        LATER,
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError { ref field, .. } if field == "rating"));
}

#[test]
fn test_get_missing_ticket_is_not_found() {
    let mut p: Persistence = mem();
    let err: ApiError = get_ticket(&mut p, &admin_caller(), 999).unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[test]
fn test_list_tickets_pages_and_filters() {
    let mut p: Persistence = mem();
    for i in 0..5 {
        open_ticket(&mut p, &format!("Issue {i}"));
    }

    let page = list_tickets(
        &mut p,
        &user_caller(100),
        &ListTicketsRequest {
            page: Some(1),
            limit: Some(2),
            ..ListTicketsRequest::default()
        },
    )
    .unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.data.len(), 2);

    let filtered = list_tickets(
        &mut p,
        &user_caller(100),
        &ListTicketsRequest {
            status: Some(TicketStatus::InProgress),
            ..ListTicketsRequest::default()
        },
    )
    .unwrap();
    assert_eq!(filtered.total, 0);
    assert!(filtered.data.is_empty());
}
