// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    NOW, create_completed_ticket, create_in_progress_ticket, create_test_staff, create_test_ticket,
};
use crate::{
    AvailabilityEffect, Command, CoreError, FanOut, NotificationKind, State, TransitionResult,
    apply,
};
use helpdesk_domain::{Availability, DomainError, TicketStatus, Urgency};

fn create_command() -> Command {
    Command::CreateTicket {
        requester_id: 100,
        title: "Printer jam".to_string(),
        description: "Third floor printer keeps jamming".to_string(),
        category: "hardware".to_string(),
        urgency: Urgency::Low,
        room_id: Some(3),
        equipment_id: None,
    }
}

#[test]
fn test_create_ticket_plans_broadcast() {
    let result: Result<TransitionResult, CoreError> =
        apply(&State::for_creation(), create_command(), NOW);

    let plan: TransitionResult = result.unwrap();
    assert_eq!(plan.ticket.status, TicketStatus::NotStarted);
    assert_eq!(plan.ticket.created_at, NOW);
    assert_eq!(plan.expected_status, None);
    assert_eq!(plan.availability_effect, AvailabilityEffect::None);
    assert_eq!(plan.fan_out, FanOut::BroadcastToStaff);
    assert_eq!(plan.notification_kind, Some(NotificationKind::TicketCreated));
}

#[test]
fn test_create_ticket_rejects_empty_title() {
    let command: Command = Command::CreateTicket {
        requester_id: 100,
        title: "  ".to_string(),
        description: "desc".to_string(),
        category: "hardware".to_string(),
        urgency: Urgency::Medium,
        room_id: None,
        equipment_id: None,
    };

    let result = apply(&State::for_creation(), command, NOW);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::MissingField(
            "title"
        )))
    );
}

#[test]
fn test_accept_claims_unassigned_ticket() {
    let state: State = State::for_ticket(
        create_test_ticket(1),
        Some(create_test_staff(7, Availability::Available)),
    );
    let plan: TransitionResult =
        apply(&state, Command::AcceptTicket { staff_id: 7 }, NOW).unwrap();

    assert_eq!(plan.ticket.status, TicketStatus::InProgress);
    assert_eq!(plan.ticket.assigned_staff_id, Some(7));
    assert_eq!(plan.expected_status, Some(TicketStatus::NotStarted));
    assert_eq!(
        plan.availability_effect,
        AvailabilityEffect::MarkBusy { staff_id: 7 }
    );
    assert_eq!(plan.fan_out, FanOut::Requester { requester_id: 100 });
    assert_eq!(plan.notification_kind, Some(NotificationKind::TicketUpdated));
}

#[test]
fn test_accept_already_claimed_ticket_fails() {
    let state: State = State::for_ticket(
        create_in_progress_ticket(1, 7),
        Some(create_test_staff(8, Availability::Available)),
    );

    let result = apply(&state, Command::AcceptTicket { staff_id: 8 }, NOW);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::AlreadyClaimed {
            ticket_id: 1
        }))
    );
}

#[test]
fn test_accept_fails_for_staff_on_leave() {
    let state: State = State::for_ticket(
        create_test_ticket(1),
        Some(create_test_staff(7, Availability::OnLeave)),
    );

    let result = apply(&state, Command::AcceptTicket { staff_id: 7 }, NOW);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::StaffOnLeave {
            staff_id: 7
        }))
    );
}

#[test]
fn test_busy_staff_may_still_accept() {
    let state: State = State::for_ticket(
        create_test_ticket(2),
        Some(create_test_staff(7, Availability::Busy)),
    );

    let plan = apply(&state, Command::AcceptTicket { staff_id: 7 }, NOW).unwrap();
    assert_eq!(plan.ticket.assigned_staff_id, Some(7));
}

#[test]
fn test_reject_requires_reason() {
    let state: State = State::for_ticket(
        create_test_ticket(1),
        Some(create_test_staff(7, Availability::Available)),
    );
    let command: Command = Command::RejectTicket {
        staff_id: 7,
        reason: "   ".to_string(),
    };

    let result = apply(&state, command, NOW);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::EmptyRejectionReason
        ))
    );
}

#[test]
fn test_reject_plans_terminal_transition() {
    let state: State = State::for_ticket(
        create_test_ticket(1),
        Some(create_test_staff(7, Availability::Available)),
    );
    let command: Command = Command::RejectTicket {
        staff_id: 7,
        reason: "Covered by warranty vendor".to_string(),
    };

    let plan: TransitionResult = apply(&state, command, NOW).unwrap();
    assert_eq!(plan.ticket.status, TicketStatus::Rejected);
    assert_eq!(plan.ticket.resolved_at.as_deref(), Some(NOW));
    assert_eq!(plan.expected_status, Some(TicketStatus::NotStarted));
    assert_eq!(plan.fan_out, FanOut::Requester { requester_id: 100 });
}

#[test]
fn test_reject_in_progress_ticket_fails() {
    let state: State = State::for_ticket(
        create_in_progress_ticket(1, 7),
        Some(create_test_staff(8, Availability::Available)),
    );
    let command: Command = Command::RejectTicket {
        staff_id: 8,
        reason: "Too late".to_string(),
    };

    let result = apply(&state, command, NOW);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition { .. }
        ))
    ));
}

#[test]
fn test_close_by_assigned_staff() {
    let state: State = State::for_ticket(
        create_in_progress_ticket(1, 7),
        Some(create_test_staff(7, Availability::Busy)),
    );
    let command: Command = Command::CloseTicket {
        actor_id: 7,
        can_override_assignee: false,
        resolution_note: "Replaced the power supply".to_string(),
        attachments: vec!["https://files.example/psu.jpg".to_string()],
    };

    let plan: TransitionResult = apply(&state, command, NOW).unwrap();
    assert_eq!(plan.ticket.status, TicketStatus::Completed);
    assert_eq!(
        plan.ticket.attachments,
        vec!["https://files.example/psu.jpg".to_string()]
    );
    assert_eq!(plan.ticket.resolved_at.as_deref(), Some(NOW));
    assert_eq!(plan.expected_status, Some(TicketStatus::InProgress));
    assert_eq!(
        plan.availability_effect,
        AvailabilityEffect::RecomputeAfterClose { staff_id: 7 }
    );
}

#[test]
fn test_close_by_other_staff_without_override_fails() {
    let state: State = State::for_ticket(
        create_in_progress_ticket(1, 7),
        Some(create_test_staff(8, Availability::Available)),
    );
    let command: Command = Command::CloseTicket {
        actor_id: 8,
        can_override_assignee: false,
        resolution_note: "Done".to_string(),
        attachments: Vec::new(),
    };

    let result = apply(&state, command, NOW);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::NotAssignedStaff {
            ticket_id: 1,
            caller_id: 8
        }))
    );
}

#[test]
fn test_close_by_other_staff_with_override_succeeds() {
    let state: State = State::for_ticket(
        create_in_progress_ticket(1, 7),
        Some(create_test_staff(8, Availability::Available)),
    );
    let command: Command = Command::CloseTicket {
        actor_id: 8,
        can_override_assignee: true,
        resolution_note: "Closed on behalf of assignee".to_string(),
        attachments: Vec::new(),
    };

    let plan = apply(&state, command, NOW).unwrap();
    assert_eq!(plan.ticket.status, TicketStatus::Completed);
    // Availability recompute still targets the assignee, not the closer
    assert_eq!(
        plan.availability_effect,
        AvailabilityEffect::RecomputeAfterClose { staff_id: 7 }
    );
}

#[test]
fn test_close_not_started_ticket_fails() {
    let state: State = State::for_ticket(
        create_test_ticket(1),
        Some(create_test_staff(7, Availability::Available)),
    );
    let command: Command = Command::CloseTicket {
        actor_id: 7,
        can_override_assignee: false,
        resolution_note: "Done".to_string(),
        attachments: Vec::new(),
    };

    let result = apply(&state, command, NOW);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition { .. }
        ))
    ));
}

#[test]
fn test_rate_completed_ticket() {
    let state: State = State::for_ticket(create_completed_ticket(1, 7), None);
    let command: Command = Command::RateTicket {
        caller_id: 100,
        rating: 4,
    };

    let plan: TransitionResult = apply(&state, command, NOW).unwrap();
    assert_eq!(plan.ticket.rating, Some(4));
    assert_eq!(plan.expected_status, Some(TicketStatus::Completed));
    assert_eq!(plan.fan_out, FanOut::None);
    assert_eq!(plan.notification_kind, None);
}

#[test]
fn test_rate_by_non_requester_fails() {
    let state: State = State::for_ticket(create_completed_ticket(1, 7), None);
    let command: Command = Command::RateTicket {
        caller_id: 7,
        rating: 5,
    };

    let result = apply(&state, command, NOW);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::NotRequester {
            ticket_id: 1,
            caller_id: 7
        }))
    );
}

#[test]
fn test_rate_twice_fails() {
    let mut ticket = create_completed_ticket(1, 7);
    ticket.rating = Some(5);
    let state: State = State::for_ticket(ticket, None);
    let command: Command = Command::RateTicket {
        caller_id: 100,
        rating: 3,
    };

    let result = apply(&state, command, NOW);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::AlreadyRated {
            ticket_id: 1
        }))
    );
}

#[test]
fn test_rate_out_of_range_fails() {
    let state: State = State::for_ticket(create_completed_ticket(1, 7), None);
    let command: Command = Command::RateTicket {
        caller_id: 100,
        rating: 9,
    };

    let result = apply(&state, command, NOW);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidRating {
            rating: 9
        }))
    );
}

#[test]
fn test_rate_in_progress_ticket_fails() {
    let state: State = State::for_ticket(create_in_progress_ticket(1, 7), None);
    let command: Command = Command::RateTicket {
        caller_id: 100,
        rating: 4,
    };

    let result = apply(&state, command, NOW);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::NotRatable { .. }))
    ));
}

#[test]
fn test_create_ticket_rejects_missing_room() {
    let command: Command = Command::CreateTicket {
        requester_id: 100,
        title: "Printer jam".to_string(),
        description: "Third floor printer keeps jamming".to_string(),
        category: "hardware".to_string(),
        urgency: Urgency::Medium,
        room_id: None,
        equipment_id: None,
    };

    let result = apply(&State::for_creation(), command, NOW);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::MissingField(
            "room_id"
        )))
    );
}
