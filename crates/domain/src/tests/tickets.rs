// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Availability, DomainError, Role, Ticket, TicketStatus, Urgency};
use std::str::FromStr;

fn sample_ticket() -> Ticket {
    Ticket::new(
        42,
        "Monitor flickers".to_string(),
        "External monitor flickers when docked".to_string(),
        "hardware".to_string(),
        Urgency::Medium,
        "2026-03-01T08:00:00Z".to_string(),
    )
}

#[test]
fn test_new_ticket_starts_unclaimed() {
    let ticket = sample_ticket();
    assert_eq!(ticket.status, TicketStatus::NotStarted);
    assert!(ticket.ticket_id.is_none());
    assert!(ticket.assigned_staff_id.is_none());
    assert!(ticket.rating.is_none());
    assert!(ticket.resolved_at.is_none());
    assert!(ticket.attachments.is_empty());
    assert!(ticket.check_invariants().is_ok());
}

#[test]
fn test_in_progress_requires_assignee() {
    let mut ticket = sample_ticket();
    ticket.ticket_id = Some(1);
    ticket.status = TicketStatus::InProgress;

    let result = ticket.check_invariants();
    assert!(matches!(
        result,
        Err(DomainError::InvariantViolation { ticket_id: 1, .. })
    ));

    ticket.assigned_staff_id = Some(7);
    assert!(ticket.check_invariants().is_ok());
}

#[test]
fn test_completed_requires_assignee_and_note() {
    let mut ticket = sample_ticket();
    ticket.ticket_id = Some(2);
    ticket.status = TicketStatus::Completed;
    ticket.assigned_staff_id = Some(7);
    assert!(ticket.check_invariants().is_err());

    ticket.resolution_note = Some("Replaced the dock cable".to_string());
    assert!(ticket.check_invariants().is_ok());
}

#[test]
fn test_rejected_forbids_assignee() {
    let mut ticket = sample_ticket();
    ticket.ticket_id = Some(3);
    ticket.status = TicketStatus::Rejected;
    ticket.rejection_reason = Some("Duplicate of ticket 1".to_string());
    assert!(ticket.check_invariants().is_ok());

    ticket.assigned_staff_id = Some(7);
    assert!(ticket.check_invariants().is_err());
}

#[test]
fn test_rating_only_on_completed() {
    let mut ticket = sample_ticket();
    ticket.ticket_id = Some(4);
    ticket.rating = Some(5);
    assert!(ticket.check_invariants().is_err());

    ticket.status = TicketStatus::Completed;
    ticket.assigned_staff_id = Some(7);
    ticket.resolution_note = Some("Done".to_string());
    assert!(ticket.check_invariants().is_ok());
}

#[test]
fn test_role_string_round_trip() {
    for role in Role::all() {
        let parsed = Role::from_str(role.as_str());
        assert_eq!(parsed, Ok(role));
    }
    assert!(Role::from_str("superuser").is_err());
}

#[test]
fn test_urgency_parsing() {
    assert_eq!(Urgency::from_str("high"), Ok(Urgency::High));
    assert!(Urgency::from_str("urgent").is_err());
    assert_eq!(Urgency::default(), Urgency::Medium);
}

#[test]
fn test_urgency_string_round_trip() {
    for urgency in [
        Urgency::Low,
        Urgency::Medium,
        Urgency::High,
        Urgency::Critical,
    ] {
        let parsed = Urgency::from_str(urgency.as_str());
        assert_eq!(parsed, Ok(urgency));
    }
}

#[test]
fn test_on_leave_cannot_accept_work() {
    assert!(Availability::Available.can_accept_work());
    assert!(Availability::Busy.can_accept_work());
    assert!(!Availability::OnLeave.can_accept_work());
}

#[test]
fn test_availability_string_round_trip() {
    for availability in [
        Availability::Available,
        Availability::Busy,
        Availability::OnLeave,
    ] {
        let parsed = Availability::from_str(availability.as_str());
        assert_eq!(parsed, Ok(availability));
    }
    assert!(Availability::from_str("vacation").is_err());
}
