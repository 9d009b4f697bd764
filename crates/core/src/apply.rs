// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{AvailabilityEffect, FanOut, NotificationKind, State, TransitionResult};
use helpdesk_domain::{
    DomainError, Ticket, TicketStatus, validate_rating, validate_rejection_reason,
    validate_resolution_note, validate_ticket_fields,
};

/// Applies a command to the current snapshot, producing a transition plan.
///
/// The function is pure: it reads the snapshot, validates every
/// precondition, and returns the ticket as it should look after the
/// transition together with the guarded-update predicate the
/// persistence layer must enforce at commit time. The caller supplies
/// `now` as an ISO 8601 instant; it stamps `created_at` on creation and
/// `resolved_at` on terminal transitions.
///
/// # Arguments
///
/// * `state` - The snapshot the command is evaluated against
/// * `command` - The command to apply
/// * `now` - The transition instant, ISO 8601
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the planned ticket, guard, and fan-out
/// * `Err(CoreError)` if a precondition fails
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if:
/// - Required fields are missing or invalid
/// - The ticket is not in the state the command requires
/// - The acting staff member is missing or on leave
/// - The caller lacks the relationship the command requires
#[allow(clippy::too_many_lines)]
pub fn apply(state: &State, command: Command, now: &str) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateTicket {
            requester_id,
            title,
            description,
            category,
            urgency,
            room_id,
            equipment_id,
        } => {
            validate_ticket_fields(&title, &description, &category, room_id)?;

            let mut ticket: Ticket = Ticket::new(
                requester_id,
                title,
                description,
                category,
                urgency,
                now.to_string(),
            );
            ticket.room_id = room_id;
            ticket.equipment_id = equipment_id;
            ticket.check_invariants()?;

            Ok(TransitionResult {
                ticket,
                expected_status: None,
                availability_effect: AvailabilityEffect::None,
                fan_out: FanOut::BroadcastToStaff,
                notification_kind: Some(NotificationKind::TicketCreated),
            })
        }
        Command::AcceptTicket { staff_id } => {
            let ticket: &Ticket = require_ticket(state)?;
            let ticket_id: i64 = ticket.id()?;

            // Claimed or terminal tickets cannot be claimed again
            match ticket.status {
                TicketStatus::NotStarted => {}
                TicketStatus::InProgress | TicketStatus::Completed => {
                    return Err(CoreError::DomainViolation(DomainError::AlreadyClaimed {
                        ticket_id,
                    }));
                }
                TicketStatus::Rejected => {
                    ticket.status.validate_transition(TicketStatus::InProgress)?;
                }
            }

            let staff = state
                .actor_staff
                .as_ref()
                .ok_or(DomainError::StaffNotFound(staff_id))?;
            if !staff.availability.can_accept_work() {
                return Err(CoreError::DomainViolation(DomainError::StaffOnLeave {
                    staff_id,
                }));
            }

            let mut updated: Ticket = ticket.clone();
            updated.status = TicketStatus::InProgress;
            updated.assigned_staff_id = Some(staff_id);
            updated.check_invariants()?;

            Ok(TransitionResult {
                ticket: updated,
                expected_status: Some(TicketStatus::NotStarted),
                availability_effect: AvailabilityEffect::MarkBusy { staff_id },
                fan_out: FanOut::Requester {
                    requester_id: ticket.requester_id,
                },
                notification_kind: Some(NotificationKind::TicketUpdated),
            })
        }
        Command::RejectTicket { staff_id, reason } => {
            let ticket: &Ticket = require_ticket(state)?;
            ticket.status.validate_transition(TicketStatus::Rejected)?;
            validate_rejection_reason(&reason)?;

            let staff = state
                .actor_staff
                .as_ref()
                .ok_or(DomainError::StaffNotFound(staff_id))?;
            if !staff.availability.can_accept_work() {
                return Err(CoreError::DomainViolation(DomainError::StaffOnLeave {
                    staff_id,
                }));
            }

            let mut updated: Ticket = ticket.clone();
            updated.status = TicketStatus::Rejected;
            updated.rejection_reason = Some(reason);
            updated.resolved_at = Some(now.to_string());
            updated.check_invariants()?;

            Ok(TransitionResult {
                ticket: updated,
                expected_status: Some(TicketStatus::NotStarted),
                availability_effect: AvailabilityEffect::None,
                fan_out: FanOut::Requester {
                    requester_id: ticket.requester_id,
                },
                notification_kind: Some(NotificationKind::TicketUpdated),
            })
        }
        Command::CloseTicket {
            actor_id,
            can_override_assignee,
            resolution_note,
            attachments,
        } => {
            let ticket: &Ticket = require_ticket(state)?;
            let ticket_id: i64 = ticket.id()?;
            ticket.status.validate_transition(TicketStatus::Completed)?;
            validate_resolution_note(&resolution_note)?;

            let assigned_staff_id: i64 =
                ticket
                    .assigned_staff_id
                    .ok_or(DomainError::InvariantViolation {
                        ticket_id,
                        reason: "in_progress ticket must have an assignee".to_string(),
                    })?;
            if actor_id != assigned_staff_id && !can_override_assignee {
                return Err(CoreError::DomainViolation(DomainError::NotAssignedStaff {
                    ticket_id,
                    caller_id: actor_id,
                }));
            }

            let mut updated: Ticket = ticket.clone();
            updated.status = TicketStatus::Completed;
            updated.resolution_note = Some(resolution_note);
            updated.attachments.extend(attachments);
            updated.resolved_at = Some(now.to_string());
            updated.check_invariants()?;

            Ok(TransitionResult {
                ticket: updated,
                expected_status: Some(TicketStatus::InProgress),
                availability_effect: AvailabilityEffect::RecomputeAfterClose {
                    staff_id: assigned_staff_id,
                },
                fan_out: FanOut::Requester {
                    requester_id: ticket.requester_id,
                },
                notification_kind: Some(NotificationKind::TicketUpdated),
            })
        }
        Command::RateTicket { caller_id, rating } => {
            let ticket: &Ticket = require_ticket(state)?;
            let ticket_id: i64 = ticket.id()?;

            // Rating a ticket that is not completed is invalid input,
            // not a race: it maps to a validation error downstream.
            if ticket.status != TicketStatus::Completed {
                return Err(CoreError::DomainViolation(DomainError::NotRatable {
                    ticket_id,
                    status: ticket.status.as_str().to_string(),
                }));
            }
            if caller_id != ticket.requester_id {
                return Err(CoreError::DomainViolation(DomainError::NotRequester {
                    ticket_id,
                    caller_id,
                }));
            }
            if ticket.rating.is_some() {
                return Err(CoreError::DomainViolation(DomainError::AlreadyRated {
                    ticket_id,
                }));
            }
            validate_rating(rating)?;

            let mut updated: Ticket = ticket.clone();
            updated.rating = Some(rating);
            updated.check_invariants()?;

            Ok(TransitionResult {
                ticket: updated,
                expected_status: Some(TicketStatus::Completed),
                availability_effect: AvailabilityEffect::None,
                fan_out: FanOut::None,
                notification_kind: None,
            })
        }
    }
}

fn require_ticket(state: &State) -> Result<&Ticket, CoreError> {
    state
        .ticket
        .as_ref()
        .ok_or(CoreError::DomainViolation(DomainError::TicketNotFound(0)))
}
