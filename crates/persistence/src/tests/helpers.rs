// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use helpdesk::{Command, State, TransitionResult, apply};
use helpdesk_domain::{Availability, Role, StaffProfile, Ticket, Urgency};

pub const NOW: &str = "2026-03-01T10:00:00Z";

pub fn mem() -> Persistence {
    match Persistence::new_in_memory() {
        Ok(p) => p,
        Err(e) => panic!("failed to open in-memory database: {e}"),
    }
}

pub fn seed_staff(persistence: &mut Persistence, staff_id: i64, availability: Availability) {
    let mut profile: StaffProfile =
        StaffProfile::new(staff_id, format!("Staff {staff_id}"), Role::ItSupport);
    profile.availability = availability;
    persistence.upsert_staff_profile(&profile).unwrap();
}

pub fn seed_ticket(persistence: &mut Persistence, title: &str) -> Ticket {
    let ticket: Ticket = Ticket::new(
        100,
        title.to_string(),
        format!("Description for {title}"),
        "hardware".to_string(),
        Urgency::Medium,
        NOW.to_string(),
    );
    persistence.create_ticket(&ticket).unwrap()
}

/// Plans an accept transition against the current stored snapshot.
pub fn plan_accept(persistence: &mut Persistence, ticket_id: i64, staff_id: i64) -> TransitionResult {
    let ticket: Ticket = persistence.get_ticket(ticket_id).unwrap().unwrap();
    let staff: StaffProfile = persistence.get_staff_profile(staff_id).unwrap().unwrap();
    let state: State = State::for_ticket(ticket, Some(staff));
    apply(&state, Command::AcceptTicket { staff_id }, NOW).unwrap()
}

/// Plans a close transition against the current stored snapshot.
pub fn plan_close(persistence: &mut Persistence, ticket_id: i64, actor_id: i64) -> TransitionResult {
    let ticket: Ticket = persistence.get_ticket(ticket_id).unwrap().unwrap();
    let state: State = State::for_ticket(ticket, None);
    apply(
        &state,
        Command::CloseTicket {
            actor_id,
            can_override_assignee: false,
            resolution_note: "Fixed".to_string(),
            attachments: Vec::new(),
        },
        NOW,
    )
    .unwrap()
}
