// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use helpdesk_domain::{Availability, Role, StaffProfile};
use helpdesk_persistence::Persistence;

use crate::guard::AuthenticatedCaller;
use crate::handlers::{accept_ticket, close_ticket, create_ticket};
use crate::request_response::{CloseTicketRequest, CreateTicketRequest, TicketInfo};

pub const NOW: &str = "2026-03-01T10:00:00Z";
pub const LATER: &str = "2026-03-01T11:00:00Z";

pub fn mem() -> Persistence {
    match Persistence::new_in_memory() {
        Ok(p) => p,
        Err(e) => panic!("failed to open in-memory database: {e}"),
    }
}

pub const fn admin_caller() -> AuthenticatedCaller {
    AuthenticatedCaller::new(1, Role::Admin)
}

pub const fn it_caller(staff_id: i64) -> AuthenticatedCaller {
    AuthenticatedCaller::new(staff_id, Role::ItSupport)
}

pub const fn user_caller(caller_id: i64) -> AuthenticatedCaller {
    AuthenticatedCaller::new(caller_id, Role::User)
}

pub fn seed_staff(persistence: &mut Persistence, staff_id: i64, role: Role) {
    let profile: StaffProfile =
        StaffProfile::new(staff_id, format!("Staff {staff_id}"), role);
    persistence.upsert_staff_profile(&profile).unwrap();
}

pub fn seed_staff_on_leave(persistence: &mut Persistence, staff_id: i64, role: Role) {
    seed_staff(persistence, staff_id, role);
    persistence
        .set_staff_availability(staff_id, Availability::OnLeave)
        .unwrap();
}

pub fn create_request(title: &str) -> CreateTicketRequest {
    CreateTicketRequest {
        title: title.to_string(),
        description: format!("Description for {title}"),
        category: "hardware".to_string(),
        urgency: None,
        room_id: Some(12),
        equipment_id: None,
    }
}

/// Opens a ticket as user 100 and returns its API view.
pub fn open_ticket(persistence: &mut Persistence, title: &str) -> TicketInfo {
    create_ticket(persistence, &user_caller(100), create_request(title), NOW)
        .unwrap()
        .response
}

/// Opens a ticket and walks it to `completed` via staff member 7.
pub fn complete_ticket(persistence: &mut Persistence, title: &str) -> TicketInfo {
    let ticket: TicketInfo = open_ticket(persistence, title);
    accept_ticket(persistence, &it_caller(7), ticket.ticket_id, NOW).unwrap();
    close_ticket(
        persistence,
        &it_caller(7),
        ticket.ticket_id,
        CloseTicketRequest {
            resolution_note: "Replaced the cable".to_string(),
            attachments: Vec::new(),
        },
        LATER,
    )
    .unwrap()
    .response
}
