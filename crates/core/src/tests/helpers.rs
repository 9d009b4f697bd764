// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use helpdesk_domain::{Availability, Role, StaffProfile, Ticket, TicketStatus, Urgency};

pub const NOW: &str = "2026-03-01T10:00:00Z";

pub fn create_test_ticket(ticket_id: i64) -> Ticket {
    let mut ticket: Ticket = Ticket::new(
        100,
        "Laptop will not boot".to_string(),
        "Black screen on power up".to_string(),
        "hardware".to_string(),
        Urgency::High,
        "2026-03-01T09:00:00Z".to_string(),
    );
    ticket.ticket_id = Some(ticket_id);
    ticket
}

pub fn create_in_progress_ticket(ticket_id: i64, staff_id: i64) -> Ticket {
    let mut ticket: Ticket = create_test_ticket(ticket_id);
    ticket.status = TicketStatus::InProgress;
    ticket.assigned_staff_id = Some(staff_id);
    ticket
}

pub fn create_completed_ticket(ticket_id: i64, staff_id: i64) -> Ticket {
    let mut ticket: Ticket = create_in_progress_ticket(ticket_id, staff_id);
    ticket.status = TicketStatus::Completed;
    ticket.resolution_note = Some("Reseated the memory".to_string());
    ticket.resolved_at = Some(NOW.to_string());
    ticket
}

pub fn create_test_staff(staff_id: i64, availability: Availability) -> StaffProfile {
    let mut staff: StaffProfile =
        StaffProfile::new(staff_id, format!("Staff {staff_id}"), Role::ItSupport);
    staff.availability = availability;
    staff
}
