// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket mutation operations.
//!
//! Ticket lifecycle writes are guarded conditional updates: every
//! status-changing UPDATE carries a predicate on the status the
//! transition plan observed, so a row another caller changed in the
//! meantime matches zero rows and the transition is reported as a
//! conflict instead of overwriting their work. The ticket row and any
//! staff availability effect commit in one transaction.

use crate::backend::PersistenceBackend;
use crate::data_models::{NewTicketRow, TicketRow};
use crate::diesel_schema::{staff_profiles, tickets};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{Connection, MysqlConnection, SqliteConnection};
use helpdesk::{AvailabilityEffect, TransitionResult};
use helpdesk_domain::{Availability, Ticket, TicketStatus};

backend_fn! {

/// Insert a new ticket row and return the persisted ticket.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively and works with both `SQLite` and `MySQL`.
///
/// # Errors
///
/// Returns an error if the insert or the readback fails.
pub fn insert_ticket(
    conn: &mut _,
    ticket: &Ticket,
) -> Result<Ticket, PersistenceError> {
    let record: NewTicketRow = NewTicketRow::from_domain(ticket)?;

    conn.transaction(|conn| {
        diesel::insert_into(tickets::table)
            .values(&record)
            .execute(conn)?;

        let ticket_id: i64 = conn.get_last_insert_rowid()?;
        let row: TicketRow = tickets::table
            .filter(tickets::ticket_id.eq(ticket_id))
            .select(TicketRow::as_select())
            .first(conn)?;
        row.into_domain()
    })
}

}

backend_fn! {

/// Apply a planned ticket transition as a guarded update.
///
/// The UPDATE is predicated on the status the plan observed (and, for
/// rating, on the rating column still being unset). Zero affected rows
/// means another transition won the race; the transaction rolls back
/// and `TransitionConflict` is returned. The staff availability effect
/// runs inside the same transaction.
///
/// # Errors
///
/// Returns `TransitionConflict` if the guarded update matches no row,
/// `StaffNotFound` if an availability effect targets a profile that is
/// missing or on leave, or a database error.
#[allow(clippy::too_many_lines)]
pub fn apply_ticket_transition(
    conn: &mut _,
    result: &TransitionResult,
) -> Result<Ticket, PersistenceError> {
    let ticket: &Ticket = &result.ticket;
    let ticket_id: i64 = ticket.ticket_id.ok_or_else(|| {
        PersistenceError::Other("transition plan carries no ticket id".to_string())
    })?;
    let expected: TicketStatus = result.expected_status.ok_or_else(|| {
        PersistenceError::Other("transition plan carries no status predicate".to_string())
    })?;
    let attachments_json: String = serde_json::to_string(&ticket.attachments)?;

    conn.transaction(|conn| {
        let changes = (
            tickets::status.eq(ticket.status.as_str()),
            tickets::assigned_staff_id.eq(ticket.assigned_staff_id),
            tickets::rejection_reason.eq(ticket.rejection_reason.as_deref()),
            tickets::resolution_note.eq(ticket.resolution_note.as_deref()),
            tickets::attachments_json.eq(&attachments_json),
            tickets::rating.eq(ticket.rating),
            tickets::resolved_at.eq(ticket.resolved_at.as_deref()),
        );

        // A rating write additionally requires the column to be unset,
        // so two concurrent ratings cannot both land.
        let rows: usize = if ticket.rating.is_some() {
            diesel::update(
                tickets::table
                    .filter(tickets::ticket_id.eq(ticket_id))
                    .filter(tickets::status.eq(expected.as_str()))
                    .filter(tickets::rating.is_null()),
            )
            .set(changes)
            .execute(conn)?
        } else {
            diesel::update(
                tickets::table
                    .filter(tickets::ticket_id.eq(ticket_id))
                    .filter(tickets::status.eq(expected.as_str())),
            )
            .set(changes)
            .execute(conn)?
        };

        if rows == 0 {
            return Err(PersistenceError::TransitionConflict { ticket_id });
        }

        match result.availability_effect {
            AvailabilityEffect::None => {}
            AvailabilityEffect::MarkBusy { staff_id } => {
                // On-leave profiles are never overwritten; a claim that
                // raced with a leave toggle rolls back here.
                let updated: usize = diesel::update(
                    staff_profiles::table
                        .filter(staff_profiles::staff_id.eq(staff_id))
                        .filter(staff_profiles::availability.ne(Availability::OnLeave.as_str())),
                )
                .set((
                    staff_profiles::availability.eq(Availability::Busy.as_str()),
                    staff_profiles::current_ticket_id.eq(Some(ticket_id)),
                ))
                .execute(conn)?;
                if updated == 0 {
                    return Err(PersistenceError::StaffNotFound(staff_id));
                }
            }
            AvailabilityEffect::RecomputeAfterClose { staff_id } => {
                // The current-ticket hint moves to another in-progress
                // assignment, or clears when none remains.
                let remaining: Option<i64> = tickets::table
                    .filter(tickets::assigned_staff_id.eq(staff_id))
                    .filter(tickets::status.eq(TicketStatus::InProgress.as_str()))
                    .select(diesel::dsl::min(tickets::ticket_id))
                    .first(conn)?;
                diesel::update(
                    staff_profiles::table.filter(staff_profiles::staff_id.eq(staff_id)),
                )
                .set(staff_profiles::current_ticket_id.eq(remaining))
                .execute(conn)?;
                if remaining.is_none() {
                    diesel::update(
                        staff_profiles::table
                            .filter(staff_profiles::staff_id.eq(staff_id))
                            .filter(staff_profiles::availability.eq(Availability::Busy.as_str())),
                    )
                    .set(staff_profiles::availability.eq(Availability::Available.as_str()))
                    .execute(conn)?;
                }
            }
        }

        let row: TicketRow = tickets::table
            .filter(tickets::ticket_id.eq(ticket_id))
            .select(TicketRow::as_select())
            .first(conn)?;
        row.into_domain()
    })
}

}
