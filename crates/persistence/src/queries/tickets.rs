// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket queries.
//!
//! Listing supports status, category, and substring filters with
//! page/limit paging. The same filter set is applied to the count and
//! the page query so the paging metadata always matches the data.

use crate::data_models::{TicketFilter, TicketPage, TicketRow};
use crate::diesel_schema::tickets;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use helpdesk_domain::{Ticket, TicketStatus};

/// Default page size when the caller supplies none.
const DEFAULT_PAGE_SIZE: i64 = 20;

backend_fn! {

/// Retrieves a ticket by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the ticket is not found.
pub fn get_ticket(
    conn: &mut _,
    ticket_id: i64,
) -> Result<Option<Ticket>, PersistenceError> {
    let result: Result<TicketRow, diesel::result::Error> = tickets::table
        .filter(tickets::ticket_id.eq(ticket_id))
        .select(TicketRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_domain()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

}

backend_fn! {

/// Lists tickets matching a filter, newest first, with paging metadata.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_tickets(
    conn: &mut _,
    filter: &TicketFilter,
) -> Result<TicketPage, PersistenceError> {
    let limit: i64 = if filter.limit < 1 {
        DEFAULT_PAGE_SIZE
    } else {
        filter.limit
    };
    let page: i64 = filter.page.max(1);
    let pattern: Option<String> = filter.search.as_ref().map(|s| format!("%{s}%"));

    let mut count_query = tickets::table.into_boxed();
    let mut page_query = tickets::table.into_boxed();

    if let Some(status) = filter.status {
        let status_str: &'static str = status.as_str();
        count_query = count_query.filter(tickets::status.eq(status_str));
        page_query = page_query.filter(tickets::status.eq(status_str));
    }
    if let Some(category) = &filter.category {
        count_query = count_query.filter(tickets::category.eq(category.clone()));
        page_query = page_query.filter(tickets::category.eq(category.clone()));
    }
    if let Some(pattern) = &pattern {
        count_query = count_query.filter(
            tickets::title
                .like(pattern.clone())
                .or(tickets::description.like(pattern.clone())),
        );
        page_query = page_query.filter(
            tickets::title
                .like(pattern.clone())
                .or(tickets::description.like(pattern.clone())),
        );
    }

    let total: i64 = count_query.count().get_result(conn)?;
    let total_pages: i64 = if total == 0 { 0 } else { (total + limit - 1) / limit };

    let rows: Vec<TicketRow> = page_query
        .order((tickets::created_at.desc(), tickets::ticket_id.desc()))
        .limit(limit)
        .offset((page - 1) * limit)
        .select(TicketRow::as_select())
        .load(conn)?;

    let data: Vec<Ticket> = rows
        .into_iter()
        .map(TicketRow::into_domain)
        .collect::<Result<Vec<Ticket>, PersistenceError>>()?;

    Ok(TicketPage {
        data,
        total,
        page,
        total_pages,
    })
}

}

backend_fn! {

/// Lists the in-progress tickets assigned to a staff member.
///
/// This is the ticket source for the schedule projection.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_in_progress_for_staff(
    conn: &mut _,
    staff_id: i64,
) -> Result<Vec<Ticket>, PersistenceError> {
    let rows: Vec<TicketRow> = tickets::table
        .filter(tickets::assigned_staff_id.eq(staff_id))
        .filter(tickets::status.eq(TicketStatus::InProgress.as_str()))
        .order(tickets::created_at.asc())
        .select(TicketRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(TicketRow::into_domain)
        .collect::<Result<Vec<Ticket>, PersistenceError>>()
}

}
