// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification mutation operations.
//!
//! Fan-out inserts go through insert-or-ignore against the unique
//! `(recipient_id, ticket_id, kind, transitioned_at)` index, so a
//! retried dispatch is idempotent per transition.

use crate::data_models::NewNotification;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Insert fan-out rows, skipping any that already exist.
///
/// Returns the number of rows actually inserted.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively and works with both `SQLite` and `MySQL`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_notifications(
    conn: &mut _,
    records: &[NewNotification],
) -> Result<usize, PersistenceError> {
    let rows: usize = diesel::insert_or_ignore_into(notifications::table)
        .values(records)
        .execute(conn)?;
    Ok(rows)
}

}

backend_fn! {

/// Mark one of a recipient's notifications as read.
///
/// Returns the number of affected rows; zero means the notification
/// does not exist or belongs to someone else.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_notification_read(
    conn: &mut _,
    recipient_id: i64,
    notification_id: i64,
) -> Result<usize, PersistenceError> {
    let rows: usize = diesel::update(
        notifications::table
            .filter(notifications::notification_id.eq(notification_id))
            .filter(notifications::recipient_id.eq(recipient_id)),
    )
    .set(notifications::is_read.eq(1))
    .execute(conn)?;
    Ok(rows)
}

}

backend_fn! {

/// Delete one of a recipient's notifications.
///
/// Returns the number of affected rows; zero means the notification
/// does not exist or belongs to someone else.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_notification(
    conn: &mut _,
    recipient_id: i64,
    notification_id: i64,
) -> Result<usize, PersistenceError> {
    let rows: usize = diesel::delete(
        notifications::table
            .filter(notifications::notification_id.eq(notification_id))
            .filter(notifications::recipient_id.eq(recipient_id)),
    )
    .execute(conn)?;
    Ok(rows)
}

}
