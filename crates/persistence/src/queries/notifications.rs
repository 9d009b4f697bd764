// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification queries.

use crate::data_models::{NotificationData, NotificationRow};
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Lists a recipient's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_notifications(
    conn: &mut _,
    recipient_id: i64,
) -> Result<Vec<NotificationData>, PersistenceError> {
    let rows: Vec<NotificationRow> = notifications::table
        .filter(notifications::recipient_id.eq(recipient_id))
        .order((
            notifications::created_at.desc(),
            notifications::notification_id.desc(),
        ))
        .select(NotificationRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(NotificationRow::into_data).collect())
}

}
