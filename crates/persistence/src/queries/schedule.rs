// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule source queries.
//!
//! The projector merges ticket assignments (see `queries::tickets`),
//! personal tasks, and external calendar entries. This module reads the
//! personal-task source.

use crate::data_models::PersonalTask;
use crate::diesel_schema::personal_tasks;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Lists a staff member's personal tasks within an optional range.
///
/// Range bounds are ISO 8601 instants compared against each task's
/// start; either bound may be omitted.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_personal_tasks(
    conn: &mut _,
    staff_id: i64,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Vec<PersonalTask>, PersistenceError> {
    let mut query = personal_tasks::table
        .filter(personal_tasks::staff_id.eq(staff_id))
        .into_boxed();

    if let Some(from) = from {
        query = query.filter(personal_tasks::starts_at.ge(from.to_string()));
    }
    if let Some(to) = to {
        query = query.filter(personal_tasks::starts_at.le(to.to_string()));
    }

    let rows: Vec<PersonalTask> = query
        .order(personal_tasks::starts_at.asc())
        .select(PersonalTask::as_select())
        .load(conn)?;
    Ok(rows)
}

}
