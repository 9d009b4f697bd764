// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Personal task mutation operations.

use crate::backend::PersistenceBackend;
use crate::data_models::NewPersonalTask;
use crate::diesel_schema::personal_tasks;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Insert a personal task and return its identifier.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively and works with both `SQLite` and `MySQL`.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_personal_task(
    conn: &mut _,
    task: &NewPersonalTask,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(personal_tasks::table)
        .values(task)
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

}
