// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff directory queries.

use crate::data_models::StaffProfileRow;
use crate::diesel_schema::staff_profiles;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use helpdesk_domain::StaffProfile;

backend_fn! {

/// Retrieves a staff profile by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the profile is not found.
pub fn get_staff_profile(
    conn: &mut _,
    staff_id: i64,
) -> Result<Option<StaffProfile>, PersistenceError> {
    let result: Result<StaffProfileRow, diesel::result::Error> = staff_profiles::table
        .filter(staff_profiles::staff_id.eq(staff_id))
        .select(StaffProfileRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_domain()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

}

backend_fn! {

/// Lists staff profiles, optionally restricted to one role.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_staff(
    conn: &mut _,
    role: Option<&str>,
) -> Result<Vec<StaffProfile>, PersistenceError> {
    let mut query = staff_profiles::table.into_boxed();
    if let Some(role) = role {
        query = query.filter(staff_profiles::role.eq(role.to_string()));
    }

    let rows: Vec<StaffProfileRow> = query
        .order(staff_profiles::staff_id.asc())
        .select(StaffProfileRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(StaffProfileRow::into_domain)
        .collect::<Result<Vec<StaffProfile>, PersistenceError>>()
}

}
