// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff profile mutation operations.

use crate::data_models::StaffProfileRow;
use crate::diesel_schema::staff_profiles;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use helpdesk_domain::StaffProfile;

backend_fn! {

/// Insert or replace a staff profile row.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively and works with both `SQLite` and `MySQL`.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_staff_profile(
    conn: &mut _,
    profile: &StaffProfile,
) -> Result<(), PersistenceError> {
    let record: StaffProfileRow = StaffProfileRow::from_domain(profile);
    diesel::replace_into(staff_profiles::table)
        .values(&record)
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Set a staff member's availability explicitly.
///
/// This is the administrative toggle; it may set any state, including
/// `on_leave` and its release back to `available`.
///
/// Returns the number of affected rows; zero means the profile does
/// not exist.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_staff_availability(
    conn: &mut _,
    staff_id: i64,
    availability: &str,
) -> Result<usize, PersistenceError> {
    let rows: usize =
        diesel::update(staff_profiles::table.filter(staff_profiles::staff_id.eq(staff_id)))
            .set(staff_profiles::availability.eq(availability))
            .execute(conn)?;
    Ok(rows)
}

}
