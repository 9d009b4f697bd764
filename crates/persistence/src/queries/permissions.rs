// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role permission queries.

use crate::diesel_schema::role_permissions;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use helpdesk_domain::PermissionSet;

/// Diesel Queryable struct for permission rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = role_permissions)]
struct RolePermissionsRow {
    #[allow(dead_code)]
    role: String,
    view_tickets: i32,
    edit_tickets: i32,
    assign_it: i32,
    manage_users: i32,
    manage_equipment: i32,
}

backend_fn! {

/// Retrieves the stored capability flags for a role.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the role has no permission row.
pub fn get_role_permissions(
    conn: &mut _,
    role: &str,
) -> Result<Option<PermissionSet>, PersistenceError> {
    let result: Result<RolePermissionsRow, diesel::result::Error> = role_permissions::table
        .filter(role_permissions::role.eq(role))
        .select(RolePermissionsRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(PermissionSet {
            view_tickets: row.view_tickets != 0,
            edit_tickets: row.edit_tickets != 0,
            assign_it: row.assign_it != 0,
            manage_users: row.manage_users != 0,
            manage_equipment: row.manage_equipment != 0,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

}
