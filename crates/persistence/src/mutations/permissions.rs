// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role permission mutation operations.
//!
//! The three role rows are seeded by the initial migration; mutation is
//! always an UPDATE of an existing row, never an insert.

use crate::diesel_schema::role_permissions;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use helpdesk_domain::PermissionSet;

backend_fn! {

/// Replace the capability flags stored for a role.
///
/// Returns the number of affected rows; zero means the role has no
/// permission row.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively and works with both `SQLite` and `MySQL`.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_role_permissions(
    conn: &mut _,
    role: &str,
    set: &PermissionSet,
) -> Result<usize, PersistenceError> {
    let rows: usize =
        diesel::update(role_permissions::table.filter(role_permissions::role.eq(role)))
            .set((
                role_permissions::view_tickets.eq(i32::from(set.view_tickets)),
                role_permissions::edit_tickets.eq(i32::from(set.edit_tickets)),
                role_permissions::assign_it.eq(i32::from(set.assign_it)),
                role_permissions::manage_users.eq(i32::from(set.manage_users)),
                role_permissions::manage_equipment.eq(i32::from(set.manage_equipment)),
            ))
            .execute(conn)?;
    Ok(rows)
}

}
