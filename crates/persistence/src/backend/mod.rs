// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Everything the ticket store cannot express in backend-agnostic
//! Diesel DSL lives here: connection setup, migration execution, and
//! per-backend configuration such as PRAGMA statements.
//!
//! ## Backend Support
//!
//! - `sqlite` — default for development and the standard test suite
//! - `mysql` — MySQL/MariaDB, validated via opt-in tests
//!
//! Ticket, staff, permission, and notification queries must stay
//! backend-agnostic; they live in `queries/` and `mutations/` and run
//! unchanged against both backends.

pub mod mysql;
pub mod sqlite;

use diesel::{Connection, MysqlConnection, SqliteConnection};

use crate::error::PersistenceError;

/// Backend-specific operations the store needs from a connection.
///
/// Implemented for both `SqliteConnection` and `MysqlConnection` so
/// mutation code can recover inserted identifiers and the startup path
/// can verify integrity settings without branching on the backend.
pub trait PersistenceBackend: Connection {
    /// Retrieves the last inserted row ID.
    ///
    /// Diesel's `RETURNING` support varies across backends, and newly
    /// inserted tickets and notifications need their identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// Notifications and personal tasks reference ticket and staff
    /// rows; this startup check ensures the backend actually enforces
    /// those constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }
}

impl PersistenceBackend for MysqlConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }
}
