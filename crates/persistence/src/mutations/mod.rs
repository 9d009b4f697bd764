// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence layer.
//! Most mutations use Diesel DSL and are backend-agnostic, with minimal use of
//! backend-specific helpers (e.g., `last_insert_rowid()` for `SQLite`).
//!
//! ## Module Organization
//!
//! - `tickets` — Ticket inserts and guarded lifecycle updates
//! - `staff` — Staff profile upserts and availability changes
//! - `permissions` — Role permission row updates
//! - `notifications` — Fan-out inserts (deduplicated) and recipient actions
//! - `tasks` — Personal task inserts
//!
//! ## Backend-Specific Code
//!
//! Backend-specific helpers (e.g., `get_last_insert_rowid()`) are imported from
//! the `backend` module. All other code uses Diesel DSL exclusively.

pub mod notifications;
pub mod permissions;
pub mod staff;
pub mod tasks;
pub mod tickets;

// Re-export backend-specific mutation functions used by lib.rs
pub use notifications::{
    delete_notification_mysql, delete_notification_sqlite, insert_notifications_mysql,
    insert_notifications_sqlite, mark_notification_read_mysql, mark_notification_read_sqlite,
};
pub use permissions::{update_role_permissions_mysql, update_role_permissions_sqlite};
pub use staff::{
    set_staff_availability_mysql, set_staff_availability_sqlite, upsert_staff_profile_mysql,
    upsert_staff_profile_sqlite,
};
pub use tasks::{insert_personal_task_mysql, insert_personal_task_sqlite};
pub use tickets::{
    apply_ticket_transition_mysql, apply_ticket_transition_sqlite, insert_ticket_mysql,
    insert_ticket_sqlite,
};
