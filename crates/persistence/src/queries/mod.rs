// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic query modules.
//!
//! This module contains all read-only operations for the persistence
//! layer. All queries use Diesel DSL and work across all supported
//! database backends.
//!
//! ## Module Organization
//!
//! - `tickets` — Single-ticket reads and filtered, paginated listing
//! - `staff` — Staff profile reads
//! - `permissions` — Role permission reads
//! - `notifications` — Recipient-scoped notification listing
//! - `schedule` — Schedule source reads (assignments, personal tasks)

pub mod notifications;
pub mod permissions;
pub mod schedule;
pub mod staff;
pub mod tickets;

// Re-export backend-specific query functions used by lib.rs
pub use notifications::{list_notifications_mysql, list_notifications_sqlite};
pub use permissions::{get_role_permissions_mysql, get_role_permissions_sqlite};
pub use schedule::{list_personal_tasks_mysql, list_personal_tasks_sqlite};
pub use staff::{
    get_staff_profile_mysql, get_staff_profile_sqlite, list_staff_mysql, list_staff_sqlite,
};
pub use tickets::{
    get_ticket_mysql, get_ticket_sqlite, list_in_progress_for_staff_mysql,
    list_in_progress_for_staff_sqlite, list_tickets_mysql, list_tickets_sqlite,
};
