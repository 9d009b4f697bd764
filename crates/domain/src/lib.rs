// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod permissions;
mod schedule;
mod ticket_status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use permissions::{Capability, PermissionSet};
pub use schedule::{ScheduleEntry, ScheduleSource, merge_schedule};
pub use ticket_status::TicketStatus;
pub use types::{Availability, Role, StaffProfile, Ticket, Urgency};
pub use validation::{
    MAX_RATING, MIN_RATING, validate_rating, validate_rejection_reason, validate_resolution_note,
    validate_ticket_fields,
};
