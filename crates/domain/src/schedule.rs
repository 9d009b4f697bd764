// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule entry model.
//!
//! A staff member's schedule is a merged, chronologically ordered view
//! of ticket assignments, personal tasks, and external calendar
//! entries. The merge itself is pure; sourcing the entries is the
//! projector's job at the API layer.

use serde::{Deserialize, Serialize};

/// The origin of a schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSource {
    /// An in-progress ticket assigned to the staff member.
    Ticket,
    /// A personal task created by the staff member.
    PersonalTask,
    /// An entry supplied by an external calendar provider.
    ExternalCalendar,
}

impl ScheduleSource {
    /// Converts this source to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ticket => "ticket",
            Self::PersonalTask => "personal_task",
            Self::ExternalCalendar => "external_calendar",
        }
    }
}

/// One entry in a staff member's projected schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Where the entry came from.
    pub source: ScheduleSource,
    /// Identifier within the source (ticket id, task id, or provider id).
    pub source_id: String,
    /// Display title.
    pub title: String,
    /// Start instant, ISO 8601.
    pub starts_at: String,
    /// End instant, ISO 8601, when the source defines one.
    pub ends_at: Option<String>,
}

/// Merges entry lists from multiple sources into one chronological view.
///
/// Entries sort by start instant; ISO 8601 strings in UTC sort
/// correctly lexicographically. Ties break by source then source id so
/// the projection is deterministic.
#[must_use]
pub fn merge_schedule(sources: Vec<Vec<ScheduleEntry>>) -> Vec<ScheduleEntry> {
    let mut merged: Vec<ScheduleEntry> = sources.into_iter().flatten().collect();
    merged.sort_by(|a, b| {
        a.starts_at
            .cmp(&b.starts_at)
            .then_with(|| a.source.as_str().cmp(b.source.as_str()))
            .then_with(|| a.source_id.cmp(&b.source_id))
    });
    merged
}
