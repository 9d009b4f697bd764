// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule projection over tickets, personal tasks, and external
//! calendars.
//!
//! Projection fails open: a source that cannot be read contributes
//! nothing and is logged, but the remaining sources still merge into a
//! usable view.

use helpdesk_domain::{ScheduleEntry, ScheduleSource, merge_schedule};
use helpdesk_persistence::SqlitePersistence;

/// Errors an external calendar provider can report.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// The provider could not be reached.
    #[error("calendar provider unreachable: {0}")]
    Unreachable(String),
    /// The provider answered with data that could not be interpreted.
    #[error("calendar provider returned malformed data: {0}")]
    Malformed(String),
}

/// A source of externally managed schedule entries.
///
/// Implementations typically wrap a remote calendar service. The
/// projector treats every failure as an empty contribution.
pub trait CalendarProvider {
    /// Returns the provider's entries for one staff member, optionally
    /// bounded to `[from, to)` in ISO 8601.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot produce entries.
    fn events(
        &self,
        staff_id: i64,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<ScheduleEntry>, CalendarError>;
}

/// A provider for deployments without an external calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExternalCalendar;

impl CalendarProvider for NoExternalCalendar {
    fn events(
        &self,
        _staff_id: i64,
        _from: Option<&str>,
        _to: Option<&str>,
    ) -> Result<Vec<ScheduleEntry>, CalendarError> {
        Ok(Vec::new())
    }
}

/// Projects one staff member's merged schedule.
///
/// Merges three sources: the staff member's in-progress tickets, their
/// personal tasks, and the external calendar. The range bounds apply
/// to tasks and calendar entries; in-progress tickets are ongoing work
/// and always appear.
#[must_use]
pub fn project_schedule(
    persistence: &mut SqlitePersistence,
    calendar: &dyn CalendarProvider,
    staff_id: i64,
    from: Option<&str>,
    to: Option<&str>,
) -> Vec<ScheduleEntry> {
    let ticket_entries: Vec<ScheduleEntry> = match persistence.list_in_progress_for_staff(staff_id)
    {
        Ok(tickets) => tickets
            .into_iter()
            .filter_map(|ticket| {
                let ticket_id: i64 = ticket.ticket_id?;
                Some(ScheduleEntry {
                    source: ScheduleSource::Ticket,
                    source_id: ticket_id.to_string(),
                    title: ticket.title,
                    starts_at: ticket.created_at,
                    ends_at: None,
                })
            })
            .collect(),
        Err(e) => {
            tracing::warn!(staff_id, error = %e, "ticket source unavailable for schedule");
            Vec::new()
        }
    };

    let task_entries: Vec<ScheduleEntry> = match persistence.list_personal_tasks(staff_id, from, to)
    {
        Ok(tasks) => tasks
            .into_iter()
            .map(|task| ScheduleEntry {
                source: ScheduleSource::PersonalTask,
                source_id: task.task_id.to_string(),
                title: task.title,
                starts_at: task.starts_at,
                ends_at: task.ends_at,
            })
            .collect(),
        Err(e) => {
            tracing::warn!(staff_id, error = %e, "task source unavailable for schedule");
            Vec::new()
        }
    };

    let calendar_entries: Vec<ScheduleEntry> = match calendar.events(staff_id, from, to) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(staff_id, error = %e, "external calendar unavailable for schedule");
            Vec::new()
        }
    };

    merge_schedule(vec![ticket_entries, task_entries, calendar_entries])
}
