// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Minimum accepted satisfaction rating.
pub const MIN_RATING: i32 = 1;
/// Maximum accepted satisfaction rating.
pub const MAX_RATING: i32 = 5;

/// Validates the requester-supplied fields of a new ticket.
///
/// Title, description, and category must be non-empty after trimming,
/// and a room reference must be present.
///
/// # Errors
///
/// Returns `DomainError::MissingField` naming the first missing field.
pub fn validate_ticket_fields(
    title: &str,
    description: &str,
    category: &str,
    room_id: Option<i64>,
) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::MissingField("title"));
    }
    if description.trim().is_empty() {
        return Err(DomainError::MissingField("description"));
    }
    if category.trim().is_empty() {
        return Err(DomainError::MissingField("category"));
    }
    if room_id.is_none() {
        return Err(DomainError::MissingField("room_id"));
    }
    Ok(())
}

/// Validates a satisfaction rating.
///
/// # Errors
///
/// Returns `DomainError::InvalidRating` if the value is outside 1-5.
pub fn validate_rating(rating: i32) -> Result<(), DomainError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(DomainError::InvalidRating { rating })
    }
}

/// Validates a rejection reason.
///
/// # Errors
///
/// Returns `DomainError::EmptyRejectionReason` if the reason is blank.
pub fn validate_rejection_reason(reason: &str) -> Result<(), DomainError> {
    if reason.trim().is_empty() {
        Err(DomainError::EmptyRejectionReason)
    } else {
        Ok(())
    }
}

/// Validates a resolution note.
///
/// # Errors
///
/// Returns `DomainError::EmptyResolutionNote` if the note is blank.
pub fn validate_resolution_note(note: &str) -> Result<(), DomainError> {
    if note.trim().is_empty() {
        Err(DomainError::EmptyResolutionNote)
    } else {
        Ok(())
    }
}
