// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability enforcement against the persisted permission store.
//!
//! Every check reads the live permission row for the caller's role, so
//! administrative edits take effect immediately. The guard fails
//! closed: if the permission store cannot be read, the action is
//! denied rather than allowed through.

use helpdesk_domain::{Capability, PermissionSet, Role};
use helpdesk_persistence::SqlitePersistence;

use crate::error::ApiError;

/// An authenticated caller with an associated role.
///
/// Authentication itself happens upstream; the API layer receives the
/// already-established identity and enforces capabilities on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedCaller {
    /// The caller's user identifier.
    pub caller_id: i64,
    /// The role assigned to this caller.
    pub role: Role,
}

impl AuthenticatedCaller {
    /// Creates a new authenticated caller.
    #[must_use]
    pub const fn new(caller_id: i64, role: Role) -> Self {
        Self { caller_id, role }
    }
}

/// Checks that the caller's role currently grants a capability.
///
/// # Arguments
///
/// * `persistence` - The persistence layer holding the permission store
/// * `caller` - The authenticated caller
/// * `capability` - The capability the action requires
/// * `action` - The action name, used in the denial message
///
/// # Errors
///
/// Returns `ApiError::Forbidden` if the capability is not granted, or
/// if the permission row could not be read at all.
pub fn authorize(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    capability: Capability,
    action: &str,
) -> Result<(), ApiError> {
    let permissions: PermissionSet = match persistence.get_role_permissions(caller.role) {
        Ok(set) => set,
        Err(e) => {
            tracing::warn!(
                role = caller.role.as_str(),
                action,
                error = %e,
                "permission store unreadable, denying action"
            );
            return Err(denied(caller.role, capability, action));
        }
    };

    if permissions.allows(capability) {
        Ok(())
    } else {
        Err(denied(caller.role, capability, action))
    }
}

/// Reports whether the caller's role currently grants a capability.
///
/// Used for optional privileges (e.g. closing a ticket on the
/// assignee's behalf) where denial changes behavior instead of failing
/// the request. A store read failure reads as "not granted".
#[must_use]
pub fn holds_capability(
    persistence: &mut SqlitePersistence,
    caller: &AuthenticatedCaller,
    capability: Capability,
) -> bool {
    match persistence.get_role_permissions(caller.role) {
        Ok(set) => set.allows(capability),
        Err(e) => {
            tracing::warn!(
                role = caller.role.as_str(),
                capability = capability.as_str(),
                error = %e,
                "permission store unreadable, treating capability as not granted"
            );
            false
        }
    }
}

fn denied(role: Role, capability: Capability, action: &str) -> ApiError {
    ApiError::Forbidden {
        action: action.to_string(),
        message: format!(
            "role '{}' does not hold the '{}' capability",
            role.as_str(),
            capability.as_str()
        ),
    }
}
