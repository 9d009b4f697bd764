// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role capability model.
//!
//! Each role maps to a set of capability flags. The factory defaults
//! are immutable constants; the persisted sets may be edited by an
//! administrator and reset back to the defaults at any time.

use crate::error::DomainError;
use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single named capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// View and list tickets.
    ViewTickets,
    /// Mutate ticket lifecycle state.
    EditTickets,
    /// Claim tickets for IT staff, and close on another's behalf.
    AssignIt,
    /// Administer users and role permissions.
    ManageUsers,
    /// Administer equipment records.
    ManageEquipment,
}

impl Capability {
    /// Converts this capability to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ViewTickets => "view_tickets",
            Self::EditTickets => "edit_tickets",
            Self::AssignIt => "assign_it",
            Self::ManageUsers => "manage_users",
            Self::ManageEquipment => "manage_equipment",
        }
    }
}

impl FromStr for Capability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view_tickets" => Ok(Self::ViewTickets),
            "edit_tickets" => Ok(Self::EditTickets),
            "assign_it" => Ok(Self::AssignIt),
            "manage_users" => Ok(Self::ManageUsers),
            "manage_equipment" => Ok(Self::ManageEquipment),
            _ => Err(DomainError::UnknownCapability(s.to_string())),
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The full capability flag set for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    /// May view and list tickets.
    pub view_tickets: bool,
    /// May mutate ticket lifecycle state.
    pub edit_tickets: bool,
    /// May claim tickets and close on another's behalf.
    pub assign_it: bool,
    /// May administer users and role permissions.
    pub manage_users: bool,
    /// May administer equipment records.
    pub manage_equipment: bool,
}

impl PermissionSet {
    /// A set with every capability denied.
    pub const NONE: Self = Self {
        view_tickets: false,
        edit_tickets: false,
        assign_it: false,
        manage_users: false,
        manage_equipment: false,
    };

    /// Returns the immutable factory default set for a role.
    #[must_use]
    pub const fn default_for(role: Role) -> Self {
        match role {
            Role::Admin => Self {
                view_tickets: true,
                edit_tickets: true,
                assign_it: true,
                manage_users: true,
                manage_equipment: true,
            },
            Role::ItSupport => Self {
                view_tickets: true,
                edit_tickets: true,
                assign_it: true,
                manage_users: false,
                manage_equipment: false,
            },
            Role::User => Self {
                view_tickets: true,
                edit_tickets: false,
                assign_it: false,
                manage_users: false,
                manage_equipment: false,
            },
        }
    }

    /// Returns whether this set grants a capability.
    #[must_use]
    pub const fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ViewTickets => self.view_tickets,
            Capability::EditTickets => self.edit_tickets,
            Capability::AssignIt => self.assign_it,
            Capability::ManageUsers => self.manage_users,
            Capability::ManageEquipment => self.manage_equipment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_string_round_trip() {
        let capabilities = vec![
            Capability::ViewTickets,
            Capability::EditTickets,
            Capability::AssignIt,
            Capability::ManageUsers,
            Capability::ManageEquipment,
        ];

        for capability in capabilities {
            let s = capability.as_str();
            match Capability::from_str(s) {
                Ok(parsed) => assert_eq!(capability, parsed),
                Err(e) => panic!("Failed to parse capability string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_unknown_capability_string() {
        assert!(Capability::from_str("delete_everything").is_err());
    }

    #[test]
    fn test_admin_defaults_grant_everything() {
        let set = PermissionSet::default_for(Role::Admin);
        assert!(set.allows(Capability::ViewTickets));
        assert!(set.allows(Capability::EditTickets));
        assert!(set.allows(Capability::AssignIt));
        assert!(set.allows(Capability::ManageUsers));
        assert!(set.allows(Capability::ManageEquipment));
    }

    #[test]
    fn test_it_support_defaults() {
        let set = PermissionSet::default_for(Role::ItSupport);
        assert!(set.allows(Capability::ViewTickets));
        assert!(set.allows(Capability::EditTickets));
        assert!(set.allows(Capability::AssignIt));
        assert!(!set.allows(Capability::ManageUsers));
        assert!(!set.allows(Capability::ManageEquipment));
    }

    #[test]
    fn test_user_defaults_view_only() {
        let set = PermissionSet::default_for(Role::User);
        assert!(set.allows(Capability::ViewTickets));
        assert!(!set.allows(Capability::EditTickets));
        assert!(!set.allows(Capability::AssignIt));
        assert!(!set.allows(Capability::ManageUsers));
        assert!(!set.allows(Capability::ManageEquipment));
    }

    #[test]
    fn test_none_denies_everything() {
        assert!(!PermissionSet::NONE.allows(Capability::ViewTickets));
        assert!(!PermissionSet::NONE.allows(Capability::ManageUsers));
    }
}
