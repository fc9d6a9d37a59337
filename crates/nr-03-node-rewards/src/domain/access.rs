//! Role-based access control
//!
//! Every administrative operation names the [`Capability`] it needs and asks
//! [`AccessControl::authorize`] before touching state.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Role};
use std::collections::{BTreeMap, BTreeSet};

/// Something a caller may be allowed to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    ManageRoles,
    ManageAllowList,
    SetRewardRate,
    Finalize,
}

impl Capability {
    pub fn required_role(&self) -> Role {
        match self {
            Capability::ManageRoles => Role::Admin,
            Capability::ManageAllowList => Role::KycController,
            Capability::SetRewardRate => Role::RewardsController,
            Capability::Finalize => Role::Finalizer,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Denied { role: Role },
}

impl Authorization {
    pub fn is_granted(&self) -> bool {
        matches!(self, Authorization::Granted)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AccessControl {
    members: BTreeMap<Role, BTreeSet<Address>>,
}

impl AccessControl {
    /// Start with a single admin
    pub fn new(admin: Address) -> Self {
        let mut access = Self::default();
        access.grant(Role::Admin, admin);
        access
    }

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.members
            .get(&role)
            .is_some_and(|accounts| accounts.contains(account))
    }

    pub fn authorize(&self, caller: &Address, capability: Capability) -> Authorization {
        let role = capability.required_role();
        if self.has_role(role, caller) {
            Authorization::Granted
        } else {
            Authorization::Denied { role }
        }
    }

    /// Returns true if the role was newly granted
    pub fn grant(&mut self, role: Role, account: Address) -> bool {
        self.members.entry(role).or_default().insert(account)
    }

    /// Returns true if the account held the role
    pub fn revoke(&mut self, role: Role, account: &Address) -> bool {
        self.members
            .get_mut(&role)
            .is_some_and(|accounts| accounts.remove(account))
    }

    pub fn members(&self, role: Role) -> Vec<Address> {
        self.members
            .get(&role)
            .map(|accounts| accounts.iter().copied().collect())
            .unwrap_or_default()
    }
}
