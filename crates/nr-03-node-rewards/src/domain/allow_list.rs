//! KYC allow-list

use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::BTreeSet;

/// Accounts allowed to claim rewards. Entries never expire.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AllowList {
    approved: BTreeSet<Address>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_approved(&self, account: &Address) -> bool {
        self.approved.contains(account)
    }

    /// Returns true if the account was not already approved
    pub fn add(&mut self, account: Address) -> bool {
        self.approved.insert(account)
    }

    /// Returns true if the account was approved
    pub fn remove(&mut self, account: &Address) -> bool {
        self.approved.remove(account)
    }

    pub fn len(&self) -> usize {
        self.approved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approved.is_empty()
    }
}
