//! Claim ledger
//!
//! One flag per (node key, batch). A flag is only ever cleared by the
//! operation that set it, when the payout that followed failed.

use serde::{Deserialize, Serialize};
use shared_types::{BatchNumber, NodeKeyId};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ClaimLedger {
    claimed: BTreeMap<BatchNumber, BTreeSet<NodeKeyId>>,
}

impl ClaimLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed(&self, node_key: NodeKeyId, batch_number: BatchNumber) -> bool {
        self.claimed
            .get(&batch_number)
            .is_some_and(|nodes| nodes.contains(&node_key))
    }

    /// Mark a pair claimed. Returns false if it already was.
    pub fn mark(&mut self, node_key: NodeKeyId, batch_number: BatchNumber) -> bool {
        self.claimed.entry(batch_number).or_default().insert(node_key)
    }

    /// Undo a [`Self::mark`] whose payout failed.
    pub fn rollback(&mut self, node_key: NodeKeyId, batch_number: BatchNumber) {
        if let Some(nodes) = self.claimed.get_mut(&batch_number) {
            nodes.remove(&node_key);
            if nodes.is_empty() {
                self.claimed.remove(&batch_number);
            }
        }
    }

    /// Number of claimed pairs in a batch
    pub fn claimed_in(&self, batch_number: BatchNumber) -> usize {
        self.claimed.get(&batch_number).map_or(0, BTreeSet::len)
    }
}
