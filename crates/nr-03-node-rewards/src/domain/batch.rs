//! Batch ledger
//!
//! Tracks attestations per batch and the finalization cursor. Mutations are
//! split into a `validate_*` step that reads only and an `apply_*` step that
//! cannot fail, so a rejected request never leaves a partial write.

use super::accrual::RewardBreakdown;
use crate::error::{NodeRewardsError, NodeRewardsResult};
use crate::types::BatchSummary;
use serde::{Deserialize, Serialize};
use shared_types::{Amount, BatchNumber, NodeKeyId, Timestamp};
use std::collections::{BTreeMap, BTreeSet};

/// Fixed once a batch is finalized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finalization {
    pub finalized_at: Timestamp,
    pub breakdown: RewardBreakdown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub batch_number: BatchNumber,
    attested: BTreeSet<NodeKeyId>,
    finalization: Option<Finalization>,
}

impl Batch {
    fn new(batch_number: BatchNumber) -> Self {
        Self {
            batch_number,
            attested: BTreeSet::new(),
            finalization: None,
        }
    }

    pub fn has_attested(&self, node_key: NodeKeyId) -> bool {
        self.attested.contains(&node_key)
    }

    pub fn attestation_count(&self) -> u64 {
        self.attested.len() as u64
    }

    pub fn attested_nodes(&self) -> impl Iterator<Item = NodeKeyId> + '_ {
        self.attested.iter().copied()
    }

    pub fn finalization(&self) -> Option<&Finalization> {
        self.finalization.as_ref()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalization.is_some()
    }

    pub fn reward_per_node(&self) -> Option<Amount> {
        self.finalization.map(|f| f.breakdown.reward_per_node)
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            batch_number: self.batch_number,
            attested_nodes: self.attested.iter().copied().collect(),
            finalized_at: self.finalization.map(|f| f.finalized_at),
            reward_per_node: self.reward_per_node(),
        }
    }
}

/// Latest finalized batch and the time it was confirmed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizationCursor {
    pub latest_finalized_batch: BatchNumber,
    pub latest_confirmed_timestamp: Timestamp,
}

impl FinalizationCursor {
    pub fn genesis(timestamp: Timestamp) -> Self {
        Self {
            latest_finalized_batch: 0,
            latest_confirmed_timestamp: timestamp,
        }
    }

    /// Batch that `finalize_next` targets
    pub fn next_batch(&self) -> BatchNumber {
        self.latest_finalized_batch + 1
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchLedger {
    batches: BTreeMap<BatchNumber, Batch>,
    cursor: FinalizationCursor,
}

impl BatchLedger {
    pub fn new(genesis_timestamp: Timestamp) -> Self {
        Self {
            batches: BTreeMap::new(),
            cursor: FinalizationCursor::genesis(genesis_timestamp),
        }
    }

    pub fn cursor(&self) -> FinalizationCursor {
        self.cursor
    }

    pub fn get(&self, batch_number: BatchNumber) -> Option<&Batch> {
        self.batches.get(&batch_number)
    }

    pub fn has_attested(&self, batch_number: BatchNumber, node_key: NodeKeyId) -> bool {
        self.get(batch_number)
            .is_some_and(|batch| batch.has_attested(node_key))
    }

    pub fn reward_per_node(&self, batch_number: BatchNumber) -> Option<Amount> {
        self.get(batch_number).and_then(Batch::reward_per_node)
    }

    /// Check that every node may attest to `batch_number`.
    ///
    /// Duplicates against the stored set and inside `nodes` are both rejected.
    pub fn validate_attestations(
        &self,
        batch_number: BatchNumber,
        nodes: &[NodeKeyId],
    ) -> NodeRewardsResult<()> {
        // Numbers at or below the cursor are closed even if never seen
        let closed = batch_number <= self.cursor.latest_finalized_batch
            || self.get(batch_number).is_some_and(Batch::is_finalized);
        if closed {
            return Err(NodeRewardsError::AlreadyFinalized { batch_number });
        }

        let mut seen = BTreeSet::new();
        for &node_key in nodes {
            if self.has_attested(batch_number, node_key) || !seen.insert(node_key) {
                return Err(NodeRewardsError::DuplicateAttestation {
                    node_key,
                    batch_number,
                });
            }
        }
        Ok(())
    }

    /// Record attestations previously accepted by [`Self::validate_attestations`].
    pub fn apply_attestations(&mut self, batch_number: BatchNumber, nodes: &[NodeKeyId]) {
        let batch = self
            .batches
            .entry(batch_number)
            .or_insert_with(|| Batch::new(batch_number));
        batch.attested.extend(nodes.iter().copied());
    }

    /// Check that `batch_number` can be finalized now.
    ///
    /// Returns the number of attestations to split the reward across.
    pub fn validate_finalize(&self, batch_number: BatchNumber) -> NodeRewardsResult<u64> {
        let batch = self.get(batch_number);

        if batch.is_some_and(Batch::is_finalized) {
            return Err(NodeRewardsError::AlreadyFinalized { batch_number });
        }

        let attestations = batch.map_or(0, Batch::attestation_count);
        if attestations == 0 {
            return Err(NodeRewardsError::EmptyBatch { batch_number });
        }

        if batch_number <= self.cursor.latest_finalized_batch {
            return Err(NodeRewardsError::NotMonotonic {
                batch_number,
                latest_finalized: self.cursor.latest_finalized_batch,
            });
        }

        Ok(attestations)
    }

    /// Close a batch validated by [`Self::validate_finalize`] and advance the cursor.
    pub fn apply_finalize(
        &mut self,
        batch_number: BatchNumber,
        finalized_at: Timestamp,
        breakdown: RewardBreakdown,
    ) {
        let batch = self
            .batches
            .entry(batch_number)
            .or_insert_with(|| Batch::new(batch_number));
        batch.finalization = Some(Finalization {
            finalized_at,
            breakdown,
        });

        self.cursor = FinalizationCursor {
            latest_finalized_batch: batch_number,
            latest_confirmed_timestamp: finalized_at.max(self.cursor.latest_confirmed_timestamp),
        };
    }

    /// Batches with attestations that are still open, ascending
    pub fn open_batches(&self) -> Vec<BatchNumber> {
        self.batches
            .range(self.cursor.next_batch()..)
            .filter(|(_, batch)| !batch.is_finalized())
            .map(|(number, _)| *number)
            .collect()
    }
}
