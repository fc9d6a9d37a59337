//! Driving Ports (API - Inbound)

use crate::error::NodeRewardsResult;
use crate::types::{BatchSummary, FinalizeReceipt, RewardConfig};
use shared_bus::RewardsEvent;
use shared_types::{Address, Amount, BatchNumber, NodeKeyId, Role, Timestamp};

/// Primary Node Rewards API
///
/// Every operation runs to completion under one lock. A failed operation
/// changes nothing and queues no events.
pub trait NodeRewardsApi: Send + Sync {
    // -------------------------------------------------------------------------
    // Attestation
    // -------------------------------------------------------------------------

    /// Record that `node_key` attests to `batch_number`. Caller must own the key.
    fn attest(
        &self,
        batch_number: BatchNumber,
        node_key: NodeKeyId,
        caller: Address,
    ) -> NodeRewardsResult<()>;

    /// All-or-nothing [`Self::attest`] over several keys. An empty list is a no-op.
    fn batch_attest(
        &self,
        batch_number: BatchNumber,
        node_keys: &[NodeKeyId],
        caller: Address,
    ) -> NodeRewardsResult<()>;

    // -------------------------------------------------------------------------
    // Finalization
    // -------------------------------------------------------------------------

    /// Close a batch and fix its per-node reward. Requires the finalizer role.
    fn finalize(
        &self,
        batch_number: BatchNumber,
        caller: Address,
    ) -> NodeRewardsResult<FinalizeReceipt>;

    /// Finalize the batch right after the latest finalized one.
    fn finalize_next(&self, caller: Address) -> NodeRewardsResult<FinalizeReceipt>;

    // -------------------------------------------------------------------------
    // Claims
    // -------------------------------------------------------------------------

    /// Pay `node_key`'s reward for a finalized batch to the caller.
    ///
    /// Returns the amount paid.
    fn claim_reward(
        &self,
        node_key: NodeKeyId,
        batch_number: BatchNumber,
        caller: Address,
    ) -> NodeRewardsResult<Amount>;

    /// All-or-nothing [`Self::claim_reward`], paid in one transfer.
    ///
    /// Returns the total paid.
    fn batch_claim_reward(
        &self,
        node_keys: &[NodeKeyId],
        batch_number: BatchNumber,
        caller: Address,
    ) -> NodeRewardsResult<Amount>;

    // -------------------------------------------------------------------------
    // Administration
    // -------------------------------------------------------------------------

    fn add_kyc_wallets(&self, accounts: &[Address], caller: Address) -> NodeRewardsResult<()>;

    fn remove_kyc_wallets(&self, accounts: &[Address], caller: Address) -> NodeRewardsResult<()>;

    fn grant_role(&self, role: Role, account: Address, caller: Address) -> NodeRewardsResult<()>;

    fn revoke_role(&self, role: Role, account: Address, caller: Address) -> NodeRewardsResult<()>;

    fn set_reward_per_second(&self, amount: Amount, caller: Address) -> NodeRewardsResult<()>;

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// `None` until the batch is finalized
    fn reward_per_node_of_batch(&self, batch_number: BatchNumber) -> Option<Amount>;

    fn latest_finalized_batch_number(&self) -> BatchNumber;

    fn latest_confirmed_timestamp(&self) -> Timestamp;

    fn is_claimed(&self, node_key: NodeKeyId, batch_number: BatchNumber) -> bool;

    fn batch(&self, batch_number: BatchNumber) -> Option<BatchSummary>;

    fn has_attested(&self, batch_number: BatchNumber, node_key: NodeKeyId) -> bool;

    fn is_kyc_approved(&self, account: Address) -> bool;

    fn has_role(&self, role: Role, account: Address) -> bool;

    fn reward_config(&self) -> RewardConfig;

    /// Rounding remainders of every finalized batch, left in the pool
    fn undistributed_rewards(&self) -> Amount;

    fn total_rewards_paid(&self) -> Amount;

    /// Drain events queued by committed operations, oldest first
    fn take_events(&self) -> Vec<RewardsEvent>;
}
