//! Node Rewards Service - Core business logic
//!
//! Composes the batch ledger, reward accrual, claim ledger, allow-list and
//! access control behind [`NodeRewardsApi`]. Each call takes the state lock
//! once and holds it until the call returns, custody payout included.

use crate::domain::{compute_reward, AccrualError, Authorization, Capability};
use crate::error::{NodeRewardsError, NodeRewardsResult};
use crate::metrics;
use crate::ports::inbound::NodeRewardsApi;
use crate::ports::outbound::{Clock, IdentityRegistry, RewardCustody};
use crate::state::NodeRewardsState;
use crate::types::{BatchSummary, FinalizeReceipt, RewardConfig};
use parking_lot::Mutex;
use shared_bus::RewardsEvent;
use shared_types::{
    format_address, Address, Amount, BatchNumber, NodeKeyId, Role, Timestamp,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Node rewards engine
pub struct NodeRewardsService<I, C, K>
where
    I: IdentityRegistry,
    C: RewardCustody,
    K: Clock,
{
    identity: Arc<I>,
    custody: Arc<C>,
    clock: Arc<K>,
    state: Mutex<NodeRewardsState>,
}

impl<I, C, K> NodeRewardsService<I, C, K>
where
    I: IdentityRegistry,
    C: RewardCustody,
    K: Clock,
{
    /// Create a fresh engine. `admin` receives the admin role and the cursor
    /// starts at the clock's current time.
    pub fn new(
        config: RewardConfig,
        admin: Address,
        identity: Arc<I>,
        custody: Arc<C>,
        clock: Arc<K>,
    ) -> NodeRewardsResult<Self> {
        config.validate()?;
        let genesis = clock.now();

        info!(
            admin = %format_address(&admin),
            reward_per_second = config.reward_per_second,
            max_reward_time_window = config.max_reward_time_window,
            genesis,
            "Node rewards engine initialized"
        );

        let state = NodeRewardsState::new(config, admin, genesis);
        Ok(Self::from_state(state, identity, custody, clock))
    }

    /// Resume from a persisted snapshot
    pub fn from_state(
        state: NodeRewardsState,
        identity: Arc<I>,
        custody: Arc<C>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            identity,
            custody,
            clock,
            state: Mutex::new(state),
        }
    }

    /// Persistable copy of the current state
    pub fn snapshot(&self) -> NodeRewardsState {
        self.state.lock().snapshot()
    }

    pub fn pool_balance(&self) -> Amount {
        self.custody.pool_balance()
    }

    /// Batches holding attestations that are not finalized yet
    pub fn open_batches(&self) -> Vec<BatchNumber> {
        self.state.lock().batches.open_batches()
    }

    // =========================================================================
    // INTERNAL HELPERS
    // =========================================================================

    fn ensure_owner(&self, node_key: NodeKeyId, caller: Address) -> NodeRewardsResult<()> {
        let owner = self.identity.owner_of(node_key)?;
        if owner != caller {
            return Err(NodeRewardsError::not_owner(node_key));
        }
        Ok(())
    }

    fn authorize(
        state: &NodeRewardsState,
        caller: Address,
        capability: Capability,
    ) -> NodeRewardsResult<()> {
        match state.access.authorize(&caller, capability) {
            Authorization::Granted => Ok(()),
            Authorization::Denied { role } => Err(NodeRewardsError::missing_role(role)),
        }
    }

    fn attest_locked(
        &self,
        state: &mut NodeRewardsState,
        batch_number: BatchNumber,
        node_keys: &[NodeKeyId],
        caller: Address,
    ) -> NodeRewardsResult<()> {
        for &node_key in node_keys {
            self.ensure_owner(node_key, caller)?;
        }
        state.batches.validate_attestations(batch_number, node_keys)?;

        state.batches.apply_attestations(batch_number, node_keys);
        for &node_key in node_keys {
            state.emit(RewardsEvent::NodeAttested {
                batch_number,
                node_key,
                owner: caller,
            });
        }

        metrics::record_attestations(node_keys.len() as u64);
        info!(
            batch_number,
            count = node_keys.len(),
            owner = %format_address(&caller),
            "Attestations recorded"
        );
        Ok(())
    }

    fn finalize_locked(
        &self,
        state: &mut NodeRewardsState,
        batch_number: BatchNumber,
        caller: Address,
    ) -> NodeRewardsResult<FinalizeReceipt> {
        Self::authorize(state, caller, Capability::Finalize)?;
        let attestations = state.batches.validate_finalize(batch_number)?;

        let cursor = state.batches.cursor();
        // The confirmed timestamp never moves backwards
        let now = self.clock.now().max(cursor.latest_confirmed_timestamp);
        let breakdown = compute_reward(
            cursor.latest_confirmed_timestamp,
            now,
            attestations,
            &state.config,
        )
        .map_err(|err| match err {
            AccrualError::NoAttestations => NodeRewardsError::EmptyBatch { batch_number },
            AccrualError::Overflow => NodeRewardsError::RewardOverflow,
        })?;

        state.batches.apply_finalize(batch_number, now, breakdown);
        state.undistributed = state.undistributed.saturating_add(breakdown.undistributed);
        state.emit(RewardsEvent::BatchFinalized {
            batch_number,
            reward_per_node: breakdown.reward_per_node,
            attestations,
            finalized_at: now,
            undistributed: breakdown.undistributed,
        });

        metrics::record_batch_finalized(batch_number, attestations);
        info!(
            batch_number,
            attestations,
            elapsed = breakdown.elapsed,
            rewarded_window = breakdown.rewarded_window,
            reward_per_node = breakdown.reward_per_node,
            undistributed = breakdown.undistributed,
            "Batch finalized"
        );

        Ok(FinalizeReceipt {
            batch_number,
            reward_per_node: breakdown.reward_per_node,
            finalized_at: now,
            attestations,
            breakdown,
        })
    }

    /// Checks for one (node key, batch) claim. Returns the reward owed.
    fn validate_claim(
        &self,
        state: &NodeRewardsState,
        node_key: NodeKeyId,
        batch_number: BatchNumber,
        caller: Address,
    ) -> NodeRewardsResult<Amount> {
        self.ensure_owner(node_key, caller)?;

        if !state.allow_list.is_approved(&caller) {
            return Err(NodeRewardsError::NotEligible { account: caller });
        }

        let reward = state
            .batches
            .reward_per_node(batch_number)
            .ok_or(NodeRewardsError::NotFinalized { batch_number })?;

        if !state.batches.has_attested(batch_number, node_key) {
            return Err(NodeRewardsError::NotAttested {
                node_key,
                batch_number,
            });
        }
        if state.claims.is_claimed(node_key, batch_number) {
            return Err(NodeRewardsError::AlreadyClaimed {
                node_key,
                batch_number,
            });
        }
        Ok(reward)
    }

    fn claim_locked(
        &self,
        state: &mut NodeRewardsState,
        node_keys: &[NodeKeyId],
        batch_number: BatchNumber,
        caller: Address,
    ) -> NodeRewardsResult<Amount> {
        let mut seen = BTreeSet::new();
        let mut rewards = Vec::with_capacity(node_keys.len());
        let mut total: Amount = 0;

        for &node_key in node_keys {
            let reward = self.validate_claim(state, node_key, batch_number, caller)?;
            if !seen.insert(node_key) {
                return Err(NodeRewardsError::AlreadyClaimed {
                    node_key,
                    batch_number,
                });
            }
            total = total
                .checked_add(reward)
                .ok_or(NodeRewardsError::RewardOverflow)?;
            rewards.push((node_key, reward));
        }

        for &node_key in node_keys {
            state.claims.mark(node_key, batch_number);
        }

        if let Err(err) = self.custody.credit(caller, total) {
            for &node_key in node_keys {
                state.claims.rollback(node_key, batch_number);
            }
            metrics::record_claim_rollback(node_keys.len() as u64);
            warn!(
                batch_number,
                count = node_keys.len(),
                account = %format_address(&caller),
                amount = total,
                error = %err,
                "Reward payout failed, claims rolled back"
            );
            return Err(err.into());
        }

        state.total_paid = state.total_paid.saturating_add(total);
        for (node_key, amount) in rewards {
            state.emit(RewardsEvent::RewardClaimed {
                node_key,
                batch_number,
                account: caller,
                amount,
            });
        }

        metrics::record_claims(node_keys.len() as u64);
        info!(
            batch_number,
            count = node_keys.len(),
            account = %format_address(&caller),
            amount = total,
            "Rewards claimed"
        );
        Ok(total)
    }
}

fn observe<T>(operation: &'static str, result: NodeRewardsResult<T>) -> NodeRewardsResult<T> {
    if let Err(err) = &result {
        metrics::record_rejection(operation, err.label());
        debug!(operation, reason = err.label(), error = %err, "Operation rejected");
    }
    result
}

impl<I, C, K> NodeRewardsApi for NodeRewardsService<I, C, K>
where
    I: IdentityRegistry,
    C: RewardCustody,
    K: Clock,
{
    fn attest(
        &self,
        batch_number: BatchNumber,
        node_key: NodeKeyId,
        caller: Address,
    ) -> NodeRewardsResult<()> {
        let mut state = self.state.lock();
        observe(
            "attest",
            self.attest_locked(&mut state, batch_number, &[node_key], caller),
        )
    }

    fn batch_attest(
        &self,
        batch_number: BatchNumber,
        node_keys: &[NodeKeyId],
        caller: Address,
    ) -> NodeRewardsResult<()> {
        if node_keys.is_empty() {
            return Ok(());
        }
        let mut state = self.state.lock();
        observe(
            "batch_attest",
            self.attest_locked(&mut state, batch_number, node_keys, caller),
        )
    }

    fn finalize(
        &self,
        batch_number: BatchNumber,
        caller: Address,
    ) -> NodeRewardsResult<FinalizeReceipt> {
        let mut state = self.state.lock();
        observe(
            "finalize",
            self.finalize_locked(&mut state, batch_number, caller),
        )
    }

    fn finalize_next(&self, caller: Address) -> NodeRewardsResult<FinalizeReceipt> {
        let mut state = self.state.lock();
        let next = state.batches.cursor().next_batch();
        observe("finalize", self.finalize_locked(&mut state, next, caller))
    }

    fn claim_reward(
        &self,
        node_key: NodeKeyId,
        batch_number: BatchNumber,
        caller: Address,
    ) -> NodeRewardsResult<Amount> {
        let mut state = self.state.lock();
        observe(
            "claim",
            self.claim_locked(&mut state, &[node_key], batch_number, caller),
        )
    }

    fn batch_claim_reward(
        &self,
        node_keys: &[NodeKeyId],
        batch_number: BatchNumber,
        caller: Address,
    ) -> NodeRewardsResult<Amount> {
        if node_keys.is_empty() {
            return Ok(0);
        }
        let mut state = self.state.lock();
        observe(
            "batch_claim",
            self.claim_locked(&mut state, node_keys, batch_number, caller),
        )
    }

    fn add_kyc_wallets(&self, accounts: &[Address], caller: Address) -> NodeRewardsResult<()> {
        let mut state = self.state.lock();
        let result = Self::authorize(&state, caller, Capability::ManageAllowList).map(|()| {
            for &account in accounts {
                if state.allow_list.add(account) {
                    state.emit(RewardsEvent::KycWalletAdded { account });
                }
            }
            info!(count = accounts.len(), "KYC wallets added");
        });
        observe("add_kyc_wallets", result)
    }

    fn remove_kyc_wallets(&self, accounts: &[Address], caller: Address) -> NodeRewardsResult<()> {
        let mut state = self.state.lock();
        let result = Self::authorize(&state, caller, Capability::ManageAllowList).map(|()| {
            for account in accounts {
                if state.allow_list.remove(account) {
                    state.emit(RewardsEvent::KycWalletRemoved { account: *account });
                }
            }
            info!(count = accounts.len(), "KYC wallets removed");
        });
        observe("remove_kyc_wallets", result)
    }

    fn grant_role(&self, role: Role, account: Address, caller: Address) -> NodeRewardsResult<()> {
        let mut state = self.state.lock();
        let result = Self::authorize(&state, caller, Capability::ManageRoles).map(|()| {
            if state.access.grant(role, account) {
                state.emit(RewardsEvent::RoleGranted {
                    role,
                    account,
                    sender: caller,
                });
                info!(%role, account = %format_address(&account), "Role granted");
            }
        });
        observe("grant_role", result)
    }

    fn revoke_role(&self, role: Role, account: Address, caller: Address) -> NodeRewardsResult<()> {
        let mut state = self.state.lock();
        let result = Self::authorize(&state, caller, Capability::ManageRoles).map(|()| {
            if state.access.revoke(role, &account) {
                state.emit(RewardsEvent::RoleRevoked {
                    role,
                    account,
                    sender: caller,
                });
                info!(%role, account = %format_address(&account), "Role revoked");
            }
        });
        observe("revoke_role", result)
    }

    fn set_reward_per_second(&self, amount: Amount, caller: Address) -> NodeRewardsResult<()> {
        let mut state = self.state.lock();
        let result = Self::authorize(&state, caller, Capability::SetRewardRate)
            .and_then(|()| state.config.with_reward_per_second(amount))
            .map(|config| {
                let previous = state.config.reward_per_second;
                state.config = config;
                state.emit(RewardsEvent::RewardPerSecondUpdated {
                    previous,
                    current: amount,
                });
                info!(previous, current = amount, "Reward per second updated");
            });
        observe("set_reward_per_second", result)
    }

    fn reward_per_node_of_batch(&self, batch_number: BatchNumber) -> Option<Amount> {
        self.state.lock().batches.reward_per_node(batch_number)
    }

    fn latest_finalized_batch_number(&self) -> BatchNumber {
        self.state.lock().batches.cursor().latest_finalized_batch
    }

    fn latest_confirmed_timestamp(&self) -> Timestamp {
        self.state.lock().batches.cursor().latest_confirmed_timestamp
    }

    fn is_claimed(&self, node_key: NodeKeyId, batch_number: BatchNumber) -> bool {
        self.state.lock().claims.is_claimed(node_key, batch_number)
    }

    fn batch(&self, batch_number: BatchNumber) -> Option<BatchSummary> {
        self.state
            .lock()
            .batches
            .get(batch_number)
            .map(|batch| batch.summary())
    }

    fn has_attested(&self, batch_number: BatchNumber, node_key: NodeKeyId) -> bool {
        self.state.lock().batches.has_attested(batch_number, node_key)
    }

    fn is_kyc_approved(&self, account: Address) -> bool {
        self.state.lock().allow_list.is_approved(&account)
    }

    fn has_role(&self, role: Role, account: Address) -> bool {
        self.state.lock().access.has_role(role, &account)
    }

    fn reward_config(&self) -> RewardConfig {
        self.state.lock().config
    }

    fn undistributed_rewards(&self) -> Amount {
        self.state.lock().undistributed
    }

    fn total_rewards_paid(&self) -> Amount {
        self.state.lock().total_paid
    }

    fn take_events(&self) -> Vec<RewardsEvent> {
        self.state.lock().take_events()
    }
}
