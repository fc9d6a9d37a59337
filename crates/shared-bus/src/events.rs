//! # Rewards Events
//!
//! Defines all event types that flow through the shared bus.
//! Every event is emitted by the node rewards engine after the operation that
//! produced it has committed; failed operations emit nothing.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, BatchNumber, NodeKeyId, Role, Timestamp};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardsEvent {
    // =========================================================================
    // ATTESTATION
    // =========================================================================
    /// A node key owner attested to a batch.
    NodeAttested {
        /// Batch the attestation counts toward.
        batch_number: BatchNumber,
        /// Attesting node key.
        node_key: NodeKeyId,
        /// Owner account that submitted the attestation.
        owner: Address,
    },

    // =========================================================================
    // FINALIZATION
    // =========================================================================
    /// A batch was closed and its per-node reward fixed.
    BatchFinalized {
        /// The finalized batch.
        batch_number: BatchNumber,
        /// Reward each attesting node key may claim.
        reward_per_node: Amount,
        /// Number of attesting node keys.
        attestations: u64,
        /// Finalization time (new confirmed timestamp).
        finalized_at: Timestamp,
        /// Remainder of the batch reward that was not distributed.
        undistributed: Amount,
    },

    // =========================================================================
    // CLAIMS
    // =========================================================================
    /// A node key's reward for a batch was paid out.
    RewardClaimed {
        /// Claimed node key.
        node_key: NodeKeyId,
        /// Batch the reward belongs to.
        batch_number: BatchNumber,
        /// Account credited.
        account: Address,
        /// Amount credited.
        amount: Amount,
    },

    // =========================================================================
    // ALLOW-LIST
    // =========================================================================
    /// An account was added to the KYC allow-list.
    KycWalletAdded {
        /// Enrolled account.
        account: Address,
    },

    /// An account was removed from the KYC allow-list.
    KycWalletRemoved {
        /// Removed account.
        account: Address,
    },

    // =========================================================================
    // ADMINISTRATION
    // =========================================================================
    /// The reward emission rate changed.
    RewardPerSecondUpdated {
        /// Rate before the update.
        previous: Amount,
        /// Rate after the update.
        current: Amount,
    },

    /// A role was granted to an account.
    RoleGranted {
        /// Granted role.
        role: Role,
        /// Receiving account.
        account: Address,
        /// Admin that performed the grant.
        sender: Address,
    },

    /// A role was revoked from an account.
    RoleRevoked {
        /// Revoked role.
        role: Role,
        /// Account losing the role.
        account: Address,
        /// Admin that performed the revocation.
        sender: Address,
    },
}

impl RewardsEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::NodeAttested { .. } => EventTopic::Attestation,
            Self::BatchFinalized { .. } => EventTopic::Finalization,
            Self::RewardClaimed { .. } => EventTopic::Claims,
            Self::KycWalletAdded { .. } | Self::KycWalletRemoved { .. } => EventTopic::AllowList,
            Self::RewardPerSecondUpdated { .. }
            | Self::RoleGranted { .. }
            | Self::RoleRevoked { .. } => EventTopic::Administration,
        }
    }

    /// Account the event concerns, if any.
    #[must_use]
    pub fn account(&self) -> Option<&Address> {
        match self {
            Self::NodeAttested { owner, .. } => Some(owner),
            Self::RewardClaimed { account, .. }
            | Self::KycWalletAdded { account }
            | Self::KycWalletRemoved { account }
            | Self::RoleGranted { account, .. }
            | Self::RoleRevoked { account, .. } => Some(account),
            Self::BatchFinalized { .. } | Self::RewardPerSecondUpdated { .. } => None,
        }
    }
}

/// Event topics for filtering subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Node attestations.
    Attestation,
    /// Batch finalization.
    Finalization,
    /// Reward payouts.
    Claims,
    /// KYC allow-list changes.
    AllowList,
    /// Role and configuration changes.
    Administration,
    /// Wildcard - receive all events.
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to subscribe to (empty = all topics).
    pub topics: Vec<EventTopic>,
    /// Accounts to follow (empty = every account, including account-less events).
    pub accounts: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that matches all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            accounts: Vec::new(),
        }
    }

    /// Create a filter for events concerning specific accounts.
    #[must_use]
    pub fn for_accounts(accounts: Vec<Address>) -> Self {
        Self {
            topics: Vec::new(),
            accounts,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &RewardsEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let account_match = self.accounts.is_empty()
            || event
                .account()
                .is_some_and(|account| self.accounts.contains(account));

        topic_match && account_match
    }
}
