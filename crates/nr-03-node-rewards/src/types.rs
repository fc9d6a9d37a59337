use crate::domain::RewardBreakdown;
use crate::error::{NodeRewardsError, NodeRewardsResult};
use serde::{Deserialize, Serialize};
use shared_types::{Amount, BatchNumber, NodeKeyId, Timestamp};

/// 10 gwei per second
pub const DEFAULT_REWARD_PER_SECOND: Amount = 10_000_000_000;

/// 20 minutes
pub const DEFAULT_MAX_REWARD_TIME_WINDOW: u64 = 20 * 60;

/// Reward emission configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Tokens emitted per elapsed second, shared by a batch's attesters
    pub reward_per_second: Amount,
    /// Cap on the seconds a single batch can be rewarded for
    pub max_reward_time_window: u64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            reward_per_second: DEFAULT_REWARD_PER_SECOND,
            max_reward_time_window: DEFAULT_MAX_REWARD_TIME_WINDOW,
        }
    }
}

impl RewardConfig {
    /// Build a validated config
    pub fn new(reward_per_second: Amount, max_reward_time_window: u64) -> NodeRewardsResult<Self> {
        let config = Self {
            reward_per_second,
            max_reward_time_window,
        };
        config.validate()?;
        Ok(config)
    }

    /// The largest reward a single batch can produce must fit in [`Amount`].
    pub fn validate(&self) -> NodeRewardsResult<()> {
        if self.max_reward_time_window == 0 {
            return Err(NodeRewardsError::InvalidConfig {
                reason: "max_reward_time_window must be greater than zero".into(),
            });
        }
        if self.max_batch_reward().is_none() {
            return Err(NodeRewardsError::InvalidConfig {
                reason: format!(
                    "reward_per_second {} over a {}s window overflows",
                    self.reward_per_second, self.max_reward_time_window
                ),
            });
        }
        Ok(())
    }

    /// Reward for a fully elapsed window, if representable
    pub fn max_batch_reward(&self) -> Option<Amount> {
        self.reward_per_second
            .checked_mul(Amount::from(self.max_reward_time_window))
    }

    /// Same window, different rate
    pub fn with_reward_per_second(&self, reward_per_second: Amount) -> NodeRewardsResult<Self> {
        Self::new(reward_per_second, self.max_reward_time_window)
    }
}

/// Result of a successful finalization
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeReceipt {
    pub batch_number: BatchNumber,
    pub reward_per_node: Amount,
    pub finalized_at: Timestamp,
    pub attestations: u64,
    pub breakdown: RewardBreakdown,
}

/// Read-only view of a batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub batch_number: BatchNumber,
    /// Attesting node keys, ascending
    pub attested_nodes: Vec<NodeKeyId>,
    pub finalized_at: Option<Timestamp>,
    pub reward_per_node: Option<Amount>,
}

impl BatchSummary {
    pub fn is_finalized(&self) -> bool {
        self.finalized_at.is_some()
    }

    pub fn attestation_count(&self) -> u64 {
        self.attested_nodes.len() as u64
    }
}
