//! Reward accrual
//!
//! Pure computation of what each attester of a batch earns at finalization.
//!
//! ```text
//! elapsed         = current - previous            (0 if the clock went back)
//! rewarded_window = min(elapsed, max_reward_time_window)
//! total_reward    = reward_per_second * rewarded_window      (in U256)
//! reward_per_node = total_reward / attestations              (truncating)
//! undistributed   = total_reward - reward_per_node * attestations
//! ```

use crate::types::RewardConfig;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::{Amount, Timestamp};
use thiserror::Error;

/// How a batch reward was derived
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    /// Seconds since the previous confirmed timestamp
    pub elapsed: u64,
    /// Seconds actually rewarded after the window cap
    pub rewarded_window: u64,
    pub total_reward: Amount,
    pub attestations: u64,
    pub reward_per_node: Amount,
    /// Truncation remainder, never paid out
    pub undistributed: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccrualError {
    #[error("cannot split a reward across zero attestations")]
    NoAttestations,
    #[error("reward does not fit in the amount type")]
    Overflow,
}

/// Compute the reward split for a batch.
pub fn compute_reward(
    previous_confirmed: Timestamp,
    current: Timestamp,
    attestations: u64,
    config: &RewardConfig,
) -> Result<RewardBreakdown, AccrualError> {
    if attestations == 0 {
        return Err(AccrualError::NoAttestations);
    }

    let elapsed = current.saturating_sub(previous_confirmed);
    let rewarded_window = elapsed.min(config.max_reward_time_window);

    let total = U256::from(config.reward_per_second) * U256::from(rewarded_window);
    let count = U256::from(attestations);
    let per_node = total / count;
    let undistributed = total - per_node * count;

    Ok(RewardBreakdown {
        elapsed,
        rewarded_window,
        total_reward: to_amount(total)?,
        attestations,
        reward_per_node: to_amount(per_node)?,
        undistributed: to_amount(undistributed)?,
    })
}

fn to_amount(value: U256) -> Result<Amount, AccrualError> {
    if value > U256::from(Amount::MAX) {
        return Err(AccrualError::Overflow);
    }
    Ok(value.as_u128())
}
