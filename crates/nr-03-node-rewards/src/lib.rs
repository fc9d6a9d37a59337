//! # nr-03-node-rewards
//!
//! Attestation, batch finalization and reward accounting for node key holders.
//!
//! ## Overview
//!
//! - **Attestation**: node key owners attest to open batches
//! - **Finalization**: the finalizer closes batches in increasing order; the
//!   reward for the elapsed time (capped by a window) is split evenly across
//!   the batch's attesters
//! - **Claims**: KYC-approved owners claim each (node key, batch) reward once
//!
//! ## Architecture
//!
//! ```text
//! Node Key (1) ──owner_of──→ Node Rewards (3) ──credit──→ Reward Token (2)
//!                                  │
//!                                  └── RewardsEvent ──→ shared-bus
//! ```
//!
//! ## Batch Lifecycle
//!
//! ```text
//! [UNSEEN] ──attest──→ [OPEN] ──finalize──→ [FINALIZED] ──claim──→ payouts
//!                        ↑  │
//!                        └──┘ attest
//! ```
//!
//! Batch numbers at or below the latest finalized batch are closed for
//! attestation whether or not they were ever seen.
//!
//! ## Example
//!
//! ```rust,ignore
//! use nr_03_node_rewards::{NodeRewardsApi, NodeRewardsService, RewardConfig};
//!
//! let config = RewardConfig::default();
//! let rewards = NodeRewardsService::new(config, admin, identity, custody, clock)?;
//! rewards.grant_role(Role::Finalizer, operator, admin)?;
//!
//! rewards.attest(1, NodeKeyId(1), owner)?;
//! let receipt = rewards.finalize_next(operator)?;
//! let paid = rewards.claim_reward(NodeKeyId(1), receipt.batch_number, owner)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;
pub mod state;
pub mod types;

pub use domain::{
    compute_reward, AccessControl, Authorization, BatchLedger, Capability, ClaimLedger,
    FinalizationCursor, RewardBreakdown,
};
pub use error::{Denial, ErrorKind, NodeRewardsError, NodeRewardsResult};
pub use ports::inbound::NodeRewardsApi;
pub use ports::outbound::{Clock, CustodyError, IdentityError, IdentityRegistry, RewardCustody};
pub use service::NodeRewardsService;
pub use state::{NodeRewardsState, MAX_PENDING_EVENTS};
pub use types::{
    BatchSummary, FinalizeReceipt, RewardConfig, DEFAULT_MAX_REWARD_TIME_WINDOW,
    DEFAULT_REWARD_PER_SECOND,
};
