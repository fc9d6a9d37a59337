//! Domain module for Node Rewards
//!
//! Plain data structures with no knowledge of ports or locking.

pub mod access;
pub mod accrual;
pub mod allow_list;
pub mod batch;
pub mod claims;

pub use access::{AccessControl, Authorization, Capability};
pub use accrual::{compute_reward, AccrualError, RewardBreakdown};
pub use allow_list::AllowList;
pub use batch::{Batch, BatchLedger, Finalization, FinalizationCursor};
pub use claims::ClaimLedger;
