//! Ports module for Node Rewards

pub mod inbound;
pub mod outbound;

pub use inbound::NodeRewardsApi;
pub use outbound::{Clock, CustodyError, IdentityError, IdentityRegistry, RewardCustody};
