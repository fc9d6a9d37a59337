//! Driven Ports (SPI - Outbound Dependencies)

use crate::error::NodeRewardsError;
use shared_types::{Address, Amount, NodeKeyId, Timestamp};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("unknown node key {node_key}")]
    UnknownIdentity { node_key: NodeKeyId },
}

impl From<IdentityError> for NodeRewardsError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::UnknownIdentity { node_key } => {
                NodeRewardsError::UnknownIdentity { node_key }
            }
        }
    }
}

/// Node key ownership lookup
pub trait IdentityRegistry: Send + Sync {
    fn owner_of(&self, node_key: NodeKeyId) -> Result<Address, IdentityError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustodyError {
    #[error("insufficient pool balance: available {available}, requested {requested}")]
    InsufficientPoolBalance { available: Amount, requested: Amount },
    #[error("custody rejected transfer: {reason}")]
    Rejected { reason: String },
}

impl From<CustodyError> for NodeRewardsError {
    fn from(err: CustodyError) -> Self {
        match err {
            CustodyError::InsufficientPoolBalance {
                available,
                requested,
            } => NodeRewardsError::InsufficientPoolBalance {
                available,
                requested,
            },
            CustodyError::Rejected { reason } => NodeRewardsError::CustodyRejected { reason },
        }
    }
}

/// Reward pool that pays claims
///
/// `credit` either moves the full amount or nothing.
pub trait RewardCustody: Send + Sync {
    fn credit(&self, account: Address, amount: Amount) -> Result<(), CustodyError>;

    /// Tokens left to pay rewards from
    fn pool_balance(&self) -> Amount;
}

/// Source of "now" for finalization
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
