//! Error types for the Node Rewards engine
//!
//! Every failure leaves engine state untouched, so any operation that returns
//! an error can be retried as-is.

use shared_types::{format_address, Address, Amount, BatchNumber, NodeKeyId, Role};
use std::fmt;
use thiserror::Error;

/// Why a caller was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Caller lacks the role guarding the operation
    MissingRole(Role),
    /// Caller does not own the node key it acts for
    NotOwner(NodeKeyId),
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::MissingRole(role) => write!(f, "caller is missing {}", role),
            Denial::NotOwner(node_key) => write!(f, "caller does not own node key {}", node_key),
        }
    }
}

/// Coarse classification of [`NodeRewardsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller may not perform the operation
    Authorization,
    /// Operation conflicts with the current ledger state
    State,
    /// Input is malformed or unknown
    Data,
    /// An external resource could not satisfy the request
    Resource,
}

/// Node Rewards engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeRewardsError {
    #[error("Unauthorized: {denial}")]
    Unauthorized { denial: Denial },

    /// Batch is closed for attestations or was already finalized
    #[error("Batch {batch_number} already finalized")]
    AlreadyFinalized { batch_number: BatchNumber },

    #[error("Reward for node key {node_key} in batch {batch_number} already claimed")]
    AlreadyClaimed {
        node_key: NodeKeyId,
        batch_number: BatchNumber,
    },

    #[error("Batch {batch_number} is not finalized")]
    NotFinalized { batch_number: BatchNumber },

    /// Finalization must move strictly forward
    #[error("Batch {batch_number} is not after latest finalized batch {latest_finalized}")]
    NotMonotonic {
        batch_number: BatchNumber,
        latest_finalized: BatchNumber,
    },

    #[error("Batch {batch_number} has no attestations")]
    EmptyBatch { batch_number: BatchNumber },

    #[error("Node key {node_key} did not attest to batch {batch_number}")]
    NotAttested {
        node_key: NodeKeyId,
        batch_number: BatchNumber,
    },

    /// Account is not on the KYC allow-list
    #[error("Account {} is not KYC approved", format_address(.account))]
    NotEligible { account: Address },

    #[error("Unknown node key {node_key}")]
    UnknownIdentity { node_key: NodeKeyId },

    #[error("Node key {node_key} already attested to batch {batch_number}")]
    DuplicateAttestation {
        node_key: NodeKeyId,
        batch_number: BatchNumber,
    },

    #[error("Reward amount overflow")]
    RewardOverflow,

    #[error("Invalid reward configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Reward pool cannot cover the payout
    #[error("Insufficient pool balance: available {available}, requested {requested}")]
    InsufficientPoolBalance { available: Amount, requested: Amount },

    /// Custody refused the payout for a reason other than balance
    #[error("Custody rejected payout: {reason}")]
    CustodyRejected { reason: String },
}

impl NodeRewardsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::AlreadyFinalized { .. }
            | Self::AlreadyClaimed { .. }
            | Self::NotFinalized { .. }
            | Self::NotMonotonic { .. }
            | Self::EmptyBatch { .. }
            | Self::NotAttested { .. }
            | Self::NotEligible { .. } => ErrorKind::State,
            Self::UnknownIdentity { .. }
            | Self::DuplicateAttestation { .. }
            | Self::RewardOverflow
            | Self::InvalidConfig { .. } => ErrorKind::Data,
            Self::InsufficientPoolBalance { .. } | Self::CustodyRejected { .. } => {
                ErrorKind::Resource
            }
        }
    }

    /// Short stable label, used for metric labels and structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::AlreadyFinalized { .. } => "already_finalized",
            Self::AlreadyClaimed { .. } => "already_claimed",
            Self::NotFinalized { .. } => "not_finalized",
            Self::NotMonotonic { .. } => "not_monotonic",
            Self::EmptyBatch { .. } => "empty_batch",
            Self::NotAttested { .. } => "not_attested",
            Self::NotEligible { .. } => "not_eligible",
            Self::UnknownIdentity { .. } => "unknown_identity",
            Self::DuplicateAttestation { .. } => "duplicate_attestation",
            Self::RewardOverflow => "reward_overflow",
            Self::InvalidConfig { .. } => "invalid_config",
            Self::InsufficientPoolBalance { .. } => "insufficient_pool_balance",
            Self::CustodyRejected { .. } => "custody_rejected",
        }
    }

    pub(crate) fn missing_role(role: Role) -> Self {
        Self::Unauthorized {
            denial: Denial::MissingRole(role),
        }
    }

    pub(crate) fn not_owner(node_key: NodeKeyId) -> Self {
        Self::Unauthorized {
            denial: Denial::NotOwner(node_key),
        }
    }
}

/// Result type for node rewards operations
pub type NodeRewardsResult<T> = Result<T, NodeRewardsError>;
