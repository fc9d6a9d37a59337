//! Error types for the Node Key registry

use shared_types::NodeKeyId;
use thiserror::Error;

/// Node Key registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeKeyError {
    /// Caller is not the registry admin
    #[error("NOT_AUTHORIZED")]
    NotAuthorized,

    /// Node keys can never change owner once minted
    #[error("NonTransferable")]
    NonTransferable,

    /// Node key was never minted
    #[error("Unknown node key {node_key}")]
    UnknownKey { node_key: NodeKeyId },

    /// Minting to the zero address
    #[error("Cannot mint to the zero address")]
    ZeroAddress,

    /// Minting zero keys
    #[error("Mint amount must be greater than zero")]
    ZeroAmount,

    /// Single mint above the per-call limit
    #[error("Cannot mint {requested} keys at once (max {max})")]
    MintTooLarge { requested: u64, max: u64 },

    /// Key id space is used up
    #[error("Node key id space exhausted")]
    SupplyExhausted,
}

/// Result type for node key operations
pub type NodeKeyResult<T> = Result<T, NodeKeyError>;
