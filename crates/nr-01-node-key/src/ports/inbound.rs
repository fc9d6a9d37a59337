//! Driving Ports (API - Inbound)

use crate::error::NodeKeyResult;
use shared_types::{Address, NodeKeyId};

/// Primary Node Key API
///
/// Minting is restricted to the registry admin. Every other call is open.
pub trait NodeKeyApi: Send + Sync {
    /// Mint `amount` keys to `to`. Caller must be the registry admin.
    fn mint(&self, caller: Address, to: Address, amount: u64) -> NodeKeyResult<Vec<NodeKeyId>>;

    /// Owner of a node key
    fn owner_of(&self, node_key: NodeKeyId) -> NodeKeyResult<Address>;

    /// Number of keys held by an account
    fn balance_of(&self, owner: Address) -> u64;

    /// Total keys minted
    fn total_supply(&self) -> u64;

    /// Attempt to move a key. Always fails with `NonTransferable`.
    fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        node_key: NodeKeyId,
    ) -> NodeKeyResult<()>;
}
