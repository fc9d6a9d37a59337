//! Node Key Service
//!
//! Thread-safe wrapper around [`NodeKeyRegistry`] that enforces the admin
//! gate on minting.

use crate::domain::NodeKeyRegistry;
use crate::error::{NodeKeyError, NodeKeyResult};
use crate::ports::inbound::NodeKeyApi;
use parking_lot::RwLock;
use shared_types::{format_address, Address, NodeKeyId};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default collection name
pub const DEFAULT_NAME: &str = "Key";
/// Default collection symbol
pub const DEFAULT_SYMBOL: &str = "KEY";

/// Node key registry service
pub struct NodeKeyService {
    /// Account allowed to mint
    admin: Address,
    registry: Arc<RwLock<NodeKeyRegistry>>,
}

impl NodeKeyService {
    /// Create a registry with the default name and symbol
    pub fn new(admin: Address) -> Self {
        Self::with_registry(admin, NodeKeyRegistry::new(DEFAULT_NAME, DEFAULT_SYMBOL))
    }

    /// Wrap an existing registry
    pub fn with_registry(admin: Address, registry: NodeKeyRegistry) -> Self {
        Self {
            admin,
            registry: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn name(&self) -> String {
        self.registry.read().name().to_string()
    }

    pub fn symbol(&self) -> String {
        self.registry.read().symbol().to_string()
    }

    /// Keys held by an account, ascending
    pub fn keys_of(&self, owner: Address) -> Vec<NodeKeyId> {
        self.registry.read().keys_of(&owner)
    }

    /// Copy of the current registry
    pub fn snapshot(&self) -> NodeKeyRegistry {
        self.registry.read().clone()
    }
}

impl NodeKeyApi for NodeKeyService {
    fn mint(&self, caller: Address, to: Address, amount: u64) -> NodeKeyResult<Vec<NodeKeyId>> {
        if caller != self.admin {
            warn!(caller = %format_address(&caller), "Rejected node key mint from non-admin");
            return Err(NodeKeyError::NotAuthorized);
        }

        let minted = self.registry.write().mint(to, amount)?;

        info!(
            to = %format_address(&to),
            amount,
            first = ?minted.first(),
            "Minted node keys"
        );
        Ok(minted)
    }

    fn owner_of(&self, node_key: NodeKeyId) -> NodeKeyResult<Address> {
        self.registry.read().owner_of(node_key)
    }

    fn balance_of(&self, owner: Address) -> u64 {
        self.registry.read().balance_of(&owner)
    }

    fn total_supply(&self) -> u64 {
        self.registry.read().total_supply()
    }

    fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        node_key: NodeKeyId,
    ) -> NodeKeyResult<()> {
        debug!(
            caller = %format_address(&caller),
            %node_key,
            "Node key transfer attempted"
        );
        self.registry.write().transfer(from, to, node_key)
    }
}
