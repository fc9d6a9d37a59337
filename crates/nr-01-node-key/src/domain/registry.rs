//! Node key registry entity
//!
//! Keys are minted sequentially starting at id 1 and are bound to their owner
//! for life: there is no transfer path.

use crate::error::{NodeKeyError, NodeKeyResult};
use serde::{Deserialize, Serialize};
use shared_types::{Address, NodeKeyId, ZERO_ADDRESS};
use std::collections::{BTreeMap, HashMap};

/// First id handed out by the registry.
pub const FIRST_NODE_KEY_ID: u64 = 1;

/// Most keys a single mint may create.
pub const MAX_MINT_AMOUNT: u64 = 100_000;

/// Ownership table for node keys.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeKeyRegistry {
    /// Collection name
    name: String,
    /// Collection symbol
    symbol: String,
    /// Owner of every minted key
    owners: BTreeMap<NodeKeyId, Address>,
    /// Number of keys held per account
    #[serde(with = "shared_types::serde_helpers::address_map")]
    balances: HashMap<Address, u64>,
    /// Id assigned to the next minted key
    next_id: u64,
}

impl NodeKeyRegistry {
    /// Create an empty registry
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            owners: BTreeMap::new(),
            balances: HashMap::new(),
            next_id: FIRST_NODE_KEY_ID,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Mint `amount` consecutive keys to `to`.
    ///
    /// Returns the ids of the newly minted keys in ascending order.
    pub fn mint(&mut self, to: Address, amount: u64) -> NodeKeyResult<Vec<NodeKeyId>> {
        if to == ZERO_ADDRESS {
            return Err(NodeKeyError::ZeroAddress);
        }
        if amount == 0 {
            return Err(NodeKeyError::ZeroAmount);
        }
        if amount > MAX_MINT_AMOUNT {
            return Err(NodeKeyError::MintTooLarge {
                requested: amount,
                max: MAX_MINT_AMOUNT,
            });
        }
        let end = self
            .next_id
            .checked_add(amount)
            .ok_or(NodeKeyError::SupplyExhausted)?;
        let balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(NodeKeyError::SupplyExhausted)?;

        let minted: Vec<NodeKeyId> = (self.next_id..end).map(NodeKeyId).collect();
        for id in &minted {
            self.owners.insert(*id, to);
        }
        self.balances.insert(to, balance);
        self.next_id = end;

        Ok(minted)
    }

    /// Owner of a minted key
    pub fn owner_of(&self, node_key: NodeKeyId) -> NodeKeyResult<Address> {
        self.owners
            .get(&node_key)
            .copied()
            .ok_or(NodeKeyError::UnknownKey { node_key })
    }

    /// Number of keys held by an account
    pub fn balance_of(&self, owner: &Address) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    /// Total number of keys minted so far
    pub fn total_supply(&self) -> u64 {
        self.owners.len() as u64
    }

    /// All keys held by an account, ascending
    pub fn keys_of(&self, owner: &Address) -> Vec<NodeKeyId> {
        self.owners
            .iter()
            .filter(|(_, holder)| *holder == owner)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Transfers are rejected unconditionally.
    pub fn transfer(
        &mut self,
        _from: Address,
        _to: Address,
        node_key: NodeKeyId,
    ) -> NodeKeyResult<()> {
        // Unknown keys are reported as such so callers can tell the two apart
        self.owner_of(node_key)?;
        Err(NodeKeyError::NonTransferable)
    }
}
