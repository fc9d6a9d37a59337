//! # Core Domain Entities
//!
//! Identifiers and value types shared by every crate in the workspace.
//!
//! ## Clusters
//!
//! - **Accounts**: `Address`
//! - **Identity**: `NodeKeyId`
//! - **Rewards**: `BatchNumber`, `Amount`, `Timestamp`
//! - **Access**: `Role`

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for widened reward arithmetic
pub use primitive_types::U256;

// =============================================================================
// CLUSTER A: ACCOUNTS
// =============================================================================

/// A 20-byte Ethereum-style account address.
pub type Address = [u8; 20];

/// The zero address. Never a valid owner or recipient.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Render an address as a `0x`-prefixed lowercase hex string.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// Parse a `0x`-prefixed (or bare) 40-character hex string into an address.
///
/// Returns `None` if the string is not exactly 20 bytes of hex.
pub fn parse_address(value: &str) -> Option<Address> {
    let trimmed = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(trimmed).ok()?;
    bytes.try_into().ok()
}

// =============================================================================
// CLUSTER B: IDENTITY
// =============================================================================

/// Identifier of a node key (non-transferable node identity).
///
/// Ids are minted sequentially starting at 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct NodeKeyId(pub u64);

impl NodeKeyId {
    /// Raw numeric value of the id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeKeyId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// CLUSTER C: REWARDS
// =============================================================================

/// Number of an attestation batch. Batches start at 1; 0 means "none".
pub type BatchNumber = u64;

/// Token amount in base units.
pub type Amount = u128;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

// =============================================================================
// CLUSTER D: ACCESS
// =============================================================================

/// Administrative roles recognised by the node rewards engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Grants and revokes every other role.
    Admin,
    /// Adds and removes KYC wallets on the allow-list.
    KycController,
    /// Adjusts the reward emission rate.
    RewardsController,
    /// Closes batches (the referee operator).
    Finalizer,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::KycController,
        Role::RewardsController,
        Role::Finalizer,
    ];

    /// Stable constant-style name, matching the on-chain role identifiers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "DEFAULT_ADMIN_ROLE",
            Role::KycController => "KYC_CONTROLLER_ROLE",
            Role::RewardsController => "REWARDS_CONTROLLER_ROLE",
            Role::Finalizer => "FINALIZER_ROLE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
