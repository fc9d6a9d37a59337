//! # Genesis Builder
//!
//! Loads a genesis description and applies it to a fresh container.

use crate::container::{RewardsContainer, SystemAccounts};
use nr_01_node_key::NodeKeyApi;
use nr_03_node_rewards::{Clock, NodeRewardsApi};
use serde::{Deserialize, Serialize};
use shared_types::{parse_address, Address, Amount, NodeKeyId, Role};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Genesis creation errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// Genesis file could not be read.
    #[error("Failed to read genesis file: {0}")]
    Io(#[from] std::io::Error),

    /// Genesis file is not valid JSON for [`GenesisConfig`].
    #[error("Failed to parse genesis file: {0}")]
    Parse(#[from] serde_json::Error),

    /// An address field is not 20 bytes of hex.
    #[error("Invalid address for {field}: {value}")]
    InvalidAddress { field: String, value: String },

    /// Invalid genesis configuration.
    #[error("Invalid genesis configuration: {0}")]
    InvalidConfig(String),

    /// A bootstrap operation was rejected.
    #[error("Genesis bootstrap failed: {0}")]
    Bootstrap(String),
}

/// Node keys minted to one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeKeyAllocation {
    pub owner: String,
    pub amount: u64,
}

/// Genesis description. Addresses are `0x`-prefixed hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    pub admin: String,
    /// Finalizer account driven by the scheduler.
    pub operator: String,
    /// Reward pool account.
    pub pool: String,
    /// Pool funding. Falls back to the runtime configuration when absent.
    #[serde(default)]
    pub pool_funding: Option<Amount>,
    /// Extra KYC controllers besides the admin.
    #[serde(default)]
    pub kyc_controllers: Vec<String>,
    /// Accounts allowed to set the reward rate.
    #[serde(default)]
    pub rewards_controllers: Vec<String>,
    #[serde(default)]
    pub node_keys: Vec<NodeKeyAllocation>,
    #[serde(default)]
    pub kyc_wallets: Vec<String>,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self::devnet()
    }
}

impl GenesisConfig {
    /// Local devnet: three operators holding one, two and one keys, all KYC'd.
    pub fn devnet() -> Self {
        let owners = [hex_account(0x01), hex_account(0x02), hex_account(0x03)];
        Self {
            admin: hex_account(0xAA),
            operator: hex_account(0x0F),
            pool: hex_account(0xEE),
            pool_funding: None,
            kyc_controllers: Vec::new(),
            rewards_controllers: vec![hex_account(0xAA)],
            node_keys: vec![
                NodeKeyAllocation {
                    owner: owners[0].clone(),
                    amount: 1,
                },
                NodeKeyAllocation {
                    owner: owners[1].clone(),
                    amount: 2,
                },
                NodeKeyAllocation {
                    owner: owners[2].clone(),
                    amount: 1,
                },
            ],
            kyc_wallets: owners.to_vec(),
        }
    }

    /// Load a genesis file.
    pub fn load(path: &Path) -> Result<Self, GenesisError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        info!(path = %path.display(), "Genesis file loaded");
        Ok(config)
    }

    /// System accounts named by this genesis.
    pub fn accounts(&self) -> Result<SystemAccounts, GenesisError> {
        Ok(SystemAccounts {
            admin: address("admin", &self.admin)?,
            operator: address("operator", &self.operator)?,
            pool: address("pool", &self.pool)?,
        })
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), GenesisError> {
        let accounts = self.accounts()?;
        if accounts.pool == accounts.admin {
            return Err(GenesisError::InvalidConfig(
                "pool must not be the admin account".to_string(),
            ));
        }
        for allocation in &self.node_keys {
            address("node_keys.owner", &allocation.owner)?;
            if allocation.amount == 0 {
                return Err(GenesisError::InvalidConfig(format!(
                    "zero node key allocation for {}",
                    allocation.owner
                )));
            }
        }
        for account in self.kyc_wallets.iter() {
            address("kyc_wallets", account)?;
        }
        for account in self.kyc_controllers.iter() {
            address("kyc_controllers", account)?;
        }
        for account in self.rewards_controllers.iter() {
            address("rewards_controllers", account)?;
        }
        Ok(())
    }
}

/// What a genesis run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisSummary {
    pub minted: Vec<(Address, Vec<NodeKeyId>)>,
    pub pool_funding: Amount,
    pub kyc_wallets: usize,
}

impl GenesisSummary {
    pub fn total_keys(&self) -> usize {
        self.minted.iter().map(|(_, keys)| keys.len()).sum()
    }
}

/// Applies a [`GenesisConfig`] to a freshly built container.
pub struct GenesisBuilder {
    config: GenesisConfig,
}

impl GenesisBuilder {
    pub fn new(config: GenesisConfig) -> Self {
        Self { config }
    }

    pub fn apply<K: Clock + 'static>(
        &self,
        container: &RewardsContainer<K>,
    ) -> Result<GenesisSummary, GenesisError> {
        self.config.validate()?;
        let SystemAccounts {
            admin,
            operator,
            pool,
        } = container.accounts;
        let engine = container.api();

        let mut minted = Vec::with_capacity(self.config.node_keys.len());
        for allocation in &self.config.node_keys {
            let owner = address("node_keys.owner", &allocation.owner)?;
            let keys = container
                .node_keys
                .mint(admin, owner, allocation.amount)
                .map_err(bootstrap)?;
            minted.push((owner, keys));
        }

        let pool_funding = self
            .config
            .pool_funding
            .unwrap_or(container.config.pool_funding);
        if pool_funding > 0 {
            container
                .token
                .mint(admin, pool, pool_funding)
                .map_err(bootstrap)?;
        }

        engine
            .grant_role(Role::Finalizer, operator, admin)
            .map_err(bootstrap)?;
        engine
            .grant_role(Role::KycController, admin, admin)
            .map_err(bootstrap)?;
        for account in &self.config.kyc_controllers {
            let account = address("kyc_controllers", account)?;
            engine
                .grant_role(Role::KycController, account, admin)
                .map_err(bootstrap)?;
        }
        for account in &self.config.rewards_controllers {
            let account = address("rewards_controllers", account)?;
            engine
                .grant_role(Role::RewardsController, account, admin)
                .map_err(bootstrap)?;
        }

        let kyc_wallets = self
            .config
            .kyc_wallets
            .iter()
            .map(|account| address("kyc_wallets", account))
            .collect::<Result<Vec<_>, _>>()?;
        engine
            .add_kyc_wallets(&kyc_wallets, admin)
            .map_err(bootstrap)?;

        let summary = GenesisSummary {
            minted,
            pool_funding,
            kyc_wallets: kyc_wallets.len(),
        };
        info!(
            node_keys = summary.total_keys(),
            pool_funding,
            kyc_wallets = summary.kyc_wallets,
            "Genesis applied"
        );
        Ok(summary)
    }
}

fn address(field: &str, value: &str) -> Result<Address, GenesisError> {
    parse_address(value).ok_or_else(|| GenesisError::InvalidAddress {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn bootstrap<E: std::fmt::Display>(err: E) -> GenesisError {
    GenesisError::Bootstrap(err.to_string())
}

fn hex_account(byte: u8) -> String {
    shared_types::format_address(&[byte; 20])
}
