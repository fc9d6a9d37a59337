//! # Rewards Container
//!
//! Owns every component of a running node rewards deployment and wires the
//! engine's ports to the in-process node key registry and reward token.

pub mod config;

pub use config::{ConfigError, RuntimeConfig, SchedulerConfig, DEFAULT_POOL_FUNDING};

use nr_01_node_key::NodeKeyService;
use nr_02_reward_token::RewardTokenService;
use nr_03_node_rewards::adapters::{NodeKeyIdentityAdapter, TokenPoolCustody};
use nr_03_node_rewards::{Clock, NodeRewardsApi, NodeRewardsResult, NodeRewardsService};
use shared_bus::InMemoryEventBus;
use shared_types::{format_address, Address};
use std::sync::Arc;
use tracing::info;

/// Engine wired to the in-process collaborators.
pub type RewardsEngine<K> =
    NodeRewardsService<NodeKeyIdentityAdapter<NodeKeyService>, TokenPoolCustody, K>;

/// Well-known accounts of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemAccounts {
    /// Admin of the node key registry, the token and the engine.
    pub admin: Address,
    /// Finalizer used by the scheduler.
    pub operator: Address,
    /// Token account rewards are paid from.
    pub pool: Address,
}

pub struct RewardsContainer<K: Clock + 'static> {
    pub config: RuntimeConfig,
    pub accounts: SystemAccounts,
    pub node_keys: Arc<NodeKeyService>,
    pub token: RewardTokenService,
    pub engine: Arc<RewardsEngine<K>>,
    pub event_bus: Arc<InMemoryEventBus>,
}

impl<K: Clock + 'static> RewardsContainer<K> {
    pub fn new(
        config: RuntimeConfig,
        accounts: SystemAccounts,
        clock: Arc<K>,
    ) -> NodeRewardsResult<Self> {
        let node_keys = Arc::new(NodeKeyService::new(accounts.admin));
        let token = RewardTokenService::new(accounts.admin);

        let engine = NodeRewardsService::new(
            config.rewards,
            accounts.admin,
            Arc::new(NodeKeyIdentityAdapter::new(Arc::clone(&node_keys))),
            Arc::new(TokenPoolCustody::new(token.clone(), accounts.pool)),
            clock,
        )?;
        let event_bus = Arc::new(InMemoryEventBus::with_capacity(config.event_bus_capacity));

        info!(
            admin = %format_address(&accounts.admin),
            operator = %format_address(&accounts.operator),
            pool = %format_address(&accounts.pool),
            "Rewards container assembled"
        );

        Ok(Self {
            config,
            accounts,
            node_keys,
            token,
            engine: Arc::new(engine),
            event_bus,
        })
    }

    /// Engine behind its inbound port
    pub fn api(&self) -> Arc<dyn NodeRewardsApi> {
        self.engine.clone()
    }
}
