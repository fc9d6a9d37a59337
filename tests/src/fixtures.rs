//! Shared deployment for integration and exploit tests.
//!
//! 3.1709791983764584 tokens per second (100M a year), a 60 minute window,
//! 100M tokens in the pool, one key for `NODE_OWNER1` and keys #2 and #3 for
//! `NODE_OWNER2`.

use nr_03_node_rewards::adapters::ManualClock;
use nr_03_node_rewards::{NodeRewardsApi, RewardConfig};
use rewards_runtime::container::{RewardsContainer, RuntimeConfig};
use rewards_runtime::genesis::{GenesisBuilder, GenesisConfig, NodeKeyAllocation};
use shared_types::{format_address, Address, Amount, NodeKeyId, Timestamp};
use std::sync::Arc;

pub const OWNER: Address = [0xA0; 20];
pub const POOL: Address = [0xEE; 20];
pub const NODE_OWNER1: Address = [0x01; 20];
pub const NODE_OWNER2: Address = [0x02; 20];
/// Holds a key but is never KYC approved
pub const NODE_OWNER3: Address = [0x03; 20];
pub const OUTSIDER: Address = [0x66; 20];

pub const KEY1: NodeKeyId = NodeKeyId(1);
pub const KEY2: NodeKeyId = NodeKeyId(2);
pub const KEY3: NodeKeyId = NodeKeyId(3);
pub const KEY4: NodeKeyId = NodeKeyId(4);

pub const REWARD_PER_SECOND: Amount = 3_170_979_198_376_458_400;
pub const MAX_REWARD_TIME_WINDOW: u64 = 60 * 60;
pub const ETHER: Amount = 1_000_000_000_000_000_000;
pub const POOL_FUNDING: Amount = 100_000_000 * ETHER;

pub const GENESIS_TIME: Timestamp = 1_700_000_000;
pub const SECONDS_TO_FINALIZE: u64 = 12 * 60 * 60;

pub struct Deployment {
    pub clock: Arc<ManualClock>,
    pub container: RewardsContainer<ManualClock>,
    pub api: Arc<dyn NodeRewardsApi>,
}

impl Deployment {
    pub fn new() -> Self {
        Self::with_pool_funding(POOL_FUNDING)
    }

    pub fn with_pool_funding(pool_funding: Amount) -> Self {
        let config = RuntimeConfig {
            rewards: RewardConfig {
                reward_per_second: REWARD_PER_SECOND,
                max_reward_time_window: MAX_REWARD_TIME_WINDOW,
            },
            ..RuntimeConfig::default()
        };
        let genesis = GenesisConfig {
            admin: format_address(&OWNER),
            operator: format_address(&OWNER),
            pool: format_address(&POOL),
            pool_funding: Some(pool_funding),
            kyc_controllers: Vec::new(),
            rewards_controllers: vec![format_address(&OWNER)],
            node_keys: vec![
                allocation(NODE_OWNER1, 1),
                allocation(NODE_OWNER2, 2),
                allocation(NODE_OWNER3, 1),
            ],
            kyc_wallets: vec![format_address(&NODE_OWNER1), format_address(&NODE_OWNER2)],
        };

        let clock = Arc::new(ManualClock::new(GENESIS_TIME));
        let container = RewardsContainer::new(
            config,
            genesis.accounts().expect("fixture accounts"),
            Arc::clone(&clock),
        )
        .expect("fixture container");
        GenesisBuilder::new(genesis)
            .apply(&container)
            .expect("fixture genesis");
        let api = container.api();
        // Start every test with an empty event queue
        api.take_events();

        Self {
            clock,
            container,
            api,
        }
    }

    /// Batch the next attestation round should target
    pub fn next_batch(&self) -> u64 {
        self.api.latest_finalized_batch_number() + 1
    }

    pub fn fast_forward_to_finalize(&self) {
        self.clock.advance(SECONDS_TO_FINALIZE);
    }

    /// Standard round: key #1 and keys #2, #3 attest, then the batch is finalized.
    pub fn attest_all_and_finalize(&self) -> u64 {
        let batch = self.next_batch();
        self.api.attest(batch, KEY1, NODE_OWNER1).expect("attest #1");
        self.api
            .batch_attest(batch, &[KEY2, KEY3], NODE_OWNER2)
            .expect("attest #2, #3");
        self.fast_forward_to_finalize();
        self.api.finalize(batch, OWNER).expect("finalize");
        batch
    }

    pub fn balance_of(&self, account: Address) -> Amount {
        self.container.token.balance_of(account)
    }

    pub fn pool_balance(&self) -> Amount {
        self.balance_of(POOL)
    }

    pub fn top_up_pool(&self, amount: Amount) {
        self.container
            .token
            .mint(OWNER, POOL, amount)
            .expect("top up pool");
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self::new()
    }
}

fn allocation(owner: Address, amount: u64) -> NodeKeyAllocation {
    NodeKeyAllocation {
        owner: format_address(&owner),
        amount,
    }
}
