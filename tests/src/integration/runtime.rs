//! # Runtime Flow
//!
//! The full process: genesis, scheduled finalization and event relay to the
//! bus, driven with paused tokio time.

#[cfg(test)]
mod tests {
    use nr_03_node_rewards::adapters::ManualClock;
    use rewards_runtime::container::{RuntimeConfig, SchedulerConfig};
    use rewards_runtime::genesis::GenesisConfig;
    use rewards_runtime::RewardsRuntime;
    use shared_bus::{EventFilter, EventTopic, RewardsEvent};
    use shared_types::NodeKeyId;
    use std::sync::Arc;
    use std::time::Duration;

    const NODE_OWNER1: [u8; 20] = [0x01; 20];
    const NODE_OWNER2: [u8; 20] = [0x02; 20];

    fn config() -> RuntimeConfig {
        RuntimeConfig {
            scheduler: SchedulerConfig {
                finalize_interval_secs: 60,
                relay_interval_ms: 100,
                shutdown_grace_secs: 1,
            },
            ..RuntimeConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_round_reaches_subscribers() {
        let clock = Arc::new(ManualClock::new(1_000));
        let mut runtime =
            RewardsRuntime::new(config(), GenesisConfig::devnet(), Arc::clone(&clock)).unwrap();
        let container = runtime.container();
        let mut claims = container
            .event_bus
            .subscribe(EventFilter::for_accounts(vec![NODE_OWNER2]));
        runtime.start();

        let api = container.api();
        api.attest(1, NodeKeyId(1), NODE_OWNER1).unwrap();
        api.batch_attest(1, &[NodeKeyId(2), NodeKeyId(3)], NODE_OWNER2)
            .unwrap();
        clock.advance(900);

        // Scheduler fires after one interval
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(api.latest_finalized_batch_number(), 1);
        let reward = api.reward_per_node_of_batch(1).unwrap();
        assert_eq!(reward, 900 * api.reward_config().reward_per_second / 3);

        let paid = api
            .batch_claim_reward(&[NodeKeyId(2), NodeKeyId(3)], 1, NODE_OWNER2)
            .unwrap();
        assert_eq!(paid, reward * 2);

        runtime.shutdown().await;

        let events = claims.drain();
        let claimed: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, RewardsEvent::RewardClaimed { .. }))
            .collect();
        assert_eq!(claimed.len(), 2);
        assert!(events.iter().any(|e| matches!(
            e,
            RewardsEvent::KycWalletAdded { account } if *account == NODE_OWNER2
        )));
        assert_eq!(container.event_bus.published_on(EventTopic::Finalization), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_scheduler_finalizes_nothing() {
        let clock = Arc::new(ManualClock::new(1_000));
        let mut runtime =
            RewardsRuntime::new(config(), GenesisConfig::devnet(), Arc::clone(&clock)).unwrap();
        runtime.start();

        tokio::time::sleep(Duration::from_secs(600)).await;
        let api = runtime.container().api();
        assert_eq!(api.latest_finalized_batch_number(), 0);
        assert_eq!(api.latest_confirmed_timestamp(), 1_000);

        runtime.shutdown().await;
    }
}
