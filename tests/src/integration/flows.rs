//! # Reward Flows
//!
//! Attest, finalize and claim across the full stack:
//!
//! 1. **Attestation**: node key owners attest to the next open batch
//! 2. **Finalization**: the operator closes the batch, fixing the per-node reward
//! 3. **Claim**: each owner pulls its reward from the pool
//!
//! Reward per node is `rate * min(elapsed, window) / attestations`.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use nr_03_node_rewards::NodeRewardsError;
    use shared_bus::RewardsEvent;
    use shared_types::Role;

    // =========================================================================
    // CLAIMS
    // =========================================================================

    #[test]
    fn test_claim_increases_balance() {
        let d = Deployment::new();
        let batch = d.next_batch();
        d.api.attest(batch, KEY1, NODE_OWNER1).unwrap();
        d.fast_forward_to_finalize();
        d.api.finalize(batch, OWNER).unwrap();

        let before = d.balance_of(NODE_OWNER1);
        d.api.claim_reward(KEY1, batch, NODE_OWNER1).unwrap();
        let after = d.balance_of(NODE_OWNER1);

        assert!(after > before);
        assert!(d.api.is_claimed(KEY1, batch));
    }

    #[test]
    fn test_second_node_key_doubles_reward() {
        let d = Deployment::new();
        let batch = d.attest_all_and_finalize();

        let received1 = d.api.claim_reward(KEY1, batch, NODE_OWNER1).unwrap();
        let received2 = d
            .api
            .batch_claim_reward(&[KEY2, KEY3], batch, NODE_OWNER2)
            .unwrap();

        assert!(received2 > received1);
        assert_eq!(received2, received1 * 2);
        assert_eq!(d.balance_of(NODE_OWNER2), d.balance_of(NODE_OWNER1) * 2);
    }

    #[test]
    fn test_reward_calculation() {
        let d = Deployment::new();
        let previous = d.api.latest_confirmed_timestamp();
        let batch = d.attest_all_and_finalize();
        let current = d.api.latest_confirmed_timestamp();

        let window = (current - previous).min(MAX_REWARD_TIME_WINDOW);
        let expected = REWARD_PER_SECOND * u128::from(window) / 3;

        assert_eq!(current, GENESIS_TIME + SECONDS_TO_FINALIZE);
        assert_eq!(d.api.reward_per_node_of_batch(batch), Some(expected));
        // 12 hours elapsed, capped at the one hour window
        assert_eq!(window, MAX_REWARD_TIME_WINDOW);
    }

    #[test]
    fn test_short_round_is_not_capped() {
        let d = Deployment::new();
        let batch = d.next_batch();
        d.api.attest(batch, KEY1, NODE_OWNER1).unwrap();
        d.clock.advance(600);
        let receipt = d.api.finalize(batch, OWNER).unwrap();

        assert_eq!(receipt.reward_per_node, REWARD_PER_SECOND * 600);
        assert_eq!(receipt.breakdown.undistributed, 0);
    }

    #[test]
    fn test_pool_pays_exactly_what_was_claimed() {
        let d = Deployment::new();
        let batch = d.attest_all_and_finalize();
        let reward = d.api.reward_per_node_of_batch(batch).unwrap();

        d.api.claim_reward(KEY1, batch, NODE_OWNER1).unwrap();
        d.api
            .batch_claim_reward(&[KEY2, KEY3], batch, NODE_OWNER2)
            .unwrap();

        assert_eq!(d.pool_balance(), POOL_FUNDING - reward * 3);
        assert_eq!(d.api.total_rewards_paid(), reward * 3);
        // Rounding dust is accounted for, not paid
        let total = REWARD_PER_SECOND * u128::from(MAX_REWARD_TIME_WINDOW);
        assert_eq!(d.api.undistributed_rewards(), total - reward * 3);
    }

    // =========================================================================
    // MULTI-BATCH
    // =========================================================================

    #[test]
    fn test_consecutive_batches_reward_independently() {
        let d = Deployment::new();
        let first = d.attest_all_and_finalize();

        // Only key #1 shows up for the second batch
        let second = d.next_batch();
        d.api.attest(second, KEY1, NODE_OWNER1).unwrap();
        d.clock.advance(1_800);
        d.api.finalize(second, OWNER).unwrap();

        let first_reward = d.api.reward_per_node_of_batch(first).unwrap();
        let second_reward = d.api.reward_per_node_of_batch(second).unwrap();
        assert_eq!(second_reward, REWARD_PER_SECOND * 1_800);
        assert_ne!(first_reward, second_reward);

        let paid = d
            .api
            .claim_reward(KEY1, first, NODE_OWNER1)
            .unwrap()
            + d.api.claim_reward(KEY1, second, NODE_OWNER1).unwrap();
        assert_eq!(paid, first_reward + second_reward);

        assert_eq!(
            d.api.claim_reward(KEY2, second, NODE_OWNER2),
            Err(NodeRewardsError::NotAttested {
                node_key: KEY2,
                batch_number: second
            })
        );
    }

    #[test]
    fn test_finalize_next_follows_cursor() {
        let d = Deployment::new();
        d.api.attest(1, KEY1, NODE_OWNER1).unwrap();
        d.api.attest(2, KEY1, NODE_OWNER1).unwrap();
        d.clock.advance(60);

        assert_eq!(d.api.finalize_next(OWNER).unwrap().batch_number, 1);
        d.clock.advance(60);
        assert_eq!(d.api.finalize_next(OWNER).unwrap().batch_number, 2);
        assert_eq!(
            d.api.finalize_next(OWNER),
            Err(NodeRewardsError::EmptyBatch { batch_number: 3 })
        );
    }

    #[test]
    fn test_rate_change_applies_to_next_batch() {
        let d = Deployment::new();
        let first = d.attest_all_and_finalize();
        let before = d.api.reward_per_node_of_batch(first).unwrap();

        d.api.set_reward_per_second(REWARD_PER_SECOND * 2, OWNER).unwrap();
        assert_eq!(d.api.reward_per_node_of_batch(first), Some(before));

        let second = d.attest_all_and_finalize();
        assert_eq!(d.api.reward_per_node_of_batch(second), Some(before * 2));
    }

    // =========================================================================
    // ROLLBACK
    // =========================================================================

    #[test]
    fn test_failed_payout_rolls_back_and_retries() {
        let d = Deployment::with_pool_funding(0);
        let batch = d.attest_all_and_finalize();
        let reward = d.api.reward_per_node_of_batch(batch).unwrap();

        assert_eq!(
            d.api.claim_reward(KEY1, batch, NODE_OWNER1),
            Err(NodeRewardsError::InsufficientPoolBalance {
                available: 0,
                requested: reward
            })
        );
        assert!(!d.api.is_claimed(KEY1, batch));
        assert!(d.api.take_events().is_empty());

        d.top_up_pool(reward);
        assert_eq!(d.api.claim_reward(KEY1, batch, NODE_OWNER1), Ok(reward));
        assert!(d.api.is_claimed(KEY1, batch));
        assert_eq!(d.pool_balance(), 0);
    }

    // =========================================================================
    // KYC
    // =========================================================================

    #[test]
    fn test_kyc_removal_blocks_claim_until_restored() {
        let d = Deployment::new();
        let batch = d.attest_all_and_finalize();

        d.api.remove_kyc_wallets(&[NODE_OWNER1], OWNER).unwrap();
        assert_eq!(
            d.api.claim_reward(KEY1, batch, NODE_OWNER1),
            Err(NodeRewardsError::NotEligible {
                account: NODE_OWNER1
            })
        );

        d.api.add_kyc_wallets(&[NODE_OWNER1], OWNER).unwrap();
        assert!(d.api.claim_reward(KEY1, batch, NODE_OWNER1).is_ok());
    }

    #[test]
    fn test_unapproved_owner_can_still_attest() {
        let d = Deployment::new();
        let batch = d.next_batch();
        d.api.attest(batch, KEY4, NODE_OWNER3).unwrap();
        d.fast_forward_to_finalize();
        d.api.finalize(batch, OWNER).unwrap();

        assert!(matches!(
            d.api.claim_reward(KEY4, batch, NODE_OWNER3),
            Err(NodeRewardsError::NotEligible { .. })
        ));

        d.api.add_kyc_wallets(&[NODE_OWNER3], OWNER).unwrap();
        assert!(d.api.claim_reward(KEY4, batch, NODE_OWNER3).is_ok());
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[test]
    fn test_round_emits_events_in_order() {
        let d = Deployment::new();
        let batch = d.attest_all_and_finalize();
        d.api.claim_reward(KEY1, batch, NODE_OWNER1).unwrap();

        let events = d.api.take_events();
        assert_eq!(events.len(), 5);
        assert!(matches!(
            events[0],
            RewardsEvent::NodeAttested { node_key: KEY1, .. }
        ));
        assert!(matches!(
            events[2],
            RewardsEvent::NodeAttested { node_key: KEY3, owner: NODE_OWNER2, .. }
        ));
        assert!(matches!(
            events[3],
            RewardsEvent::BatchFinalized { attestations: 3, .. }
        ));
        assert!(matches!(
            events[4],
            RewardsEvent::RewardClaimed { account: NODE_OWNER1, .. }
        ));
    }

    #[test]
    fn test_genesis_roles() {
        let d = Deployment::new();
        assert!(d.api.has_role(Role::Admin, OWNER));
        assert!(d.api.has_role(Role::KycController, OWNER));
        assert!(d.api.has_role(Role::Finalizer, OWNER));
        assert!(!d.api.has_role(Role::Finalizer, NODE_OWNER1));
        assert!(d.api.is_kyc_approved(NODE_OWNER2));
        assert!(!d.api.is_kyc_approved(NODE_OWNER3));
    }
}
