//! Attacks on reward payout: double claims, replays and partial payouts.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use nr_03_node_rewards::{Denial, NodeRewardsError};

    #[test]
    fn test_double_claim() {
        let d = Deployment::new();
        let batch = d.attest_all_and_finalize();
        let reward = d.api.claim_reward(KEY1, batch, NODE_OWNER1).unwrap();

        assert_eq!(
            d.api.claim_reward(KEY1, batch, NODE_OWNER1),
            Err(NodeRewardsError::AlreadyClaimed {
                node_key: KEY1,
                batch_number: batch
            })
        );
        assert_eq!(d.balance_of(NODE_OWNER1), reward);
    }

    #[test]
    fn test_duplicate_key_in_batch_claim() {
        let d = Deployment::new();
        let batch = d.attest_all_and_finalize();

        assert!(matches!(
            d.api.batch_claim_reward(&[KEY2, KEY2], batch, NODE_OWNER2),
            Err(NodeRewardsError::AlreadyClaimed { node_key: KEY2, .. })
        ));
        assert_eq!(d.balance_of(NODE_OWNER2), 0);
        assert!(!d.api.is_claimed(KEY2, batch));
    }

    #[test]
    fn test_batch_claim_after_single_claim() {
        let d = Deployment::new();
        let batch = d.attest_all_and_finalize();
        let single = d.api.claim_reward(KEY2, batch, NODE_OWNER2).unwrap();

        // Whole batch refused, #3 stays claimable
        assert!(d
            .api
            .batch_claim_reward(&[KEY3, KEY2], batch, NODE_OWNER2)
            .is_err());
        assert!(!d.api.is_claimed(KEY3, batch));
        assert_eq!(d.balance_of(NODE_OWNER2), single);

        assert_eq!(
            d.api.batch_claim_reward(&[KEY3], batch, NODE_OWNER2),
            Ok(single)
        );
    }

    #[test]
    fn test_claim_for_someone_elses_key() {
        let d = Deployment::new();
        let batch = d.attest_all_and_finalize();

        assert_eq!(
            d.api.claim_reward(KEY2, batch, NODE_OWNER1),
            Err(NodeRewardsError::Unauthorized {
                denial: Denial::NotOwner(KEY2)
            })
        );
        assert!(!d.api.is_claimed(KEY2, batch));
        assert_eq!(d.balance_of(NODE_OWNER1), 0);
    }

    #[test]
    fn test_claim_before_finalization() {
        let d = Deployment::new();
        let batch = d.next_batch();
        d.api.attest(batch, KEY1, NODE_OWNER1).unwrap();

        assert_eq!(
            d.api.claim_reward(KEY1, batch, NODE_OWNER1),
            Err(NodeRewardsError::NotFinalized {
                batch_number: batch
            })
        );
    }

    #[test]
    fn test_replay_claim_into_batch_not_attested() {
        let d = Deployment::new();
        let first = d.attest_all_and_finalize();

        // Key #1 sits out the second round
        let second = d.next_batch();
        d.api.batch_attest(second, &[KEY2, KEY3], NODE_OWNER2).unwrap();
        d.fast_forward_to_finalize();
        d.api.finalize(second, OWNER).unwrap();

        d.api.claim_reward(KEY1, first, NODE_OWNER1).unwrap();
        assert_eq!(
            d.api.claim_reward(KEY1, second, NODE_OWNER1),
            Err(NodeRewardsError::NotAttested {
                node_key: KEY1,
                batch_number: second
            })
        );
    }

    #[test]
    fn test_unapproved_account_cannot_claim() {
        let d = Deployment::new();
        let batch = d.next_batch();
        d.api.attest(batch, KEY4, NODE_OWNER3).unwrap();
        d.fast_forward_to_finalize();
        d.api.finalize(batch, OWNER).unwrap();

        assert_eq!(
            d.api.claim_reward(KEY4, batch, NODE_OWNER3),
            Err(NodeRewardsError::NotEligible {
                account: NODE_OWNER3
            })
        );
    }

    #[test]
    fn test_pool_exhaustion_pays_nothing_partially() {
        let d = Deployment::with_pool_funding(0);
        let batch = d.attest_all_and_finalize();
        let reward = d.api.reward_per_node_of_batch(batch).unwrap();
        // Enough for one key, not two
        d.top_up_pool(reward + reward / 2);

        assert!(matches!(
            d.api.batch_claim_reward(&[KEY2, KEY3], batch, NODE_OWNER2),
            Err(NodeRewardsError::InsufficientPoolBalance { .. })
        ));
        assert_eq!(d.balance_of(NODE_OWNER2), 0);
        assert!(!d.api.is_claimed(KEY2, batch));
        assert!(!d.api.is_claimed(KEY3, batch));
        assert_eq!(d.api.total_rewards_paid(), 0);
    }

    #[test]
    fn test_node_keys_cannot_change_hands() {
        use nr_01_node_key::{NodeKeyApi, NodeKeyError};

        let d = Deployment::new();
        assert_eq!(
            d.container
                .node_keys
                .transfer_from(NODE_OWNER1, NODE_OWNER1, OUTSIDER, KEY1),
            Err(NodeKeyError::NonTransferable)
        );
        assert_eq!(d.container.node_keys.owner_of(KEY1), Ok(NODE_OWNER1));
    }
}
