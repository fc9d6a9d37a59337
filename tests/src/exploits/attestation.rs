//! Attacks on attestation: diluting closed batches, impersonation and
//! attestation stuffing.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use nr_03_node_rewards::{Denial, NodeRewardsError};
    use shared_types::NodeKeyId;

    #[test]
    fn test_dilution_after_finalization() {
        let d = Deployment::new();
        let batch = d.next_batch();
        d.api.attest(batch, KEY1, NODE_OWNER1).unwrap();
        d.fast_forward_to_finalize();
        d.api.finalize(batch, OWNER).unwrap();
        let reward = d.api.reward_per_node_of_batch(batch);

        // Late attestations would shrink key #1's share
        assert_eq!(
            d.api.batch_attest(batch, &[KEY2, KEY3], NODE_OWNER2),
            Err(NodeRewardsError::AlreadyFinalized {
                batch_number: batch
            })
        );
        assert_eq!(d.api.reward_per_node_of_batch(batch), reward);
        assert_eq!(d.api.batch(batch).unwrap().attestation_count(), 1);
    }

    #[test]
    fn test_backfill_behind_cursor() {
        let d = Deployment::new();
        d.api.attest(3, KEY1, NODE_OWNER1).unwrap();
        d.clock.advance(60);
        d.api.finalize(3, OWNER).unwrap();

        for batch in [0, 1, 2] {
            assert_eq!(
                d.api.attest(batch, KEY2, NODE_OWNER2),
                Err(NodeRewardsError::AlreadyFinalized {
                    batch_number: batch
                })
            );
        }
    }

    #[test]
    fn test_attest_twice_to_inflate_share() {
        let d = Deployment::new();
        let batch = d.next_batch();
        d.api.attest(batch, KEY1, NODE_OWNER1).unwrap();

        assert!(matches!(
            d.api.attest(batch, KEY1, NODE_OWNER1),
            Err(NodeRewardsError::DuplicateAttestation { .. })
        ));
        assert!(matches!(
            d.api.batch_attest(batch, &[KEY2, KEY2], NODE_OWNER2),
            Err(NodeRewardsError::DuplicateAttestation { .. })
        ));
        assert!(!d.api.has_attested(batch, KEY2));
        assert_eq!(d.api.batch(batch).unwrap().attestation_count(), 1);
    }

    #[test]
    fn test_attest_with_someone_elses_key() {
        let d = Deployment::new();

        assert_eq!(
            d.api.attest(1, KEY1, OUTSIDER),
            Err(NodeRewardsError::Unauthorized {
                denial: Denial::NotOwner(KEY1)
            })
        );
        // One foreign key spoils the whole batch
        assert!(d
            .api
            .batch_attest(1, &[KEY2, KEY1], NODE_OWNER2)
            .is_err());
        assert!(d.api.batch(1).is_none());
    }

    #[test]
    fn test_attest_with_unminted_key() {
        let d = Deployment::new();
        assert_eq!(
            d.api.attest(1, NodeKeyId(99), NODE_OWNER1),
            Err(NodeRewardsError::UnknownIdentity {
                node_key: NodeKeyId(99)
            })
        );
    }
}
