//! Attacks on privileged operations.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use nr_03_node_rewards::{Denial, NodeRewardsError};
    use shared_types::Role;

    #[test]
    fn test_outsider_cannot_finalize() {
        let d = Deployment::new();
        d.api.attest(1, KEY1, NODE_OWNER1).unwrap();
        d.fast_forward_to_finalize();

        assert_eq!(
            d.api.finalize(1, NODE_OWNER1),
            Err(NodeRewardsError::Unauthorized {
                denial: Denial::MissingRole(Role::Finalizer)
            })
        );
        assert_eq!(d.api.latest_finalized_batch_number(), 0);
    }

    #[test]
    fn test_finalize_backwards() {
        let d = Deployment::new();
        d.api.attest(1, KEY1, NODE_OWNER1).unwrap();
        d.api.attest(2, KEY1, NODE_OWNER1).unwrap();
        d.clock.advance(60);
        d.api.finalize(2, OWNER).unwrap();

        assert_eq!(
            d.api.finalize(1, OWNER),
            Err(NodeRewardsError::NotMonotonic {
                batch_number: 1,
                latest_finalized: 2
            })
        );
        assert_eq!(d.api.reward_per_node_of_batch(1), None);
    }

    #[test]
    fn test_finalize_empty_batch() {
        let d = Deployment::new();
        d.fast_forward_to_finalize();

        assert_eq!(
            d.api.finalize(1, OWNER),
            Err(NodeRewardsError::EmptyBatch { batch_number: 1 })
        );
        // Cursor did not move, so the elapsed time still counts
        assert_eq!(d.api.latest_confirmed_timestamp(), GENESIS_TIME);
    }

    #[test]
    fn test_self_enrollment_in_kyc() {
        let d = Deployment::new();

        assert!(matches!(
            d.api.add_kyc_wallets(&[NODE_OWNER3], NODE_OWNER3),
            Err(NodeRewardsError::Unauthorized { .. })
        ));
        assert!(!d.api.is_kyc_approved(NODE_OWNER3));
    }

    #[test]
    fn test_self_grant_role() {
        let d = Deployment::new();

        assert!(d
            .api
            .grant_role(Role::Finalizer, OUTSIDER, OUTSIDER)
            .is_err());
        assert!(!d.api.has_role(Role::Finalizer, OUTSIDER));
    }

    #[test]
    fn test_rate_change_requires_controller() {
        let d = Deployment::new();

        assert_eq!(
            d.api.set_reward_per_second(1, NODE_OWNER1),
            Err(NodeRewardsError::Unauthorized {
                denial: Denial::MissingRole(Role::RewardsController)
            })
        );
        assert_eq!(d.api.reward_config().reward_per_second, REWARD_PER_SECOND);
    }

    #[test]
    fn test_overflowing_rate_rejected() {
        let d = Deployment::new();

        assert!(matches!(
            d.api.set_reward_per_second(u128::MAX, OWNER),
            Err(NodeRewardsError::InvalidConfig { .. })
        ));
        assert_eq!(d.api.reward_config().reward_per_second, REWARD_PER_SECOND);
    }

    #[test]
    fn test_revoked_finalizer_locked_out() {
        let d = Deployment::new();
        d.api.grant_role(Role::Finalizer, OUTSIDER, OWNER).unwrap();
        d.api.revoke_role(Role::Finalizer, OUTSIDER, OWNER).unwrap();
        d.api.attest(1, KEY1, NODE_OWNER1).unwrap();

        assert!(d.api.finalize(1, OUTSIDER).is_err());
    }
}
