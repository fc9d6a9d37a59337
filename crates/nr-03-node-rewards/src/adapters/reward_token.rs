//! Reward custody adapter: pays claims out of a pool account on the reward
//! token ledger.

use crate::ports::outbound::{CustodyError, RewardCustody};
use nr_02_reward_token::{RewardTokenService, TokenError};
use shared_types::{format_address, Address, Amount};
use tracing::debug;

pub struct TokenPoolCustody {
    token: RewardTokenService,
    pool: Address,
}

impl TokenPoolCustody {
    pub fn new(token: RewardTokenService, pool: Address) -> Self {
        Self { token, pool }
    }

    pub fn pool(&self) -> Address {
        self.pool
    }
}

impl RewardCustody for TokenPoolCustody {
    fn credit(&self, account: Address, amount: Amount) -> Result<(), CustodyError> {
        debug!(account = %format_address(&account), amount, "Crediting reward from pool");
        self.token
            .transfer(self.pool, account, amount)
            .map_err(|err| match err {
                TokenError::InsufficientBalance {
                    available,
                    requested,
                } => CustodyError::InsufficientPoolBalance {
                    available,
                    requested,
                },
                other => CustodyError::Rejected {
                    reason: other.to_string(),
                },
            })
    }

    fn pool_balance(&self) -> Amount {
        self.token.balance_of(self.pool)
    }
}
