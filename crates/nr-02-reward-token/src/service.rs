//! Reward Token Service

use crate::error::{TokenError, TokenResult};
use crate::ledger::TokenLedger;
use parking_lot::RwLock;
use shared_types::{format_address, Address, Amount};
use std::sync::Arc;
use tracing::{debug, info};

/// Shared handle to the reward token ledger.
///
/// Cloning yields another handle to the same balances.
#[derive(Clone)]
pub struct RewardTokenService {
    admin: Address,
    ledger: Arc<RwLock<TokenLedger>>,
}

impl RewardTokenService {
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            ledger: Arc::new(RwLock::new(TokenLedger::new())),
        }
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    /// Mint new tokens. Admin only.
    pub fn mint(&self, caller: Address, to: Address, amount: Amount) -> TokenResult<()> {
        if caller != self.admin {
            return Err(TokenError::NotAuthorized);
        }
        self.ledger.write().mint(to, amount)?;
        info!(to = %format_address(&to), amount, "Minted reward tokens");
        Ok(())
    }

    pub fn transfer(&self, from: Address, to: Address, amount: Amount) -> TokenResult<()> {
        self.ledger.write().transfer(from, to, amount)?;
        debug!(
            from = %format_address(&from),
            to = %format_address(&to),
            amount,
            "Reward tokens transferred"
        );
        Ok(())
    }

    pub fn balance_of(&self, account: Address) -> Amount {
        self.ledger.read().balance_of(&account)
    }

    pub fn total_supply(&self) -> Amount {
        self.ledger.read().total_supply()
    }
}
