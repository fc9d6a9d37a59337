//! Reward token balances

use crate::error::{TokenError, TokenResult};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, ZERO_ADDRESS};
use std::collections::HashMap;

/// Balance table for the reward token.
///
/// Total supply always equals the sum of balances.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenLedger {
    #[serde(with = "shared_types::serde_helpers::address_map")]
    balances: HashMap<Address, Amount>,
    total_supply: Amount,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Create `amount` new tokens in `to`
    pub fn mint(&mut self, to: Address, amount: Amount) -> TokenResult<()> {
        if to == ZERO_ADDRESS {
            return Err(TokenError::ZeroAddress);
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::BalanceOverflow { account: to })?;
        // Every balance is bounded by the supply, so this cannot overflow
        *self.balances.entry(to).or_insert(0) += amount;
        self.total_supply = supply;
        Ok(())
    }

    /// Move `amount` from `from` to `to`. Either both sides change or neither.
    pub fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> TokenResult<()> {
        if to == ZERO_ADDRESS {
            return Err(TokenError::ZeroAddress);
        }
        let available = self.balance_of(&from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                available,
                requested: amount,
            });
        }
        if from == to || amount == 0 {
            return Ok(());
        }

        self.balances.insert(from, available - amount);
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }
}
