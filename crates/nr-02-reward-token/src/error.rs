//! Error types for the reward token ledger

use shared_types::{Address, Amount};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Caller is not the token admin
    #[error("NOT_AUTHORIZED")]
    NotAuthorized,

    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance { available: Amount, requested: Amount },

    #[error("Balance overflow crediting {account:?}")]
    BalanceOverflow { account: Address },

    #[error("Invalid recipient: zero address")]
    ZeroAddress,
}

pub type TokenResult<T> = Result<T, TokenError>;
