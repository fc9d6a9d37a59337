//! # nr-02-reward-token
//!
//! Fungible token ledger used to fund node rewards. The rewards engine pays
//! claims by transferring out of a pool account held here.

pub mod error;
pub mod ledger;
pub mod service;

pub use error::{TokenError, TokenResult};
pub use ledger::TokenLedger;
pub use service::RewardTokenService;
