//! # Genesis Module
//!
//! Initial state of a node rewards deployment.
//!
//! ## Bootstrap Sequence
//!
//! 1. Parse and validate the genesis accounts
//! 2. Mint node keys to their owners
//! 3. Fund the reward pool
//! 4. Grant the finalizer and controller roles
//! 5. Enroll the initial KYC wallets

pub mod builder;

pub use builder::{GenesisBuilder, GenesisConfig, GenesisError, GenesisSummary, NodeKeyAllocation};
