//! # Shared Types Crate
//!
//! Primitive identifiers used across the node rewards workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: account, node key, batch and amount types are
//!   defined here and nowhere else.
//! - **Plain data**: no behaviour beyond formatting and conversions; business
//!   rules live in the crates that own them.

pub mod entities;
pub mod serde_helpers;
pub mod time;

pub use entities::*;
pub use time::current_timestamp;
