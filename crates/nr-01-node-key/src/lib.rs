//! # nr-01-node-key
//!
//! Non-transferable node identity registry.
//!
//! Each node key is an integer id bound to an owner account at mint time.
//! Only the registry admin mints. Keys can never move: every transfer attempt
//! fails with [`NodeKeyError::NonTransferable`].
//!
//! ```text
//! Admin ──mint(to, n)──→ Node Key (1) ──owner_of(id)──→ Node Rewards (3)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use nr_01_node_key::{NodeKeyService, NodeKeyApi};
//!
//! let keys = NodeKeyService::new(admin);
//! let minted = keys.mint(admin, operator, 2)?;
//! assert_eq!(keys.owner_of(minted[0])?, operator);
//! ```

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::{NodeKeyRegistry, FIRST_NODE_KEY_ID, MAX_MINT_AMOUNT};
pub use error::{NodeKeyError, NodeKeyResult};
pub use ports::inbound::NodeKeyApi;
pub use service::{NodeKeyService, DEFAULT_NAME, DEFAULT_SYMBOL};
