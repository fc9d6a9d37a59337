//! Domain module for the Node Key registry

pub mod registry;

pub use registry::{NodeKeyRegistry, FIRST_NODE_KEY_ID, MAX_MINT_AMOUNT};
