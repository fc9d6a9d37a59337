//! Adapters connecting the engine to the node key registry, the reward token
//! and a clock.

pub mod clock;
pub mod node_key;
pub mod reward_token;

pub use clock::{ManualClock, SystemClock};
pub use node_key::NodeKeyIdentityAdapter;
pub use reward_token::TokenPoolCustody;
