//! # Shared Bus - Event Bus for Rewards Observers
//!
//! Carries the events produced by the node rewards engine to anything that
//! wants to follow them (log handlers, indexers, notification services).
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────────┐  take_events()  ┌──────────────┐
//! │ NodeRewards (3)  │ ──────────────→ │ Event Relay  │
//! └──────────────────┘                 └──────┬───────┘
//!                                             │ publish()
//!                                             ▼
//!                                      ┌──────────────┐
//!                                      │  Event Bus   │ ──→ subscribe()
//!                                      └──────────────┘
//! ```
//!
//! Events are only ever produced by committed operations, so subscribers
//! never observe a state change that was later rolled back.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, RewardsEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
