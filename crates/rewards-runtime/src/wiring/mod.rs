//! # Wiring
//!
//! Background tasks that drive the engine and move its events onto the bus.
//!
//! ```text
//!  FinalizationScheduler ──finalize_next()──→ NodeRewards engine
//!                                                   │ take_events()
//!                                                   ▼
//!                                              EventRelay ──publish_all()──→ Event Bus
//! ```

pub mod relay;
pub mod scheduler;

pub use relay::EventRelay;
pub use scheduler::FinalizationScheduler;
