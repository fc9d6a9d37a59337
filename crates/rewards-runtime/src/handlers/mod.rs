//! # Event Handlers
//!
//! Bus subscribers that react to engine events.

pub mod event_log;

pub use event_log::{EventLogHandler, EventLogStats};
