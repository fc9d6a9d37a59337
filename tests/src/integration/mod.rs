//! # Integration Tests
//!
//! Engine, node key registry and reward token wired together the way the
//! runtime wires them.

pub mod flows;
pub mod runtime;
