//! # Exploit Simulations
//!
//! Each test plays an attacker against a live deployment and asserts the
//! attempt is refused with state and balances untouched.

pub mod administration;
pub mod attestation;
pub mod claims;
