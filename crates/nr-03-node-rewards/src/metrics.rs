//! # Node Rewards Metrics
//!
//! Prometheus metrics, enabled with the `metrics` feature:
//! ```toml
//! nr-03-node-rewards = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `node_rewards_attestations_total` - Counter of recorded attestations
//! - `node_rewards_rejections_total` - Counter of rejected operations (by reason)
//! - `node_rewards_batches_finalized_total` - Counter of finalized batches
//! - `node_rewards_claims_total` - Counter of paid node key claims
//! - `node_rewards_claim_rollbacks_total` - Counter of claims undone after a failed payout
//! - `node_rewards_latest_finalized_batch` - Gauge of the finalization cursor
//! - `node_rewards_last_batch_attestations` - Gauge of attesters in the last finalized batch

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_counter_vec, register_gauge, register_int_counter, CounterVec, Gauge, IntCounter,
};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref ATTESTATIONS: IntCounter = register_int_counter!(
        "node_rewards_attestations_total",
        "Total number of attestations recorded"
    )
    .expect("Failed to create ATTESTATIONS metric");

    pub static ref REJECTIONS: CounterVec = register_counter_vec!(
        "node_rewards_rejections_total",
        "Total number of rejected operations",
        &["operation", "reason"]
    )
    .expect("Failed to create REJECTIONS metric");

    pub static ref BATCHES_FINALIZED: IntCounter = register_int_counter!(
        "node_rewards_batches_finalized_total",
        "Total number of batches finalized"
    )
    .expect("Failed to create BATCHES_FINALIZED metric");

    pub static ref CLAIMS: IntCounter = register_int_counter!(
        "node_rewards_claims_total",
        "Total number of node key rewards paid"
    )
    .expect("Failed to create CLAIMS metric");

    pub static ref CLAIM_ROLLBACKS: IntCounter = register_int_counter!(
        "node_rewards_claim_rollbacks_total",
        "Total number of claims rolled back after a failed payout"
    )
    .expect("Failed to create CLAIM_ROLLBACKS metric");

    pub static ref LATEST_FINALIZED_BATCH: Gauge = register_gauge!(
        "node_rewards_latest_finalized_batch",
        "Latest finalized batch number"
    )
    .expect("Failed to create LATEST_FINALIZED_BATCH metric");

    pub static ref LAST_BATCH_ATTESTATIONS: Gauge = register_gauge!(
        "node_rewards_last_batch_attestations",
        "Attestations in the most recently finalized batch"
    )
    .expect("Failed to create LAST_BATCH_ATTESTATIONS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

#[cfg(feature = "metrics")]
pub fn record_attestations(count: u64) {
    ATTESTATIONS.inc_by(count);
}

#[cfg(feature = "metrics")]
pub fn record_rejection(operation: &str, reason: &str) {
    REJECTIONS.with_label_values(&[operation, reason]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_batch_finalized(batch_number: u64, attestations: u64) {
    BATCHES_FINALIZED.inc();
    LATEST_FINALIZED_BATCH.set(batch_number as f64);
    LAST_BATCH_ATTESTATIONS.set(attestations as f64);
}

#[cfg(feature = "metrics")]
pub fn record_claims(count: u64) {
    CLAIMS.inc_by(count);
}

#[cfg(feature = "metrics")]
pub fn record_claim_rollback(count: u64) {
    CLAIM_ROLLBACKS.inc_by(count);
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_attestations(_count: u64) {}

#[cfg(not(feature = "metrics"))]
pub fn record_rejection(_operation: &str, _reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_batch_finalized(_batch_number: u64, _attestations: u64) {}

#[cfg(not(feature = "metrics"))]
pub fn record_claims(_count: u64) {}

#[cfg(not(feature = "metrics"))]
pub fn record_claim_rollback(_count: u64) {}
