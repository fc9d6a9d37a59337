//! Periodic batch finalization on behalf of the operator account.

use nr_03_node_rewards::{FinalizeReceipt, NodeRewardsApi, NodeRewardsError};
use shared_types::Address;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Finalizes the next open batch every `interval`.
pub struct FinalizationScheduler {
    api: Arc<dyn NodeRewardsApi>,
    operator: Address,
    interval: Duration,
}

impl FinalizationScheduler {
    pub fn new(api: Arc<dyn NodeRewardsApi>, operator: Address, interval: Duration) -> Self {
        Self {
            api,
            operator,
            interval,
        }
    }

    /// Attempt one finalization.
    ///
    /// A batch nobody attested to is skipped quietly; any other refusal is
    /// logged and retried on the next tick.
    pub fn tick(&self) -> Option<FinalizeReceipt> {
        match self.api.finalize_next(self.operator) {
            Ok(receipt) => {
                info!(
                    batch = receipt.batch_number,
                    reward_per_node = receipt.reward_per_node,
                    attestations = receipt.attestations,
                    "Batch finalized"
                );
                Some(receipt)
            }
            Err(NodeRewardsError::EmptyBatch { batch_number }) => {
                debug!(batch = batch_number, "No attestations yet, skipping finalization");
                None
            }
            Err(e) => {
                warn!(error = %e, kind = ?e.kind(), "Scheduled finalization failed");
                None
            }
        }
    }

    /// Tick until shutdown is signalled. The first tick fires one interval
    /// after start.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(interval_secs = self.interval.as_secs(), "Finalization scheduler started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick();
                }
                _ = shutdown.changed() => {
                    info!("Finalization scheduler stopping");
                    break;
                }
            }
        }
    }
}
