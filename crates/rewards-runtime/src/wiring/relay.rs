//! Moves committed engine events onto the shared bus.

use nr_03_node_rewards::NodeRewardsApi;
use shared_bus::{EventPublisher, InMemoryEventBus};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

pub struct EventRelay {
    api: Arc<dyn NodeRewardsApi>,
    bus: Arc<InMemoryEventBus>,
}

impl EventRelay {
    pub fn new(api: Arc<dyn NodeRewardsApi>, bus: Arc<InMemoryEventBus>) -> Self {
        Self { api, bus }
    }

    /// Publish every queued event in order. Returns how many were drained.
    pub async fn relay_once(&self) -> usize {
        let events = self.api.take_events();
        let drained = events.len();
        if drained == 0 {
            return 0;
        }
        let delivered = self.bus.publish_all(events).await;
        debug!(events = drained, deliveries = delivered, "Relayed engine events");
        drained
    }

    pub async fn run(self, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(interval);
        info!(interval_ms = interval.as_millis() as u64, "Event relay started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.relay_once().await;
                }
                _ = shutdown.changed() => {
                    // Flush whatever committed before the signal
                    let flushed = self.relay_once().await;
                    info!(flushed, "Event relay stopping");
                    break;
                }
            }
        }
    }
}
