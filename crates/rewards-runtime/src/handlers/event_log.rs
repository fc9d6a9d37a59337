//! Structured log of every event published on the bus.

use parking_lot::Mutex;
use serde::Serialize;
use shared_bus::{EventTopic, RewardsEvent, Subscription};
use shared_types::format_address;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Per-topic event counts, shared with whoever spawned the handler.
#[derive(Clone, Default)]
pub struct EventLogStats {
    counts: Arc<Mutex<HashMap<EventTopic, u64>>>,
}

impl EventLogStats {
    pub fn count(&self, topic: EventTopic) -> u64 {
        self.counts.lock().get(&topic).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.lock().values().sum()
    }

    fn record(&self, topic: EventTopic) {
        *self.counts.lock().entry(topic).or_insert(0) += 1;
    }
}

pub struct EventLogHandler {
    subscription: Subscription,
    stats: EventLogStats,
}

impl EventLogHandler {
    pub fn new(subscription: Subscription) -> Self {
        Self {
            subscription,
            stats: EventLogStats::default(),
        }
    }

    pub fn stats(&self) -> EventLogStats {
        self.stats.clone()
    }

    /// Log events until the bus closes.
    pub async fn run(mut self) -> EventLogStats {
        info!("Event log handler started");
        while let Some(event) = self.subscription.recv().await {
            self.stats.record(event.topic());
            log_event(&event);
        }
        info!(events = self.stats.total(), "Event log handler stopped");
        self.stats
    }
}

/// One `EVENT_FLOW_JSON` line. Serialized directly to text so 128-bit
/// amounts are written as plain numbers.
#[derive(Serialize)]
struct EventLine<'a> {
    topic: EventTopic,
    account: Option<String>,
    event: &'a RewardsEvent,
}

fn render_event(event: &RewardsEvent) -> serde_json::Result<String> {
    serde_json::to_string(&EventLine {
        topic: event.topic(),
        account: event.account().map(format_address),
        event,
    })
}

fn log_event(event: &RewardsEvent) {
    match render_event(event) {
        Ok(line) => info!("EVENT_FLOW_JSON {}", line),
        Err(e) => warn!(topic = ?event.topic(), error = %e, "Failed to render event"),
    }
}
