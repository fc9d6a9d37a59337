use crate::domain::{AccessControl, AllowList, BatchLedger, ClaimLedger};
use crate::types::RewardConfig;
use serde::{Deserialize, Serialize};
use shared_bus::RewardsEvent;
use shared_types::{Address, Amount, Timestamp};
use std::collections::VecDeque;
use tracing::warn;

/// Events held for the relay before the oldest are discarded.
pub const MAX_PENDING_EVENTS: usize = 10_000;

/// Complete engine state.
///
/// Held behind one mutex by the service; domain types receive it by `&mut`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeRewardsState {
    pub batches: BatchLedger,
    pub claims: ClaimLedger,
    pub allow_list: AllowList,
    pub access: AccessControl,
    pub config: RewardConfig,
    /// Rounding dust left in the pool across all finalized batches
    pub undistributed: Amount,
    /// Sum of all successful payouts
    pub total_paid: Amount,
    /// Events from committed operations, waiting to be relayed
    #[serde(skip)]
    pub pending_events: VecDeque<RewardsEvent>,
    /// Events discarded because nobody drained the queue
    #[serde(skip)]
    pub events_dropped: u64,
}

impl NodeRewardsState {
    pub fn new(config: RewardConfig, admin: Address, genesis_timestamp: Timestamp) -> Self {
        Self {
            batches: BatchLedger::new(genesis_timestamp),
            claims: ClaimLedger::new(),
            allow_list: AllowList::new(),
            access: AccessControl::new(admin),
            config,
            undistributed: 0,
            total_paid: 0,
            pending_events: VecDeque::new(),
            events_dropped: 0,
        }
    }

    /// Copy suitable for persistence: pending events are left behind.
    pub fn snapshot(&self) -> Self {
        Self {
            pending_events: VecDeque::new(),
            events_dropped: 0,
            ..self.clone()
        }
    }

    /// Queue an event; the oldest is discarded once the queue is full.
    pub fn emit(&mut self, event: RewardsEvent) {
        if self.pending_events.len() >= MAX_PENDING_EVENTS {
            self.pending_events.pop_front();
            self.events_dropped += 1;
            if self.events_dropped == 1 || self.events_dropped % 1_000 == 0 {
                warn!(
                    dropped = self.events_dropped,
                    "Pending event queue full, discarding oldest events"
                );
            }
        }
        self.pending_events.push_back(event);
    }

    pub fn take_events(&mut self) -> Vec<RewardsEvent> {
        std::mem::take(&mut self.pending_events).into()
    }
}
