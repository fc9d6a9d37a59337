//! # Node Rewards Runtime
//!
//! Hosts the node rewards engine in a long-running process.
//!
//! ## Modular Structure
//!
//! - `container/` - Component container and runtime configuration
//! - `genesis/` - Initial keys, pool funding, roles and allow-list
//! - `wiring/` - Finalization scheduler and event relay
//! - `handlers/` - Event bus subscribers
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (env overrides on defaults)
//! 2. Assemble the container
//! 3. Apply genesis
//! 4. Start the event log handler, the relay and the scheduler
//!
//! ## Shutdown Sequence
//!
//! 1. Signal every task
//! 2. The relay flushes events committed before the signal
//! 3. Wait for tasks up to the grace period, then abort stragglers

pub mod container;
pub mod genesis;
pub mod handlers;
pub mod wiring;

use crate::container::{RewardsContainer, RuntimeConfig};
use crate::genesis::{GenesisBuilder, GenesisConfig, GenesisSummary};
use crate::handlers::{EventLogHandler, EventLogStats};
use crate::wiring::{EventRelay, FinalizationScheduler};
use anyhow::{Context, Result};
use nr_03_node_rewards::Clock;
use parking_lot::Mutex;
use shared_bus::EventFilter;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// A running node rewards deployment.
pub struct RewardsRuntime<K: Clock + 'static> {
    container: Arc<RewardsContainer<K>>,
    genesis: GenesisSummary,
    event_log: EventLogStats,
    tasks: Mutex<Vec<(&'static str, JoinHandle<()>)>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl<K: Clock + 'static> RewardsRuntime<K> {
    /// Assemble the container and apply genesis. Nothing runs until [`Self::start`].
    pub fn new(config: RuntimeConfig, genesis: GenesisConfig, clock: Arc<K>) -> Result<Self> {
        config.validate().context("Invalid runtime configuration")?;
        let accounts = genesis.accounts().context("Invalid genesis accounts")?;

        let container = RewardsContainer::new(config, accounts, clock)
            .context("Failed to assemble rewards container")?;
        let summary = GenesisBuilder::new(genesis)
            .apply(&container)
            .context("Failed to apply genesis")?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            container: Arc::new(container),
            genesis: summary,
            event_log: EventLogStats::default(),
            tasks: Mutex::new(Vec::new()),
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Spawn the background tasks.
    pub fn start(&mut self) {
        info!("===========================================");
        info!("  Node Rewards Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let container = &self.container;
        let scheduler_config = container.config.scheduler;

        // Subscribe before the relay publishes genesis events
        let handler = EventLogHandler::new(container.event_bus.subscribe(EventFilter::all()));
        self.event_log = handler.stats();
        let mut handler_shutdown = self.shutdown_rx.clone();
        let handler_task = tokio::spawn(async move {
            tokio::select! {
                _ = handler.run() => {}
                _ = handler_shutdown.changed() => {
                    info!("Event log handler shutdown signal received");
                }
            }
        });

        let relay = EventRelay::new(container.api(), Arc::clone(&container.event_bus));
        let relay_task = tokio::spawn(relay.run(
            scheduler_config.relay_interval(),
            self.shutdown_rx.clone(),
        ));

        let scheduler = FinalizationScheduler::new(
            container.api(),
            container.accounts.operator,
            scheduler_config.finalize_interval(),
        );
        let scheduler_task = tokio::spawn(scheduler.run(self.shutdown_rx.clone()));

        self.tasks.lock().extend([
            ("event-log", handler_task),
            ("event-relay", relay_task),
            ("finalization-scheduler", scheduler_task),
        ]);

        info!(
            node_keys = self.genesis.total_keys(),
            finalize_interval_secs = scheduler_config.finalize_interval_secs,
            "Node rewards runtime started"
        );
    }

    /// Stop every task, waiting up to the configured grace period.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let grace = self.container.config.scheduler.shutdown_grace();
        let deadline = tokio::time::Instant::now() + grace;
        let tasks = std::mem::take(&mut *self.tasks.lock());
        for (name, mut handle) in tasks {
            match tokio::time::timeout_at(deadline, &mut handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(task = name, error = %e, "Task ended abnormally"),
                Err(_) => {
                    warn!(task = name, "Task did not stop within grace period, aborting");
                    handle.abort();
                }
            }
        }

        info!(
            events_logged = self.event_log.total(),
            "Shutdown complete"
        );
    }

    pub fn container(&self) -> Arc<RewardsContainer<K>> {
        Arc::clone(&self.container)
    }

    pub fn genesis(&self) -> &GenesisSummary {
        &self.genesis
    }

    pub fn event_log(&self) -> EventLogStats {
        self.event_log.clone()
    }
}
