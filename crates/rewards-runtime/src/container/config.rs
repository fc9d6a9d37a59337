//! # Runtime Configuration
//!
//! Reward parameters, scheduling intervals and bootstrap inputs. Every field
//! has a default and can be overridden from the environment.

use nr_03_node_rewards::{RewardConfig, DEFAULT_MAX_REWARD_TIME_WINDOW, DEFAULT_REWARD_PER_SECOND};
use shared_types::Amount;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// One million tokens at 18 decimals
pub const DEFAULT_POOL_FUNDING: Amount = 1_000_000 * 1_000_000_000_000_000_000;

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Reward emission parameters.
    pub rewards: RewardConfig,
    /// Scheduling configuration.
    pub scheduler: SchedulerConfig,
    /// Genesis JSON file. The built-in devnet genesis is used when unset.
    pub genesis_file: Option<PathBuf>,
    /// Pool funding used when the genesis file does not specify one.
    pub pool_funding: Amount,
    /// Event bus channel capacity.
    pub event_bus_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            rewards: RewardConfig::default(),
            scheduler: SchedulerConfig::default(),
            genesis_file: None,
            pool_funding: DEFAULT_POOL_FUNDING,
            event_bus_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Scheduling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Seconds between automatic finalization attempts.
    pub finalize_interval_secs: u64,
    /// Milliseconds between event relay passes.
    pub relay_interval_ms: u64,
    /// Seconds to wait for tasks on shutdown.
    pub shutdown_grace_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            finalize_interval_secs: DEFAULT_MAX_REWARD_TIME_WINDOW,
            relay_interval_ms: 250,
            shutdown_grace_secs: 2,
        }
    }
}

impl SchedulerConfig {
    pub fn finalize_interval(&self) -> Duration {
        Duration::from_secs(self.finalize_interval_secs)
    }

    pub fn relay_interval(&self) -> Duration {
        Duration::from_millis(self.relay_interval_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid reward configuration: {0}")]
    Rewards(String),

    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}

impl RuntimeConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply overrides from a variable source.
    ///
    /// # Variables
    ///
    /// - `NR_REWARD_PER_SECOND`
    /// - `NR_MAX_REWARD_TIME_WINDOW`
    /// - `NR_FINALIZE_INTERVAL_SECS`
    /// - `NR_RELAY_INTERVAL_MS`
    /// - `NR_GENESIS_FILE`
    /// - `NR_POOL_FUNDING`
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        override_parsed(&lookup, "NR_REWARD_PER_SECOND", &mut self.rewards.reward_per_second);
        override_parsed(
            &lookup,
            "NR_MAX_REWARD_TIME_WINDOW",
            &mut self.rewards.max_reward_time_window,
        );
        override_parsed(
            &lookup,
            "NR_FINALIZE_INTERVAL_SECS",
            &mut self.scheduler.finalize_interval_secs,
        );
        override_parsed(&lookup, "NR_RELAY_INTERVAL_MS", &mut self.scheduler.relay_interval_ms);
        override_parsed(&lookup, "NR_POOL_FUNDING", &mut self.pool_funding);

        if let Some(path) = lookup("NR_GENESIS_FILE") {
            info!(path = %path, "Using genesis file from environment");
            self.genesis_file = Some(PathBuf::from(path));
        }
    }

    /// Reject configurations the engine or scheduler cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rewards
            .validate()
            .map_err(|e| ConfigError::Rewards(e.to_string()))?;

        if self.scheduler.finalize_interval_secs == 0 {
            return Err(ConfigError::Zero {
                name: "finalize_interval_secs",
            });
        }
        if self.scheduler.relay_interval_ms == 0 {
            return Err(ConfigError::Zero {
                name: "relay_interval_ms",
            });
        }
        if self.event_bus_capacity == 0 {
            return Err(ConfigError::Zero {
                name: "event_bus_capacity",
            });
        }
        Ok(())
    }
}

fn override_parsed<T, F>(lookup: &F, key: &str, target: &mut T)
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(_) => warn!(key, value = %raw, "Ignoring unparseable configuration override"),
    }
}
