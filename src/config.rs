//! Configuration Module
//!
//! Handles loading maintenance settings from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::PurgeOptions;

/// Maintenance configuration for an embedding owner.
///
/// All values can be configured via environment variables with sensible
/// defaults. The cache itself is unbounded; these settings only shape the
/// periodic purge an embedder schedules.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries left behind by a purge
    pub max_entries: usize,
    /// Maximum entry age in seconds left behind by a purge
    pub max_age_secs: u64,
    /// Purge task interval in seconds
    pub purge_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MEMOCACHE_MAX_ENTRIES` - Purge size bound (default: 1000)
    /// - `MEMOCACHE_MAX_AGE_SECS` - Purge age bound in seconds (default: 300)
    /// - `MEMOCACHE_PURGE_INTERVAL_SECS` - Purge frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("MEMOCACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            max_age_secs: env::var("MEMOCACHE_MAX_AGE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            purge_interval: env::var("MEMOCACHE_PURGE_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }

    /// Converts the configured bounds into purge options.
    pub fn purge_options(&self) -> PurgeOptions {
        PurgeOptions {
            max_size: Some(self.max_entries),
            max_age: Some(Duration::from_secs(self.max_age_secs)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            max_age_secs: 300,
            purge_interval: 1,
        }
    }
}
