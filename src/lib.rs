//! Memocache - an in-process memoizing cache
//!
//! Remembers the result of an expensive computation by key, promotes
//! entries on every touch, and purges by entry count or entry age.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheStats, Entry, MemoCache, PurgeOptions};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_purge_task;
