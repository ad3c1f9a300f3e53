//! Background Tasks Module
//!
//! Contains background tasks an embedding owner can schedule alongside the
//! cache.
//!
//! # Tasks
//! - Purge: evicts entries violating the configured bounds at intervals

mod purge;

pub use purge::spawn_purge_task;
