//! Error types for the memo cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
///
/// The only failure surface is the compute callback handed to
/// [`fetch_with`](crate::MemoCache::fetch_with): looking up an absent key
/// is not an error, it simply returns `None`.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A compute callback failed to produce a value
    #[error("compute failed: {0}")]
    Compute(String),
}

// Lets compute callbacks use `?` on any anyhow-compatible error.
impl From<anyhow::Error> for CacheError {
    fn from(err: anyhow::Error) -> Self {
        CacheError::Compute(format!("{err:#}"))
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
