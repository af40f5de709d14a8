//! In-memory memoization for API resources.
//!
//! Each resource kind gets its own [`MemoCache`]. A cache keeps resolved
//! values until it is cleared and collapses concurrent requests for the
//! same key into one fetch. There is no expiry and no eviction: the remote
//! catalog is small and effectively static.

mod memo;
mod types;

pub use memo::MemoCache;
pub use types::{CacheKey, CacheStats, ResourceKind};
