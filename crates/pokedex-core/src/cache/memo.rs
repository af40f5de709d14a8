//! Memoizing request gate with an in-flight registry.

use super::types::{CacheKey, CacheStats};
use crate::error::Result;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

type PendingFetch<V> = Shared<BoxFuture<'static, Result<V>>>;

struct Pending<V> {
    /// Identifies the registration so a stale waiter cannot settle a newer fetch.
    ticket: u64,
    fetch: PendingFetch<V>,
}

struct MemoState<V> {
    entries: HashMap<CacheKey, V>,
    in_flight: HashMap<CacheKey, Pending<V>>,
    next_ticket: u64,
}

/// Cache that memoizes fetched values and deduplicates concurrent fetches.
///
/// For any key at most one fetch is outstanding. Callers arriving while it
/// runs await the same shared future and see the same result. Successful
/// results are stored; failures are handed to every waiter and leave the
/// key uncached so the next call fetches again.
///
/// The lock is only held for short bookkeeping sections, never across an
/// await point.
pub struct MemoCache<V> {
    state: Mutex<MemoState<V>>,
    hits: AtomicU64,
    misses: AtomicU64,
    coalesced: AtomicU64,
}

impl<V> Default for MemoCache<V> {
    fn default() -> Self {
        Self {
            state: Mutex::new(MemoState {
                entries: HashMap::new(),
                in_flight: HashMap::new(),
                next_ticket: 0,
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            coalesced: AtomicU64::new(0),
        }
    }
}

impl<V> std::fmt::Debug for MemoCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("MemoCache")
            .field("entries", &state.entries.len())
            .field("in_flight", &state.in_flight.len())
            .finish()
    }
}

impl<V> MemoCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, join a pending fetch for it, or
    /// start one with `producer`.
    ///
    /// `producer` is only invoked when neither a value nor a pending fetch
    /// exists.
    pub async fn get_or_fetch<F, Fut>(&self, key: CacheKey, producer: F) -> Result<V>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        let (ticket, fetch) = {
            let mut state = self.lock();

            if let Some(value) = state.entries.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(value.clone());
            }

            if let Some(pending) = state.in_flight.get(&key) {
                self.coalesced.fetch_add(1, Ordering::Relaxed);
                debug!("Joining in-flight request for {}", key);
                (pending.ticket, pending.fetch.clone())
            } else {
                self.misses.fetch_add(1, Ordering::Relaxed);
                let ticket = state.next_ticket;
                state.next_ticket += 1;

                let fetch = producer().boxed().shared();
                state.in_flight.insert(
                    key.clone(),
                    Pending {
                        ticket,
                        fetch: fetch.clone(),
                    },
                );
                (ticket, fetch)
            }
        };

        let result = fetch.await;
        self.settle(&key, ticket, &result);
        result
    }

    /// First waiter to finish moves the result out of the in-flight registry.
    fn settle(&self, key: &CacheKey, ticket: u64, result: &Result<V>) {
        let mut state = self.lock();
        let owns_registration = state
            .in_flight
            .get(key)
            .is_some_and(|pending| pending.ticket == ticket);
        if !owns_registration {
            // Already settled by another waiter, or the cache was cleared.
            return;
        }

        state.in_flight.remove(key);
        match result {
            Ok(value) => {
                state.entries.insert(key.clone(), value.clone());
            }
            Err(e) => debug!("Request for {} failed, not caching: {}", key, e),
        }
    }

    /// Resolved value for `key`, without fetching.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        self.lock().entries.get(key).cloned()
    }

    /// Store a value directly, e.g. under an alias of an already fetched key.
    pub fn insert(&self, key: CacheKey, value: V) {
        self.lock().entries.insert(key, value);
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.lock().entries.contains_key(key)
    }

    pub fn is_pending(&self, key: &CacheKey) -> bool {
        self.lock().in_flight.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and forget pending fetches.
    ///
    /// Callers already awaiting a pending fetch still receive its result,
    /// but that result is not stored.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.in_flight.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            entries: state.entries.len(),
            in_flight: state.in_flight.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
        }
    }
}

impl<V> MemoCache<V> {
    fn lock(&self) -> MutexGuard<'_, MemoState<V>> {
        // Bookkeeping cannot leave the maps half-updated, so a poisoned lock is still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResourceKind;
    use crate::error::PokedexError;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    fn key(id: &str) -> CacheKey {
        CacheKey::new(ResourceKind::Pokemon, id)
    }

    #[tokio::test]
    async fn test_cached_value_skips_producer() {
        let cache = MemoCache::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let calls = calls.clone();
            let value = cache
                .get_or_fetch(key("1"), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await
                .unwrap();
            assert_eq!(value, 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_fetch() {
        let cache = MemoCache::<u32>::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let (release, gate) = oneshot::channel::<()>();

        let first_calls = calls.clone();
        let first = cache.get_or_fetch(key("1"), move || async move {
            first_calls.fetch_add(1, Ordering::SeqCst);
            let _ = gate.await;
            Ok(1)
        });

        let second_calls = calls.clone();
        let second = cache.get_or_fetch(key("1"), move || async move {
            second_calls.fetch_add(1, Ordering::SeqCst);
            Ok(2)
        });

        let releaser = async move {
            tokio::task::yield_now().await;
            let _ = release.send(());
        };

        let (a, b, ()) = futures::join!(first, second, releaser);
        assert_eq!(a.unwrap(), 1);
        assert_eq!(b.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().coalesced, 1);
        assert!(!cache.is_pending(&key("1")));
    }

    #[tokio::test]
    async fn test_failure_reaches_all_waiters_and_is_not_cached() {
        let cache = MemoCache::<u32>::new();
        let (release, gate) = oneshot::channel::<()>();

        let first = cache.get_or_fetch(key("404"), move || async move {
            let _ = gate.await;
            Err(PokedexError::NotFound {
                resource: "Pokémon".into(),
                identifier: "404".into(),
            })
        });
        let second = cache.get_or_fetch(key("404"), || async { Ok(1) });
        let releaser = async move {
            tokio::task::yield_now().await;
            let _ = release.send(());
        };

        let (a, b, ()) = futures::join!(first, second, releaser);
        assert!(a.unwrap_err().is_not_found());
        assert!(b.unwrap_err().is_not_found());
        assert!(!cache.contains(&key("404")));
        assert!(!cache.is_pending(&key("404")));

        // A later call retries.
        let retried = cache.get_or_fetch(key("404"), || async { Ok(3) }).await;
        assert_eq!(retried.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let cache = MemoCache::<u32>::new();
        cache.get_or_fetch(key("1"), || async { Ok(1) }).await.unwrap();
        assert!(cache.contains(&key("1")));

        cache.clear();
        assert!(cache.is_empty());

        let value = cache.get_or_fetch(key("1"), || async { Ok(2) }).await.unwrap();
        assert_eq!(value, 2);
    }

    #[tokio::test]
    async fn test_fetch_completing_after_clear_is_not_stored() {
        let cache = MemoCache::<u32>::new();
        let (release, gate) = oneshot::channel::<()>();

        let pending = cache.get_or_fetch(key("1"), move || async move {
            let _ = gate.await;
            Ok(1)
        });
        let clear_then_release = async {
            tokio::task::yield_now().await;
            cache.clear();
            let _ = release.send(());
        };

        let (value, ()) = futures::join!(pending, clear_then_release);
        assert_eq!(value.unwrap(), 1);
        assert!(!cache.contains(&key("1")));
    }

    #[test]
    fn test_insert_alias() {
        let cache = MemoCache::<Arc<String>>::new();
        let value = Arc::new("bulbasaur".to_string());
        cache.insert(key("1"), value.clone());
        cache.insert(key("bulbasaur"), value.clone());
        assert_eq!(cache.len(), 2);
        let by_id = cache.get(&key("1")).unwrap();
        let by_name = cache.get(&key("bulbasaur")).unwrap();
        assert!(Arc::ptr_eq(&by_id, &by_name));
    }
}
