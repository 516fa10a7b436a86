//! Stale-while-revalidate cache keyed by resolved request URL.
//!
//! Each key holds the last successful JSON value, the last error, and at
//! most one in-flight request. Callers asking for a key that is already
//! being fetched await the same request instead of issuing another one.
//! Data stays readable while a refresh runs, so `peek` during a refresh
//! returns the previous value with `is_validating` set.
//!
//! Inside a Tokio runtime every request is also spawned as a task, so it
//! runs to completion even when all of its callers are dropped.

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use bizadmin_api::Error;
use dashmap::DashMap;
use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use serde_json::Value;

/// Produces a fresh value for one cache key.
pub type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, Result<Value, Error>> + Send + Sync>;

type InFlight = Shared<BoxFuture<'static, Fetched>>;

/// Outcome of one request, as seen by everyone awaiting it.
#[derive(Clone)]
struct Fetched {
    result: Result<Arc<Value>, Error>,
    /// The result was written to the entry. False when the request was
    /// detached by a mutation or the entry was removed meanwhile.
    stored: bool,
}

impl Fetched {
    /// Snapshot for awaiters of a request whose result was not stored.
    fn into_snapshot(self) -> CacheSnapshot {
        match self.result {
            Ok(value) => CacheSnapshot {
                data: Some(value),
                state: EntryState::Success,
                ..CacheSnapshot::default()
            },
            Err(err) => CacheSnapshot {
                error: Some(err),
                state: EntryState::Error,
                ..CacheSnapshot::default()
            },
        }
    }
}

/// When the cache refetches on its own. Everything is off by default:
/// a key is fetched once and only refetched after an explicit
/// `mutate`/`revalidate`/invalidation or a change of key.
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub revalidate_on_focus: bool,
    pub revalidate_on_reconnect: bool,
    /// Refetch on `get` when the value is older than `stale_after`.
    pub revalidate_if_stale: bool,
    pub stale_after: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            revalidate_on_focus: false,
            revalidate_on_reconnect: false,
            revalidate_if_stale: false,
            stale_after: Duration::from_secs(300),
        }
    }
}

/// Lifecycle of one key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntryState {
    #[default]
    Idle,
    Fetching,
    Success,
    Error,
}

/// Point-in-time view of one key.
#[derive(Clone, Debug, Default)]
pub struct CacheSnapshot {
    pub data: Option<Arc<Value>>,
    pub error: Option<Error>,
    /// A request is in flight and there is no data to show yet.
    pub is_loading: bool,
    /// A request is in flight, with or without data.
    pub is_validating: bool,
    pub state: EntryState,
}

#[derive(Default)]
struct CacheEntry {
    data: Option<Arc<Value>>,
    error: Option<Error>,
    in_flight: Option<InFlight>,
    /// Id of the request whose result may still be written to this entry.
    fetch_id: Option<u64>,
    fetcher: Option<Fetcher>,
    tags: HashSet<String>,
    invalidated: bool,
    updated_at: Option<Instant>,
}

impl CacheEntry {
    fn state(&self) -> EntryState {
        if self.in_flight.is_some() {
            EntryState::Fetching
        } else if self.error.is_some() {
            EntryState::Error
        } else if self.data.is_some() {
            EntryState::Success
        } else {
            EntryState::Idle
        }
    }

    fn snapshot(&self) -> CacheSnapshot {
        let is_validating = self.in_flight.is_some();
        CacheSnapshot {
            data: self.data.clone(),
            error: self.error.clone(),
            is_loading: is_validating && self.data.is_none(),
            is_validating,
            state: self.state(),
        }
    }

    fn needs_fetch(&self, config: &CacheConfig) -> bool {
        if self.in_flight.is_some() || self.invalidated || self.data.is_none() {
            return true;
        }
        config.revalidate_if_stale
            && self
                .updated_at
                .map_or(true, |at| at.elapsed() >= config.stale_after)
    }

    /// Forgets the in-flight request. Whoever awaits it still gets its
    /// result, but the result is no longer written here.
    fn detach(&mut self) {
        self.in_flight = None;
        self.fetch_id = None;
    }
}

struct Inner {
    entries: DashMap<String, CacheEntry>,
    config: CacheConfig,
    next_fetch_id: AtomicU64,
}

impl Inner {
    /// Writes a finished request into its entry. Returns false when the
    /// entry is gone or no longer waits for this request.
    fn complete(&self, key: &str, fetch_id: u64, result: &Result<Arc<Value>, Error>) -> bool {
        let Some(mut entry) = self.entries.get_mut(key) else {
            tracing::debug!("dropping response for evicted key {}", key);
            return false;
        };
        if entry.fetch_id != Some(fetch_id) {
            tracing::debug!("discarding superseded response for {}", key);
            return false;
        }
        entry.detach();
        entry.updated_at = Some(Instant::now());
        match result {
            Ok(value) => {
                entry.data = Some(Arc::clone(value));
                entry.error = None;
            }
            Err(err) => {
                tracing::warn!("fetch failed for {}: {}", key, err);
                entry.error = Some(err.clone());
            }
        }
        true
    }
}

/// Shared, cheaply cloneable cache handle.
#[derive(Clone)]
pub struct SwrCache {
    inner: Arc<Inner>,
}

impl Default for SwrCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl fmt::Debug for SwrCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwrCache")
            .field("entries", &self.inner.entries.len())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl SwrCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: DashMap::new(),
                config,
                next_fetch_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    /// Returns the value for `key`, fetching it first when the key has no
    /// data yet, was invalidated, or is stale under `revalidate_if_stale`.
    /// If a refresh is already running and there is data, the current data
    /// is returned at once with `is_validating` set.
    ///
    /// A `None` key disables the query: nothing is fetched and an idle
    /// snapshot is returned. `fetcher` replaces any fetcher previously
    /// registered for the key and is reused by `revalidate`/`mutate`.
    /// `tags` are added to the key's tag set for `invalidate_tag`.
    pub async fn get<F, Fut>(&self, key: Option<&str>, tags: &[&str], fetcher: F) -> CacheSnapshot
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, Error>> + Send + 'static,
    {
        let Some(key) = key else {
            return CacheSnapshot::default();
        };
        let fetcher: Fetcher = Arc::new(move || fetcher().boxed());

        let in_flight = {
            let mut entry = self.inner.entries.entry(key.to_string()).or_default();
            entry.fetcher = Some(fetcher);
            entry.tags.extend(tags.iter().map(|t| t.to_string()));
            if entry.in_flight.is_some() && entry.data.is_some() {
                tracing::debug!("serving stale value while revalidating: {}", key);
                return entry.snapshot();
            }
            if !entry.needs_fetch(&self.inner.config) {
                tracing::debug!("cache hit: {}", key);
                return entry.snapshot();
            }
            self.start_fetch(key, &mut entry)
        };
        self.settle(key, in_flight).await
    }

    /// Current snapshot of `key` without fetching.
    pub fn peek(&self, key: Option<&str>) -> CacheSnapshot {
        key.and_then(|key| self.inner.entries.get(key).map(|e| e.snapshot()))
            .unwrap_or_default()
    }

    pub fn state(&self, key: &str) -> EntryState {
        self.inner
            .entries
            .get(key)
            .map(|e| e.state())
            .unwrap_or_default()
    }

    /// Refetches `key` with its registered fetcher, joining the in-flight
    /// request if there is one. Unknown keys are left alone.
    pub async fn revalidate(&self, key: &str) -> CacheSnapshot {
        let in_flight = {
            let Some(mut entry) = self.inner.entries.get_mut(key) else {
                return CacheSnapshot::default();
            };
            self.start_fetch(key, &mut entry)
        };
        self.settle(key, in_flight).await
    }

    /// Replaces the data of `key` when `data` is given, then refetches it.
    ///
    /// Any request that was already in flight for the key can no longer
    /// overwrite the entry. Without a registered fetcher the key is only
    /// marked for refetch on the next `get`.
    pub async fn mutate(&self, key: &str, data: Option<Value>) -> CacheSnapshot {
        let in_flight = {
            let mut entry = self.inner.entries.entry(key.to_string()).or_default();
            entry.detach();
            entry.invalidated = true;
            if let Some(data) = data {
                entry.data = Some(Arc::new(data));
                entry.error = None;
                entry.updated_at = Some(Instant::now());
            }
            self.start_fetch(key, &mut entry)
        };
        self.settle(key, in_flight).await
    }

    /// Marks `key` for refetch on its next `get`. Returns whether it existed.
    pub fn invalidate(&self, key: &str) -> bool {
        match self.inner.entries.get_mut(key) {
            Some(mut entry) => {
                entry.detach();
                entry.invalidated = true;
                true
            }
            None => false,
        }
    }

    /// Marks every key carrying `tag` for refetch. Returns how many keys
    /// were marked.
    pub fn invalidate_tag(&self, tag: &str) -> usize {
        let mut count = 0;
        for mut entry in self.inner.entries.iter_mut() {
            if entry.tags.contains(tag) {
                entry.detach();
                entry.invalidated = true;
                count += 1;
            }
        }
        tracing::debug!("invalidated {} keys tagged {}", count, tag);
        count
    }

    /// Refetches every key carrying `tag` concurrently.
    pub async fn revalidate_tag(&self, tag: &str) -> usize {
        let keys = self.keys_for_tag(tag);
        join_all(keys.iter().map(|key| self.revalidate(key))).await;
        keys.len()
    }

    pub fn keys_for_tag(&self, tag: &str) -> Vec<String> {
        self.inner
            .entries
            .iter()
            .filter(|e| e.tags.contains(tag))
            .map(|e| e.key().clone())
            .collect()
    }

    /// The application regained focus. Refetches every key when
    /// `revalidate_on_focus` is set; returns how many were refetched.
    pub async fn notify_focus(&self) -> usize {
        if !self.inner.config.revalidate_on_focus {
            return 0;
        }
        self.revalidate_all().await
    }

    /// The network came back. Refetches every key when
    /// `revalidate_on_reconnect` is set.
    pub async fn notify_reconnect(&self) -> usize {
        if !self.inner.config.revalidate_on_reconnect {
            return 0;
        }
        self.revalidate_all().await
    }

    async fn revalidate_all(&self) -> usize {
        let keys: Vec<String> = self
            .inner
            .entries
            .iter()
            .filter(|e| e.fetcher.is_some())
            .map(|e| e.key().clone())
            .collect();
        join_all(keys.iter().map(|key| self.revalidate(key))).await;
        keys.len()
    }

    /// Handle bound to one key, for consumers that only need to refresh it.
    pub fn handle(&self, key: &str) -> MutateHandle {
        MutateHandle {
            cache: self.clone(),
            key: key.to_string(),
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        self.inner.entries.remove(key).is_some()
    }

    /// Removes all entries from the cache.
    pub fn clear(&self) {
        self.inner.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Awaits `in_flight` and reports the key. A request detached while it
    /// ran still hands its own result to the caller that waited for it.
    async fn settle(&self, key: &str, in_flight: Option<InFlight>) -> CacheSnapshot {
        let Some(in_flight) = in_flight else {
            return self.peek(Some(key));
        };
        let fetched = in_flight.await;
        if fetched.stored {
            self.peek(Some(key))
        } else {
            fetched.into_snapshot()
        }
    }

    fn start_fetch(&self, key: &str, entry: &mut CacheEntry) -> Option<InFlight> {
        if let Some(in_flight) = &entry.in_flight {
            tracing::debug!("joining in-flight request: {}", key);
            return Some(in_flight.clone());
        }
        let fetcher = entry.fetcher.clone()?;
        let fetch_id = self.inner.next_fetch_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("fetching {} (#{})", key, fetch_id);

        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        let owned_key = key.to_string();
        let fut = async move {
            let result = (*fetcher)().await.map(Arc::new);
            let stored = inner
                .upgrade()
                .is_some_and(|inner| inner.complete(&owned_key, fetch_id, &result));
            Fetched { result, stored }
        }
        .boxed()
        .shared();

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(fut.clone());
            }
            Err(_) => tracing::debug!("no runtime, {} is driven by its callers", key),
        }

        entry.invalidated = false;
        entry.fetch_id = Some(fetch_id);
        entry.in_flight = Some(fut.clone());
        Some(fut)
    }
}

/// A cache key plus the cache it lives in.
#[derive(Clone, Debug)]
pub struct MutateHandle {
    cache: SwrCache,
    key: String,
}

impl MutateHandle {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn mutate(&self, data: Option<Value>) -> CacheSnapshot {
        self.cache.mutate(&self.key, data).await
    }

    pub async fn revalidate(&self) -> CacheSnapshot {
        self.cache.revalidate(&self.key).await
    }

    pub fn invalidate(&self) -> bool {
        self.cache.invalidate(&self.key)
    }
}
