use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use std::time::Duration;

use lru::LruCache;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, warn};

use super::{EnrichmentError, EnrichmentRecord, MetadataSource};

type InFlightMap = HashMap<i64, Arc<OnceCell<EnrichmentRecord>>>;

pub const DEFAULT_CACHE_CAPACITY: usize = 100;
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    /// Lookups that went to the metadata source.
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

/// Bounded LRU memo in front of a [`MetadataSource`].
///
/// Failed lookups are cached as empty records and never retried while the
/// entry survives. Concurrent misses for the same id share one lookup.
pub struct EnrichmentCache {
    source: Arc<dyn MetadataSource>,
    lookup_timeout: Duration,
    entries: Mutex<LruCache<i64, EnrichmentRecord>>,
    /// Never held across an `.await`, so it is also safe to lock on drop.
    in_flight: StdMutex<InFlightMap>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl EnrichmentCache {
    pub fn new(source: Arc<dyn MetadataSource>, capacity: NonZeroUsize) -> Self {
        Self {
            source,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            entries: Mutex::new(LruCache::new(capacity)),
            in_flight: StdMutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Upper bound on a single metadata lookup.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Cached record for `item_id`, fetching it once on a miss.
    pub async fn get(&self, item_id: i64) -> EnrichmentRecord {
        if let Some(record) = self.entries.lock().await.get(&item_id) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return record.clone();
        }

        let waiter = InFlightWaiter::join(&self.in_flight, item_id);
        let record = waiter
            .cell
            .get_or_init(|| self.fetch(item_id))
            .await
            .clone();

        self.insert(item_id, record.clone()).await;
        record
    }

    /// Cached record without touching recency or fetching.
    pub async fn peek(&self, item_id: i64) -> Option<EnrichmentRecord> {
        self.entries.lock().await.peek(&item_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub async fn capacity(&self) -> usize {
        self.entries.lock().await.cap().get()
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().await;
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: entries.len(),
            capacity: entries.cap().get(),
        }
    }

    async fn fetch(&self, item_id: i64) -> EnrichmentRecord {
        self.misses.fetch_add(1, Ordering::Relaxed);
        let outcome = match tokio::time::timeout(self.lookup_timeout, self.source.fetch(item_id))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(EnrichmentError::Timeout(self.lookup_timeout)),
        };

        match outcome {
            Ok(record) => {
                debug!(
                    item_id,
                    has_artwork = record.has_artwork(),
                    "metadata lookup succeeded"
                );
                record
            }
            Err(e) => {
                warn!(item_id, error = %e, "metadata lookup failed; caching empty record");
                EnrichmentRecord::empty()
            }
        }
    }

    async fn insert(&self, item_id: i64, record: EnrichmentRecord) {
        let mut entries = self.entries.lock().await;
        if let Some((evicted, _)) = entries.push(item_id, record) {
            if evicted != item_id {
                debug!(item_id, evicted, "enrichment cache full; evicted least recently used");
            }
        }
    }
}

fn lock_in_flight(in_flight: &StdMutex<InFlightMap>) -> MutexGuard<'_, InFlightMap> {
    in_flight.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One caller's share of an in-flight lookup.
///
/// The last waiter to leave removes the entry, whether it finished or was
/// cancelled mid-lookup.
struct InFlightWaiter<'a> {
    in_flight: &'a StdMutex<InFlightMap>,
    item_id: i64,
    cell: Arc<OnceCell<EnrichmentRecord>>,
}

impl<'a> InFlightWaiter<'a> {
    fn join(in_flight: &'a StdMutex<InFlightMap>, item_id: i64) -> Self {
        let cell = Arc::clone(lock_in_flight(in_flight).entry(item_id).or_default());
        Self {
            in_flight,
            item_id,
            cell,
        }
    }
}

impl Drop for InFlightWaiter<'_> {
    fn drop(&mut self) {
        let mut in_flight = lock_in_flight(self.in_flight);
        let Some(current) = in_flight.get(&self.item_id) else {
            return;
        };
        // map + this waiter hold the only references
        if Arc::ptr_eq(current, &self.cell) && Arc::strong_count(&self.cell) == 2 {
            in_flight.remove(&self.item_id);
        }
    }
}
