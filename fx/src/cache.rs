//! Two-entry exchange data cache with per-entry TTL.

use std::sync::Arc;

use chrono::Duration;
use parking_lot::RwLock;
use ratepath_common::{constants, Clock, Currency, ExchangeEdge, SystemClock, Timestamp};
use tracing::debug;

/// Cached value with its insertion time and lifetime.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: Vec<T>,
    cached_at: Timestamp,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn is_valid_at(&self, now: Timestamp) -> bool {
        now.signed_duration_since(self.cached_at) < self.ttl
    }
}

/// A single named slot. Value and timestamp share one lock so readers
/// never pair a fresh value with a stale timestamp.
#[derive(Debug)]
struct Slot<T> {
    name: &'static str,
    entry: RwLock<Option<CacheEntry<T>>>,
}

impl<T: Clone> Slot<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            entry: RwLock::new(None),
        }
    }

    fn get(&self, now: Timestamp) -> Option<Vec<T>> {
        {
            let guard = self.entry.read();
            match guard.as_ref() {
                Some(entry) if entry.is_valid_at(now) => {
                    debug!(entry = self.name, "Cache hit");
                    return Some(entry.value.clone());
                }
                Some(_) => debug!(entry = self.name, "Cache entry expired"),
                None => {
                    debug!(entry = self.name, "Cache miss");
                    return None;
                }
            }
        }

        // Re-check under the write lock: a concurrent writer may have refreshed it.
        let mut guard = self.entry.write();
        if guard.as_ref().is_some_and(|e| !e.is_valid_at(now)) {
            *guard = None;
        }
        None
    }

    fn set(&self, value: Vec<T>, ttl: Duration, now: Timestamp) {
        debug!(entry = self.name, len = value.len(), ttl_secs = ttl.num_seconds(), "Cache set");
        *self.entry.write() = Some(CacheEntry {
            value,
            cached_at: now,
            ttl,
        });
    }

    fn clear(&self) {
        *self.entry.write() = None;
    }

    fn stats(&self, now: Timestamp) -> EntryStats {
        match self.entry.read().as_ref() {
            Some(entry) => EntryStats {
                present: true,
                fresh: entry.is_valid_at(now),
                len: entry.value.len(),
            },
            None => EntryStats::default(),
        }
    }
}

/// Configuration for the tiered cache.
#[derive(Debug, Clone)]
pub struct TieredCacheConfig {
    /// TTL of the `currency` entry.
    pub currency_ttl: Duration,
    /// TTL of the `currencyExchange` entry.
    pub exchange_ttl: Duration,
}

impl Default for TieredCacheConfig {
    fn default() -> Self {
        Self {
            currency_ttl: constants::currency_cache_ttl(),
            exchange_ttl: constants::exchange_cache_ttl(),
        }
    }
}

/// Thread-safe cache holding the known currencies and the known exchange edges.
///
/// The two entries expire independently. Expired entries are dropped lazily
/// on read and are never returned.
pub struct TieredCache {
    currencies: Slot<Currency>,
    exchanges: Slot<ExchangeEdge>,
    clock: Arc<dyn Clock>,
    config: TieredCacheConfig,
}

impl TieredCache {
    /// Create a new cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(TieredCacheConfig::default())
    }

    /// Create a new cache with custom configuration.
    pub fn with_config(config: TieredCacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a new cache reading time from `clock`.
    pub fn with_clock(config: TieredCacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            currencies: Slot::new("currency"),
            exchanges: Slot::new("currencyExchange"),
            clock,
            config,
        }
    }

    /// Get the cached currencies if fresh.
    pub fn get_currencies(&self) -> Option<Vec<Currency>> {
        self.currencies.get(self.clock.now())
    }

    /// Store currencies with the configured TTL.
    pub fn set_currencies(&self, currencies: Vec<Currency>) {
        self.set_currencies_with_ttl(currencies, self.config.currency_ttl);
    }

    /// Store currencies with a custom TTL.
    pub fn set_currencies_with_ttl(&self, currencies: Vec<Currency>, ttl: Duration) {
        self.currencies.set(currencies, ttl, self.clock.now());
    }

    /// Get the cached exchange edges if fresh.
    pub fn get_exchanges(&self) -> Option<Vec<ExchangeEdge>> {
        self.exchanges.get(self.clock.now())
    }

    /// Store exchange edges with the configured TTL.
    pub fn set_exchanges(&self, edges: Vec<ExchangeEdge>) {
        self.set_exchanges_with_ttl(edges, self.config.exchange_ttl);
    }

    /// Store exchange edges with a custom TTL.
    pub fn set_exchanges_with_ttl(&self, edges: Vec<ExchangeEdge>, ttl: Duration) {
        self.exchanges.set(edges, ttl, self.clock.now());
    }

    /// Drop both entries.
    pub fn clear(&self) {
        self.currencies.clear();
        self.exchanges.clear();
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        CacheStats {
            currency: self.currencies.stats(now),
            exchange: self.exchanges.stats(now),
        }
    }
}

impl Default for TieredCache {
    fn default() -> Self {
        Self::new()
    }
}

/// State of one cache entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryStats {
    pub present: bool,
    pub fresh: bool,
    pub len: usize,
}

/// Cache statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub currency: EntryStats,
    pub exchange: EntryStats,
}
