//! In-process cache for aggregated prices.
//!
//! One current-price slice plus one historical slice per range key. Each slice
//! remembers when it was written and is served only while younger than the
//! freshness window, so refreshing one slice never extends the life of another.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::Instant;

use crate::domain::{HistoricalPoint, IngredientPrice, RangeKey};

/// How long a cached result is served before the aggregator runs again.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(60 * 60);

/// Identifies one cache slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Current,
    Historical(RangeKey),
}

#[derive(Debug, Clone)]
struct Slot<T> {
    value: T,
    stored_at: Instant,
}

impl<T: Clone> Slot<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    fn fresh(&self, window: Duration) -> Option<T> {
        (self.stored_at.elapsed() <= window).then(|| self.value.clone())
    }
}

#[derive(Debug, Default)]
struct CacheEntry {
    current: Option<Slot<Vec<IngredientPrice>>>,
    historical: HashMap<RangeKey, Slot<Vec<HistoricalPoint>>>,
}

/// Which slices would currently be served from cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatus {
    pub current: bool,
    pub ranges: Vec<RangeKey>,
}

#[derive(Debug)]
pub struct PriceCache {
    freshness: Duration,
    entry: RwLock<CacheEntry>,
}

impl PriceCache {
    pub fn new(freshness: Duration) -> Self {
        Self {
            freshness,
            entry: RwLock::new(CacheEntry::default()),
        }
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    pub fn get_current(&self) -> Option<Vec<IngredientPrice>> {
        self.entry.read().current.as_ref()?.fresh(self.freshness)
    }

    pub fn set_current(&self, prices: Vec<IngredientPrice>) {
        self.entry.write().current = Some(Slot::new(prices));
    }

    pub fn get_historical(&self, range: RangeKey) -> Option<Vec<HistoricalPoint>> {
        self.entry.read().historical.get(&range)?.fresh(self.freshness)
    }

    pub fn set_historical(&self, range: RangeKey, points: Vec<HistoricalPoint>) {
        self.entry.write().historical.insert(range, Slot::new(points));
    }

    pub fn status(&self) -> CacheStatus {
        let entry = self.entry.read();
        let current = entry
            .current
            .as_ref()
            .is_some_and(|slot| slot.stored_at.elapsed() <= self.freshness);
        let mut ranges: Vec<RangeKey> = entry
            .historical
            .iter()
            .filter(|(_, slot)| slot.stored_at.elapsed() <= self.freshness)
            .map(|(key, _)| *key)
            .collect();
        ranges.sort();
        CacheStatus { current, ranges }
    }

    pub fn clear(&self) {
        *self.entry.write() = CacheEntry::default();
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(DEFAULT_FRESHNESS)
    }
}
