//! Read-through price service: cache first, aggregator on a miss.
//!
//! Misses are coalesced per cache key. The first caller to miss takes the key's
//! refresh lock and fetches; callers that queued behind it re-check the cache
//! once they get the lock and find the fresh result there.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::data::PriceSource;
use crate::domain::{HistoricalPoint, IngredientPrice, RangeKey};
use crate::error::Error;
use crate::pricing::aggregator::PriceAggregator;
use crate::pricing::cache::{CacheKey, PriceCache};

pub struct PriceService<S> {
    aggregator: PriceAggregator<S>,
    cache: Arc<PriceCache>,
    refresh_locks: DashMap<CacheKey, Arc<Mutex<()>>>,
}

impl<S: PriceSource> PriceService<S> {
    pub fn new(aggregator: PriceAggregator<S>, cache: Arc<PriceCache>) -> Self {
        Self {
            aggregator,
            cache,
            refresh_locks: DashMap::new(),
        }
    }

    pub fn cache(&self) -> &Arc<PriceCache> {
        &self.cache
    }

    pub fn aggregator(&self) -> &PriceAggregator<S> {
        &self.aggregator
    }

    pub async fn current_prices(&self) -> Result<Vec<IngredientPrice>, Error> {
        if let Some(prices) = self.cache.get_current() {
            debug!("current prices served from cache");
            return Ok(prices);
        }

        let lock = self.refresh_lock(CacheKey::Current);
        let _guard = lock.lock().await;
        if let Some(prices) = self.cache.get_current() {
            debug!("current prices filled by a concurrent refresh");
            return Ok(prices);
        }

        debug!("current prices cache miss");
        let prices = self.aggregator.current_prices().await?;
        self.cache.set_current(prices.clone());
        Ok(prices)
    }

    pub async fn price_history(&self, range: RangeKey) -> Result<Vec<HistoricalPoint>, Error> {
        if let Some(points) = self.cache.get_historical(range) {
            debug!(%range, "price history served from cache");
            return Ok(points);
        }

        let lock = self.refresh_lock(CacheKey::Historical(range));
        let _guard = lock.lock().await;
        if let Some(points) = self.cache.get_historical(range) {
            debug!(%range, "price history filled by a concurrent refresh");
            return Ok(points);
        }

        debug!(%range, "price history cache miss");
        let points = self.aggregator.price_trends(range.months()).await?;
        self.cache.set_historical(range, points.clone());
        Ok(points)
    }

    fn refresh_lock(&self, key: CacheKey) -> Arc<Mutex<()>> {
        self.refresh_locks.entry(key).or_default().value().clone()
    }
}
