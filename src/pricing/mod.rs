//! Price aggregation and caching.
//!
//! `aggregator` talks to a `PriceSource`, `cache` holds results for the
//! freshness window, and `service` joins the two for request handlers.

pub mod aggregator;
pub mod cache;
pub mod service;

pub use aggregator::{PriceAggregator, align_series, trend_window};
pub use cache::{CacheKey, CacheStatus, DEFAULT_FRESHNESS, PriceCache};
pub use service::PriceService;
