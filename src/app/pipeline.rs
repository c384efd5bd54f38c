//! Shared service wiring used by both the server and the one-shot commands.
//!
//! FRED client -> aggregator (standard catalog) -> cache -> service

use std::sync::Arc;
use std::time::Duration;

use crate::cli::SourceArgs;
use crate::data::FredClient;
use crate::data::fred::FredConfig;
use crate::domain::Catalog;
use crate::error::AppError;
use crate::pricing::{PriceAggregator, PriceCache, PriceService};

pub fn fred_config(args: &SourceArgs) -> FredConfig {
    FredConfig {
        base_url: args.fred_base_url.clone(),
        timeout: args.upstream_timeout_secs.map(Duration::from_secs),
    }
}

/// Build the read-through service backed by FRED.
///
/// The API key is read from the environment exactly once, here.
pub fn build_service(
    args: &SourceArgs,
    freshness: Duration,
) -> Result<PriceService<FredClient>, AppError> {
    let client = FredClient::from_env(&fred_config(args))?;
    let aggregator = PriceAggregator::new(client, Catalog::standard());
    let cache = Arc::new(PriceCache::new(freshness));
    Ok(PriceService::new(aggregator, cache))
}
