//! FRED API integration for retail price, wage, and electricity series.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::data::source::{PriceSource, QueryWindow, SeriesQuery};
use crate::domain::Observation;
use crate::error::Error;

pub const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";
pub const API_KEY_ENV: &str = "FRED_API_KEY";

/// Connection settings for [`FredClient`].
#[derive(Debug, Clone)]
pub struct FredConfig {
    pub base_url: String,
    /// Whole-request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for FredConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FredClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FredClient {
    pub fn new(api_key: impl Into<String>, config: &FredConfig) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build FRED HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.clone(),
        })
    }

    /// Read the API key once from the environment (and `.env`).
    ///
    /// A missing key is not fatal here: requests go out with an empty key and
    /// FRED rejects them, so every fetch fails with [`Error::Fetch`].
    pub fn from_env(config: &FredConfig) -> Result<Self, Error> {
        dotenvy::dotenv().ok();
        let api_key = match std::env::var(API_KEY_ENV) {
            Ok(key) => key,
            Err(_) => {
                warn!("{API_KEY_ENV} is not set; upstream requests will fail authentication");
                String::new()
            }
        };
        Self::new(api_key, config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_series(&self, query: &SeriesQuery<'_>) -> Result<Vec<Observation>, Error> {
        let series_id = query.series_id;
        let mut params: Vec<(&str, String)> = vec![
            ("series_id", series_id.to_string()),
            ("api_key", self.api_key.clone()),
            ("file_type", "json".to_string()),
            ("sort_order", query.sort_order.as_str().to_string()),
        ];
        match query.window {
            QueryWindow::Limit(limit) => params.push(("limit", limit.to_string())),
            QueryWindow::Range { start, end } => {
                params.push(("observation_start", start.format("%Y-%m-%d").to_string()));
                params.push(("observation_end", end.format("%Y-%m-%d").to_string()));
            }
        }

        debug!(series_id, sort_order = query.sort_order.as_str(), "fetching FRED observations");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                warn!(series_id, error = %e, "FRED request failed");
                Error::fetch(series_id, format!("request failed: {e}"))
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(series_id, %status, "FRED returned an error status");
            return Err(Error::fetch(
                series_id,
                format!("status {status}: {}", truncate(&body, 500)),
            ));
        }

        let body: ObservationsResponse = resp
            .json()
            .await
            .map_err(|e| Error::fetch(series_id, format!("failed to parse response: {e}")))?;

        let mut out = Vec::with_capacity(body.observations.len());
        for obs in body.observations {
            let value = match parse_value(&obs.value) {
                Some(v) => v,
                None => continue,
            };
            let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d")
                .map_err(|e| Error::fetch(series_id, format!("invalid date '{}': {e}", obs.date)))?;
            out.push(Observation::new(date, value));
        }

        debug!(series_id, n_obs = out.len(), "fetched FRED observations");
        Ok(out)
    }
}

impl PriceSource for FredClient {
    async fn fetch_observations(&self, query: &SeriesQuery<'_>) -> Result<Vec<Observation>, Error> {
        self.fetch_series(query).await
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

/// FRED also sends `realtime_start`/`realtime_end`; revisions are not tracked.
#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

/// FRED encodes missing values as `"."`.
fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
