//! Shared domain types.
//!
//! These are the records handed across the API boundary, so they serialize in
//! the camelCase shape the dashboard consumes.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::{Component, ComponentSpec, ServingUnit};

/// Attribution attached to every current-price record.
pub const PRICE_SOURCE: &str = "FRED";

/// Default trend length when the caller gives none (or an unusable one).
pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// One dated value from an upstream series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Current price of one component and what it contributes to a single burger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientPrice {
    pub name: String,
    pub price_per_unit: f64,
    pub serving_weight: f64,
    pub serving_unit: ServingUnit,
    pub serving_cost: f64,
    pub last_updated: NaiveDate,
    pub source: String,
}

impl IngredientPrice {
    pub fn from_observation(spec: &ComponentSpec, price_per_unit: f64, as_of: NaiveDate) -> Self {
        Self {
            name: spec.component.display_name().to_string(),
            price_per_unit,
            serving_weight: spec.serving_weight,
            serving_unit: spec.serving_unit,
            serving_cost: spec.serving_cost(price_per_unit),
            last_updated: as_of,
            source: PRICE_SOURCE.to_string(),
        }
    }
}

/// Composite burger cost on one date.
///
/// Serializes flat: `{"date": .., "totalCost": .., "GroundBeef": .., ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub total_cost: f64,
    #[serde(flatten)]
    pub costs: BTreeMap<Component, f64>,
}

impl HistoricalPoint {
    /// Build a point whose total is the sum of `costs`.
    pub fn from_costs(date: NaiveDate, costs: BTreeMap<Component, f64>) -> Self {
        let total_cost = costs.values().sum();
        Self {
            date,
            total_cost,
            costs,
        }
    }

    pub fn cost_of(&self, component: Component) -> Option<f64> {
        self.costs.get(&component).copied()
    }
}

/// Cache key for a trend request, displayed as `"<months>M"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RangeKey(u32);

impl RangeKey {
    pub fn new(months: u32) -> Self {
        Self(months)
    }

    /// Interpret a raw `months` query value.
    ///
    /// Missing, non-numeric, zero, and negative inputs all fall back to
    /// [`DEFAULT_TREND_MONTHS`].
    pub fn from_query(raw: Option<&str>) -> Self {
        let months = raw
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|m| *m > 0)
            .and_then(|m| u32::try_from(m).ok())
            .unwrap_or(DEFAULT_TREND_MONTHS);
        Self(months)
    }

    pub fn months(self) -> u32 {
        self.0
    }
}

impl Default for RangeKey {
    fn default() -> Self {
        Self(DEFAULT_TREND_MONTHS)
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}M", self.0)
    }
}
