//! Turns raw series observations into burger costs.
//!
//! Two modes share the same catalog:
//!
//! - current: latest observation per component -> flat list of `IngredientPrice`
//! - trend: windowed history per component -> date-aligned `HistoricalPoint`s
//!
//! Every per-series request in one call is issued concurrently, and the first
//! failure fails the whole call.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Months, NaiveDate, Utc};
use futures::future::try_join_all;
use tracing::{debug, info};

use crate::data::{PriceSource, SeriesQuery};
use crate::domain::{Catalog, ComponentSpec, HistoricalPoint, IngredientPrice};
use crate::error::Error;

pub struct PriceAggregator<S> {
    source: S,
    catalog: Catalog,
}

impl<S: PriceSource> PriceAggregator<S> {
    pub fn new(source: S, catalog: Catalog) -> Self {
        Self { source, catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Latest price of every catalog component, stamped with today's UTC date.
    pub async fn current_prices(&self) -> Result<Vec<IngredientPrice>, Error> {
        self.current_prices_as_of(Utc::now().date_naive()).await
    }

    pub async fn current_prices_as_of(&self, today: NaiveDate) -> Result<Vec<IngredientPrice>, Error> {
        let fetches = self.catalog.entries().iter().map(|spec| async move {
            let observations = self
                .source
                .fetch_observations(&SeriesQuery::latest(spec.series_id))
                .await?;
            let latest = observations.into_iter().next().ok_or_else(|| Error::EmptySeries {
                series_id: spec.series_id.to_string(),
            })?;
            Ok::<_, Error>(IngredientPrice::from_observation(spec, latest.value, today))
        });

        let prices = try_join_all(fetches).await?;
        info!(components = prices.len(), "aggregated current prices");
        Ok(prices)
    }

    /// Composite cost per date over roughly the last `months` months.
    pub async fn price_trends(&self, months: u32) -> Result<Vec<HistoricalPoint>, Error> {
        self.price_trends_as_of(months, Utc::now().date_naive()).await
    }

    pub async fn price_trends_as_of(
        &self,
        months: u32,
        today: NaiveDate,
    ) -> Result<Vec<HistoricalPoint>, Error> {
        let (start, end) = trend_window(months, today);

        let fetches = self.catalog.entries().iter().map(|spec| async move {
            let observations = self
                .source
                .fetch_observations(&SeriesQuery::range(spec.series_id, start, end))
                .await?;
            let mut by_date = BTreeMap::new();
            for obs in observations {
                by_date.entry(obs.date).or_insert(obs.value);
            }
            Ok::<_, Error>((*spec, by_date))
        });

        let series = try_join_all(fetches).await?;
        let points = align_series(&series);
        info!(
            months,
            %start,
            %end,
            points = points.len(),
            "aggregated price trends"
        );
        Ok(points)
    }
}

/// Query window for a trend of `months` months ending `today`.
///
/// The start is padded by one extra month so the oldest monthly observations
/// inside the requested span are present.
pub fn trend_window(months: u32, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_months(Months::new(months.saturating_add(1)))
        .unwrap_or(NaiveDate::MIN);
    (start, today)
}

/// Align per-component series on their dates.
///
/// A date becomes a point only when every component has a value for it and the
/// summed cost is non-zero; anything else is dropped.
pub fn align_series(series: &[(ComponentSpec, BTreeMap<NaiveDate, f64>)]) -> Vec<HistoricalPoint> {
    let dates: BTreeSet<NaiveDate> = series
        .iter()
        .flat_map(|(_, by_date)| by_date.keys().copied())
        .collect();

    let mut points = Vec::with_capacity(dates.len());
    for date in dates {
        let mut costs = BTreeMap::new();
        let mut complete = true;
        for (spec, by_date) in series {
            match by_date.get(&date) {
                Some(value) => {
                    costs.insert(spec.component, spec.serving_cost(*value));
                }
                None => complete = false,
            }
        }

        let point = HistoricalPoint::from_costs(date, costs);
        // A zero composite is treated the same as missing data.
        if !complete || point.total_cost == 0.0 {
            debug!(%date, "skipping date with missing or incomplete data");
            continue;
        }
        points.push(point);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::domain::{Component, Observation};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// Serves canned observations per series id; unknown ids fail like a bad request.
    struct StaticSource {
        series: HashMap<&'static str, Vec<Observation>>,
    }

    impl StaticSource {
        fn new(series: Vec<(&'static str, Vec<Observation>)>) -> Self {
            Self {
                series: series.into_iter().collect(),
            }
        }
    }

    impl PriceSource for StaticSource {
        async fn fetch_observations(&self, query: &SeriesQuery<'_>) -> Result<Vec<Observation>, Error> {
            let mut obs = self
                .series
                .get(query.series_id)
                .cloned()
                .ok_or_else(|| Error::fetch(query.series_id, "status 400 Bad Request"))?;
            if query.sort_order == crate::data::SortOrder::Desc {
                obs.reverse();
            }
            if let crate::data::QueryWindow::Limit(n) = query.window {
                obs.truncate(n);
            }
            Ok(obs)
        }
    }

    fn standard_source(dates: &[NaiveDate]) -> StaticSource {
        let series = Component::ALL
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let obs = dates
                    .iter()
                    .enumerate()
                    .map(|(j, date)| Observation::new(*date, 1.0 + i as f64 + j as f64 * 0.5))
                    .collect();
                (c.series_id(), obs)
            })
            .collect();
        StaticSource::new(series)
    }

    #[tokio::test]
    async fn serving_cost_uses_latest_value() {
        let source = StaticSource::new(vec![(
            "BEEF",
            vec![Observation::new(d(2024, 1, 1), 3.0), Observation::new(d(2024, 2, 1), 4.0)],
        )]);
        let catalog = Catalog::new(vec![ComponentSpec {
            series_id: "BEEF",
            ..Component::GroundBeef.spec()
        }]);
        let aggregator = PriceAggregator::new(source, catalog);

        let prices = aggregator.current_prices_as_of(d(2025, 6, 30)).await.unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].name, "Ground Beef");
        assert_eq!(prices[0].price_per_unit, 4.0);
        assert_eq!(prices[0].serving_cost, 1.0);
        assert_eq!(prices[0].last_updated, d(2025, 6, 30));
        assert_eq!(prices[0].source, "FRED");
    }

    #[tokio::test]
    async fn current_prices_cover_full_catalog() {
        let aggregator = PriceAggregator::new(standard_source(&[d(2024, 5, 1)]), Catalog::standard());
        let prices = aggregator.current_prices().await.unwrap();

        assert_eq!(prices.len(), 7);
        let names: Vec<&str> = prices.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names[5], "Labor");
        assert_eq!(names[6], "Cooking Energy");
        for p in &prices {
            assert_eq!(p.serving_cost, p.price_per_unit * p.serving_weight);
        }
    }

    #[tokio::test]
    async fn one_failed_series_fails_current_prices() {
        let mut source = standard_source(&[d(2024, 5, 1)]);
        source.series.remove(Component::CookingEnergy.series_id());
        let aggregator = PriceAggregator::new(source, Catalog::standard());

        let err = aggregator.current_prices().await.unwrap_err();
        match err {
            Error::Fetch { series_id, .. } => assert_eq!(series_id, "APU000072610"),
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_series_fails_current_prices() {
        let mut source = standard_source(&[d(2024, 5, 1)]);
        source.series.insert(Component::Lettuce.series_id(), Vec::new());
        let aggregator = PriceAggregator::new(source, Catalog::standard());

        let err = aggregator.current_prices().await.unwrap_err();
        assert!(matches!(err, Error::EmptySeries { ref series_id } if series_id == "APU0000FL2101"));
    }

    #[tokio::test]
    async fn trend_drops_dates_missing_a_component() {
        let source = StaticSource::new(vec![
            (
                "A",
                vec![Observation::new(d(2024, 1, 1), 2.0), Observation::new(d(2024, 1, 2), 3.0)],
            ),
            ("B", vec![Observation::new(d(2024, 1, 2), 5.0)]),
        ]);
        let catalog = Catalog::new(vec![
            ComponentSpec {
                series_id: "A",
                serving_weight: 1.0,
                ..Component::GroundBeef.spec()
            },
            ComponentSpec {
                series_id: "B",
                serving_weight: 1.0,
                ..Component::Tomato.spec()
            },
        ]);
        let aggregator = PriceAggregator::new(source, catalog);

        let points = aggregator.price_trends_as_of(6, d(2024, 1, 31)).await.unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, d(2024, 1, 2));
        assert_eq!(points[0].total_cost, 8.0);
        assert_eq!(points[0].cost_of(Component::GroundBeef), Some(3.0));
        assert_eq!(points[0].cost_of(Component::Tomato), Some(5.0));
    }

    #[tokio::test]
    async fn trend_points_are_complete_and_summed() {
        let dates = [d(2024, 3, 1), d(2024, 1, 1), d(2024, 2, 1)];
        let aggregator = PriceAggregator::new(standard_source(&dates), Catalog::standard());

        let points = aggregator.price_trends(3).await.unwrap();
        assert_eq!(points.len(), 3);
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        for p in &points {
            assert_eq!(p.costs.len(), 7);
            let sum: f64 = p.costs.values().sum();
            assert_eq!(p.total_cost, sum);

            let obj = serde_json::to_value(p).unwrap();
            assert_eq!(obj.as_object().unwrap().len(), 9);
        }
    }

    #[tokio::test]
    async fn empty_series_yields_empty_trend() {
        let mut source = standard_source(&[d(2024, 1, 1), d(2024, 2, 1)]);
        source.series.insert(Component::Labor.series_id(), Vec::new());
        let aggregator = PriceAggregator::new(source, Catalog::standard());

        let points = aggregator.price_trends(6).await.unwrap();
        assert!(points.is_empty());
    }

    #[tokio::test]
    async fn failed_series_fails_trend() {
        let mut source = standard_source(&[d(2024, 1, 1)]);
        source.series.remove(Component::HamburgerBun.series_id());
        let aggregator = PriceAggregator::new(source, Catalog::standard());

        assert!(matches!(
            aggregator.price_trends(6).await,
            Err(Error::Fetch { .. })
        ));
    }

    #[test]
    fn zero_total_dates_are_dropped() {
        let spec = ComponentSpec {
            serving_weight: 1.0,
            ..Component::Lettuce.spec()
        };
        let mut by_date = BTreeMap::new();
        by_date.insert(d(2024, 1, 1), 0.0);
        by_date.insert(d(2024, 2, 1), 1.5);

        let points = align_series(&[(spec, by_date)]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, d(2024, 2, 1));
    }

    #[test]
    fn trend_window_pads_one_month() {
        assert_eq!(trend_window(6, d(2025, 8, 31)), (d(2025, 1, 31), d(2025, 8, 31)));
        // Month-end clamps to the shorter month.
        assert_eq!(trend_window(1, d(2025, 4, 30)), (d(2025, 2, 28), d(2025, 4, 30)));
        assert_eq!(trend_window(12, d(2025, 1, 15)), (d(2023, 12, 15), d(2025, 1, 15)));
    }
}
