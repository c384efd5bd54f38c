//! Reporting utilities: burger totals, cost shares, and formatted terminal output.

pub mod format;

pub use format::{format_price_summary, format_trend_table};

use crate::domain::{HistoricalPoint, IngredientPrice};

/// Change in composite cost between the first and last trend points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendChange {
    pub absolute: f64,
    pub percent: f64,
}

/// Cost of one burger: the sum of every component's serving cost.
pub fn burger_total(prices: &[IngredientPrice]) -> f64 {
    prices.iter().map(|p| p.serving_cost).sum()
}

/// Each component's fraction of the burger total, in input order.
///
/// All zeros when the total is zero.
pub fn cost_shares(prices: &[IngredientPrice]) -> Vec<f64> {
    let total = burger_total(prices);
    prices
        .iter()
        .map(|p| if total != 0.0 { p.serving_cost / total } else { 0.0 })
        .collect()
}

pub fn trend_change(points: &[HistoricalPoint]) -> Option<TrendChange> {
    let first = points.first()?;
    let last = points.last()?;
    if first.total_cost == 0.0 {
        return None;
    }
    let absolute = last.total_cost - first.total_cost;
    Some(TrendChange {
        absolute,
        percent: absolute / first.total_cost * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::Component;

    #[test]
    fn shares_sum_to_one() {
        let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let prices: Vec<IngredientPrice> = Component::ALL
            .iter()
            .map(|c| IngredientPrice::from_observation(&c.spec(), 3.0, as_of))
            .collect();

        let shares = cost_shares(&prices);
        assert_eq!(shares.len(), 7);
        assert!((shares.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        // The bun weighs in at a full unit, so it dominates at equal prices.
        let bun = Component::ALL.iter().position(|c| *c == Component::HamburgerBun).unwrap();
        assert!(shares.iter().all(|s| *s <= shares[bun]));
    }

    #[test]
    fn shares_are_zero_for_empty_total() {
        assert!(cost_shares(&[]).is_empty());
        assert_eq!(trend_change(&[]), None);
    }
}
