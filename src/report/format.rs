//! Plain-text tables for the one-shot CLI commands.
//!
//! Formatting lives here so the aggregation code never deals with column widths.

use crate::domain::{Component, HistoricalPoint, IngredientPrice, ServingUnit};

use super::{burger_total, cost_shares, trend_change};

/// Current cost breakdown with each component's share of the burger.
pub fn format_price_summary(prices: &[IngredientPrice]) -> String {
    let mut out = String::new();

    out.push_str("=== Cheeseburger Price Index (FRED-based) ===\n");
    if let Some(first) = prices.first() {
        out.push_str(&format!("As-of: {}\n", first.last_updated));
    }
    out.push_str(&format!("Cost of one cheeseburger: ${:.2}\n\n", burger_total(prices)));

    out.push_str(
        format!(
            "{:<18} {:>10} {:>8} {:<6} {:>8} {:>7}\n",
            "component", "price", "weight", "unit", "cost", "share"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<18} {:-<10} {:-<8} {:-<6} {:-<8} {:-<7}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for (p, share) in prices.iter().zip(cost_shares(prices)) {
        out.push_str(
            format!(
                "{:<18} {:>10.3} {:>8.4} {:<6} {:>8.4} {:>6.1}%\n",
                truncate(&p.name, 18),
                p.price_per_unit,
                p.serving_weight,
                unit_label(p.serving_unit),
                p.serving_cost,
                share * 100.0,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// One row per date with the composite total and every component column.
pub fn format_trend_table(points: &[HistoricalPoint]) -> String {
    let mut out = String::new();

    if points.is_empty() {
        out.push_str("No dates with complete data in the requested range.\n");
        return out;
    }

    let columns: Vec<Component> = Component::ALL
        .into_iter()
        .filter(|c| points.iter().any(|p| p.costs.contains_key(c)))
        .collect();

    let mut header = format!("{:<10} {:>8}", "date", "total");
    let mut rule = format!("{:-<10} {:-<8}", "", "");
    for c in &columns {
        header.push_str(&format!(" {:>14}", c.key()));
        rule.push_str(&format!(" {:-<14}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for p in points {
        let mut row = format!("{:<10} {:>8.4}", p.date, p.total_cost);
        for c in &columns {
            match p.cost_of(*c) {
                Some(v) => row.push_str(&format!(" {v:>14.4}")),
                None => row.push_str(&format!(" {:>14}", "-")),
            }
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }

    if let Some(change) = trend_change(points) {
        out.push_str(&format!(
            "\nChange over range: {:+.4} ({:+.1}%)\n",
            change.absolute,
            change.percent
        ));
    }

    out
}

fn unit_label(unit: ServingUnit) -> &'static str {
    match unit {
        ServingUnit::Pound => "lb",
        ServingUnit::Ounce => "oz",
        ServingUnit::Tablespoon => "tbsp",
        ServingUnit::Teaspoon => "tsp",
        ServingUnit::Unit => "unit",
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
