//! Formatting and chart-ready series.
//!
//! Amounts are Indian rupees with Indian digit grouping (12,34,567.89).

use shared::MonthKey;

use crate::aggregation::{CategoryShare, GrowthPoint, MonthTotals};

const RUPEE: &str = "₹";

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// "₹1,23,456.78", "-₹50.00"
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}0.00", RUPEE);
    }
    let paise = (value.abs() * 100.0).round() as u64;
    let rupees = group_indian(&(paise / 100).to_string());
    let sign = if value < 0.0 && paise > 0 { "-" } else { "" };
    format!("{}{}{}.{:02}", sign, RUPEE, rupees, paise % 100)
}

/// "+12.50%", "-3.25%"
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "+0.00%".to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded >= 0.0 {
        // also turns -0.00 into +0.00
        format!("+{:.2}%", rounded.abs())
    } else {
        format!("{:.2}%", rounded)
    }
}

/// Compact axis label in lakhs, e.g. "₹12L"
pub fn format_lakhs(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}0L", RUPEE);
    }
    let lakhs = (value / 100_000.0).round();
    let lakhs = if lakhs == 0.0 { 0.0 } else { lakhs };
    format!("{}{:.0}L", RUPEE, lakhs)
}

/// "January-2026" → "Jan-2026"; anything unparseable is returned as is
pub fn short_month_label(label: &str) -> String {
    match MonthKey::parse(label) {
        Ok(key) => key.short_label(),
        Err(_) => label.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub liquid: f64,
    pub invested: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthBar {
    pub label: String,
    pub value: f64,
    pub display: String,
}

pub fn trend_series(series: &[MonthTotals]) -> Vec<TrendPoint> {
    series
        .iter()
        .map(|totals| TrendPoint {
            label: totals.key.short_label(),
            liquid: totals.liquid,
            invested: totals.invested,
            total: totals.total(),
        })
        .collect()
}

pub fn distribution_slices(shares: &[CategoryShare]) -> Vec<PieSlice> {
    shares
        .iter()
        .map(|share| PieSlice {
            name: share.category.name().to_string(),
            value: share.value,
            label: format!("{} {:.1}%", share.category.name(), share.percent),
        })
        .collect()
}

pub fn growth_bars(points: &[GrowthPoint]) -> Vec<GrowthBar> {
    points
        .iter()
        .map(|point| GrowthBar {
            label: point.key.short_label(),
            value: point.growth_percent,
            display: format_percent(point.growth_percent),
        })
        .collect()
}
