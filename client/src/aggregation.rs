//! Aggregation engine.
//!
//! Pure functions over a user's full entry list. Months are ordered by
//! [`MonthKey`], never by insertion order, and every growth figure goes
//! through [`growth_percent`].

use shared::{Category, FinancialEntry, MonthKey};
use std::collections::BTreeMap;

/// Totals of one (month, year) bucket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthTotals {
    pub key: MonthKey,
    pub liquid: f64,
    pub invested: f64,
    pub current_value: f64,
}

impl MonthTotals {
    fn empty(key: MonthKey) -> Self {
        Self {
            key,
            liquid: 0.0,
            invested: 0.0,
            current_value: 0.0,
        }
    }

    /// Liquid plus invested
    pub fn total(&self) -> f64 {
        self.liquid + self.invested
    }

    fn add(&mut self, entry: &FinancialEntry) {
        let (liquid, invested) = bucket_amounts(entry);
        self.liquid += liquid;
        self.invested += invested;
        self.current_value += entry.current_value;
    }
}

/// Latest, previous and first month of the data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodSummary {
    pub latest: Option<MonthTotals>,
    pub previous: Option<MonthTotals>,
    pub first: Option<MonthTotals>,
}

impl PeriodSummary {
    /// Latest month against the one before it
    pub fn monthly_growth(&self) -> f64 {
        growth_between(self.previous.as_ref(), self.latest.as_ref())
    }

    /// Latest month against the first month on record
    pub fn all_time_growth(&self) -> f64 {
        growth_between(self.first.as_ref(), self.latest.as_ref())
    }
}

fn growth_between(from: Option<&MonthTotals>, to: Option<&MonthTotals>) -> f64 {
    match (from, to) {
        (Some(from), Some(to)) => growth_percent(from.total(), to.total()),
        _ => 0.0,
    }
}

/// Share of one category in the latest month
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub value: f64,
    pub percent: f64,
}

/// Per-category figures for the latest month
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPerformance {
    pub category: Category,
    pub liquid: f64,
    pub invested: f64,
    pub current_value: f64,
    pub return_percent: f64,
}

/// One point of the month-over-month growth series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthPoint {
    pub key: MonthKey,
    pub total: f64,
    pub growth_percent: f64,
}

/// Everything the dashboard shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub has_data: bool,
    pub periods: PeriodSummary,
    pub monthly_growth: f64,
    pub all_time_growth: f64,
    pub breakdown: Vec<CategoryShare>,
    pub performance: Vec<CategoryPerformance>,
    pub series: Vec<MonthTotals>,
    pub growth: Vec<GrowthPoint>,
}

impl DashboardSummary {
    pub fn latest_key(&self) -> Option<MonthKey> {
        self.periods.latest.map(|totals| totals.key)
    }

    pub fn total_liquid(&self) -> f64 {
        self.periods.latest.map(|t| t.liquid).unwrap_or(0.0)
    }

    pub fn total_invested(&self) -> f64 {
        self.periods.latest.map(|t| t.invested).unwrap_or(0.0)
    }

    pub fn total_assets(&self) -> f64 {
        self.periods.latest.map(|t| t.total()).unwrap_or(0.0)
    }

    pub fn current_value(&self) -> f64 {
        self.periods.latest.map(|t| t.current_value).unwrap_or(0.0)
    }
}

/// Percentage change from `previous` to `current`; 0 when there is no
/// positive baseline.
pub fn growth_percent(previous: f64, current: f64) -> f64 {
    if !previous.is_finite() || previous <= 0.0 || !current.is_finite() {
        return 0.0;
    }
    let growth = (current - previous) / previous * 100.0;
    if growth.is_finite() {
        growth
    } else {
        0.0
    }
}

/// Split an entry's figures into (liquid, invested) by its category
pub fn bucket_amounts(entry: &FinancialEntry) -> (f64, f64) {
    let amount = entry.cash + entry.investment;
    if entry.category.is_liquid() {
        (amount, 0.0)
    } else {
        (0.0, amount)
    }
}

/// Distinct month keys, oldest first
pub fn month_keys(entries: &[FinancialEntry]) -> Vec<MonthKey> {
    let mut keys: Vec<MonthKey> = entries.iter().map(FinancialEntry::key).collect();
    keys.sort();
    keys.dedup();
    keys
}

pub fn latest_key(entries: &[FinancialEntry]) -> Option<MonthKey> {
    entries.iter().map(FinancialEntry::key).max()
}

/// Chronological totals, one per month present in the data
pub fn month_buckets(entries: &[FinancialEntry]) -> Vec<MonthTotals> {
    let mut buckets: BTreeMap<MonthKey, MonthTotals> = BTreeMap::new();
    for entry in entries {
        let key = entry.key();
        buckets
            .entry(key)
            .or_insert_with(|| MonthTotals::empty(key))
            .add(entry);
    }
    buckets.into_values().collect()
}

pub fn period_summary(entries: &[FinancialEntry]) -> PeriodSummary {
    let buckets = month_buckets(entries);
    let count = buckets.len();
    PeriodSummary {
        latest: buckets.last().copied(),
        previous: if count >= 2 { Some(buckets[count - 2]) } else { None },
        first: buckets.first().copied(),
    }
}

/// Entries of a single month
pub fn entries_for(entries: &[FinancialEntry], key: MonthKey) -> Vec<&FinancialEntry> {
    entries.iter().filter(|entry| entry.key() == key).collect()
}

/// Entries whose month lies in `from..=to`
pub fn entries_between(entries: &[FinancialEntry], from: MonthKey, to: MonthKey) -> Vec<FinancialEntry> {
    entries
        .iter()
        .filter(|entry| {
            let key = entry.key();
            key >= from && key <= to
        })
        .cloned()
        .collect()
}

/// Current-value share per category for the given entries, largest first
pub fn category_breakdown<'a, I>(entries: I) -> Vec<CategoryShare>
where
    I: IntoIterator<Item = &'a FinancialEntry>,
{
    let mut sums: BTreeMap<String, (Category, f64)> = BTreeMap::new();
    for entry in entries {
        sums.entry(entry.category.name().to_string())
            .or_insert_with(|| (entry.category.clone(), 0.0))
            .1 += entry.current_value;
    }

    let total: f64 = sums.values().map(|(_, value)| value).sum();
    let mut shares: Vec<CategoryShare> = sums
        .into_values()
        .map(|(category, value)| CategoryShare {
            percent: if total > 0.0 { value / total * 100.0 } else { 0.0 },
            category,
            value,
        })
        .collect();

    shares.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.category.name().cmp(b.category.name()))
    });
    shares
}

/// Liquid, invested and current value per category with the invested return
pub fn category_performance<'a, I>(entries: I) -> Vec<CategoryPerformance>
where
    I: IntoIterator<Item = &'a FinancialEntry>,
{
    let mut rows: BTreeMap<String, CategoryPerformance> = BTreeMap::new();
    for entry in entries {
        let (liquid, invested) = bucket_amounts(entry);
        let row = rows
            .entry(entry.category.name().to_string())
            .or_insert_with(|| CategoryPerformance {
                category: entry.category.clone(),
                liquid: 0.0,
                invested: 0.0,
                current_value: 0.0,
                return_percent: 0.0,
            });
        row.liquid += liquid;
        row.invested += invested;
        row.current_value += entry.current_value;
    }

    rows.into_values()
        .map(|mut row| {
            row.return_percent = if row.invested > 0.0 {
                growth_percent(row.invested, row.current_value)
            } else {
                0.0
            };
            row
        })
        .collect()
}

/// Growth of each month against the month before it; the first month is 0
pub fn growth_series(series: &[MonthTotals]) -> Vec<GrowthPoint> {
    let mut previous: Option<f64> = None;
    series
        .iter()
        .map(|totals| {
            let total = totals.total();
            let point = GrowthPoint {
                key: totals.key,
                total,
                growth_percent: previous.map(|p| growth_percent(p, total)).unwrap_or(0.0),
            };
            previous = Some(total);
            point
        })
        .collect()
}

pub fn summarize_dashboard(entries: &[FinancialEntry]) -> DashboardSummary {
    let periods = period_summary(entries);
    let latest = match periods.latest {
        Some(totals) => entries_for(entries, totals.key),
        None => return DashboardSummary::default(),
    };
    let series = month_buckets(entries);
    let growth = growth_series(&series);

    DashboardSummary {
        has_data: true,
        monthly_growth: periods.monthly_growth(),
        all_time_growth: periods.all_time_growth(),
        breakdown: category_breakdown(latest.iter().copied()),
        performance: category_performance(latest.iter().copied()),
        periods,
        series,
        growth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fake::entry;
    use shared::Month;

    #[test]
    fn test_growth_percent_zero_baseline() {
        assert_eq!(growth_percent(0.0, 500.0), 0.0);
        assert_eq!(growth_percent(-10.0, 500.0), 0.0);
        assert_eq!(growth_percent(f64::NAN, 500.0), 0.0);
        assert_eq!(growth_percent(100.0, f64::INFINITY), 0.0);
        assert_eq!(growth_percent(1000.0, 1200.0), 20.0);
        assert_eq!(growth_percent(200.0, 150.0), -25.0);
    }

    #[test]
    fn test_month_over_month_scenario() {
        let entries = vec![
            entry("1", "Bank Account", "Savings", 1000.0, 0.0, 1000.0, Month::January, 2024),
            entry("2", "Bank Account", "Savings", 1200.0, 0.0, 1200.0, Month::February, 2024),
        ];

        let summary = period_summary(&entries);
        let latest = summary.latest.unwrap();
        let previous = summary.previous.unwrap();
        assert_eq!(latest.key, MonthKey::new(Month::February, 2024));
        assert_eq!(latest.total(), 1200.0);
        assert_eq!(previous.key, MonthKey::new(Month::January, 2024));
        assert_eq!(previous.total(), 1000.0);
        assert!((summary.monthly_growth() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_latest_ignores_insertion_order() {
        let entries = vec![
            entry("1", "Gold", "Coins", 0.0, 100.0, 100.0, Month::January, 2025),
            entry("2", "Gold", "Coins", 0.0, 80.0, 80.0, Month::March, 2024),
            entry("3", "Gold", "Coins", 0.0, 50.0, 50.0, Month::December, 2023),
        ];

        let summary = period_summary(&entries);
        assert_eq!(summary.latest.unwrap().key, MonthKey::new(Month::January, 2025));
        assert_eq!(summary.previous.unwrap().key, MonthKey::new(Month::March, 2024));
        assert_eq!(summary.first.unwrap().key, MonthKey::new(Month::December, 2023));
        assert!((summary.all_time_growth() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_month_has_no_previous() {
        let entries = vec![entry("1", "Stocks", "Index", 0.0, 500.0, 550.0, Month::May, 2024)];
        let summary = period_summary(&entries);
        assert!(summary.previous.is_none());
        assert_eq!(summary.monthly_growth(), 0.0);
        assert_eq!(summary.all_time_growth(), 0.0);
    }

    #[test]
    fn test_buckets_follow_category() {
        let entries = vec![
            entry("1", "Cash in Hand", "Wallet", 300.0, 0.0, 300.0, Month::June, 2024),
            entry("2", "Mutual Fund", "Index fund", 0.0, 700.0, 750.0, Month::June, 2024),
            entry("3", "Mutual Fund", "Index fund", 0.0, 100.0, 90.0, Month::June, 2024),
        ];

        let buckets = month_buckets(&entries);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].liquid, 300.0);
        assert_eq!(buckets[0].invested, 800.0);
        assert_eq!(buckets[0].current_value, 1140.0);
    }

    #[test]
    fn test_breakdown_and_performance() {
        let entries = vec![
            entry("1", "Bank Account", "Savings", 250.0, 0.0, 250.0, Month::June, 2024),
            entry("2", "Stocks", "Tech", 0.0, 500.0, 750.0, Month::June, 2024),
        ];

        let shares = category_breakdown(&entries);
        assert_eq!(shares[0].category, Category::Stocks);
        assert!((shares[0].percent - 75.0).abs() < 1e-9);
        assert!((shares[1].percent - 25.0).abs() < 1e-9);

        let performance = category_performance(&entries);
        assert_eq!(performance.len(), 2);
        let bank = &performance[0];
        assert_eq!(bank.category, Category::BankAccount);
        assert_eq!(bank.liquid, 250.0);
        assert_eq!(bank.return_percent, 0.0);
        let stocks = &performance[1];
        assert_eq!(stocks.invested, 500.0);
        assert!((stocks.return_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_growth_series_starts_at_zero() {
        let entries = vec![
            entry("1", "Gold", "Coins", 0.0, 100.0, 100.0, Month::March, 2024),
            entry("2", "Gold", "Coins", 0.0, 150.0, 150.0, Month::January, 2024),
            entry("3", "Gold", "Coins", 0.0, 0.0, 0.0, Month::February, 2024),
        ];

        let growth = growth_series(&month_buckets(&entries));
        assert_eq!(growth.len(), 3);
        assert_eq!(growth[0].key, MonthKey::new(Month::January, 2024));
        assert_eq!(growth[0].growth_percent, 0.0);
        assert!((growth[1].growth_percent + 100.0).abs() < 1e-9);
        // zero baseline
        assert_eq!(growth[2].growth_percent, 0.0);
    }

    #[test]
    fn test_empty_dashboard() {
        let summary = summarize_dashboard(&[]);
        assert!(!summary.has_data);
        assert_eq!(summary.total_assets(), 0.0);
        assert!(summary.series.is_empty());
        assert_eq!(summary.latest_key(), None);
    }

    #[test]
    fn test_dashboard_uses_latest_month_only_for_breakdown() {
        let entries = vec![
            entry("1", "Gold", "Coins", 0.0, 100.0, 100.0, Month::January, 2024),
            entry("2", "Stocks", "Tech", 0.0, 400.0, 400.0, Month::February, 2024),
        ];

        let summary = summarize_dashboard(&entries);
        assert!(summary.has_data);
        assert_eq!(summary.breakdown.len(), 1);
        assert_eq!(summary.breakdown[0].category, Category::Stocks);
        assert_eq!(summary.total_invested(), 400.0);
        assert!((summary.monthly_growth - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_entries_between_is_inclusive() {
        let entries = vec![
            entry("1", "Gold", "", 0.0, 1.0, 1.0, Month::January, 2024),
            entry("2", "Gold", "", 0.0, 1.0, 1.0, Month::March, 2024),
            entry("3", "Gold", "", 0.0, 1.0, 1.0, Month::May, 2024),
        ];
        let window = entries_between(
            &entries,
            MonthKey::new(Month::January, 2024),
            MonthKey::new(Month::March, 2024),
        );
        assert_eq!(window.len(), 2);
        assert_eq!(month_keys(&entries).len(), 3);
    }
}
