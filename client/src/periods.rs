//! Range selection for the statistics view and period-vs-period comparison.

use shared::{Category, FinancialEntry, Month, MonthKey};
use std::collections::BTreeMap;
use std::fmt;

use crate::aggregation::{bucket_amounts, growth_percent, latest_key};

/// Years a period can be parsed for, matching what the server accepts
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;

/// Move a month key by `delta` months. Saturates at the ends of the `i32` year range.
pub fn shift_months(key: MonthKey, delta: i32) -> MonthKey {
    let index = i64::from(key.year) * 12 + i64::from(key.month.index()) - 1 + i64::from(delta);
    let year = index.div_euclid(12);
    let Ok(year) = i32::try_from(year) else {
        return if year < 0 {
            MonthKey::new(Month::January, i32::MIN)
        } else {
            MonthKey::new(Month::December, i32::MAX)
        };
    };
    let month = Month::from_index(index.rem_euclid(12) as u32 + 1).unwrap_or(Month::January);
    MonthKey::new(month, year)
}

/// Time window offered by the statistics view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsRange {
    LastMonth,
    ThreeMonths,
    #[default]
    SixMonths,
    LastYear,
}

impl StatsRange {
    pub const ALL: [StatsRange; 4] = [
        StatsRange::LastMonth,
        StatsRange::ThreeMonths,
        StatsRange::SixMonths,
        StatsRange::LastYear,
    ];

    pub fn months(&self) -> i32 {
        match self {
            StatsRange::LastMonth => 1,
            StatsRange::ThreeMonths => 3,
            StatsRange::SixMonths => 6,
            StatsRange::LastYear => 12,
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            StatsRange::LastMonth => "1month",
            StatsRange::ThreeMonths => "3months",
            StatsRange::SixMonths => "6months",
            StatsRange::LastYear => "1year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatsRange::LastMonth => "Last Month",
            StatsRange::ThreeMonths => "Last 3 Months",
            StatsRange::SixMonths => "Last 6 Months",
            StatsRange::LastYear => "Last Year",
        }
    }

    pub fn parse(value: &str) -> Option<StatsRange> {
        let value = value.trim().to_lowercase();
        StatsRange::ALL.into_iter().find(|range| range.value() == value)
    }

    /// Inclusive window of `months()` months ending at `latest`
    pub fn window(&self, latest: MonthKey) -> (MonthKey, MonthKey) {
        (shift_months(latest, 1 - self.months()), latest)
    }
}

/// Inclusive span of months that can be compared against another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: MonthKey,
    pub end: MonthKey,
    kind: PeriodKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PeriodKind {
    Month,
    Quarter(u32),
    Year,
}

impl Period {
    pub fn month(key: MonthKey) -> Self {
        Self {
            start: key,
            end: key,
            kind: PeriodKind::Month,
        }
    }

    /// Quarter 1..=4 of `year`
    pub fn quarter(quarter: u32, year: i32) -> Option<Self> {
        if !(1..=4).contains(&quarter) {
            return None;
        }
        let first = Month::from_index((quarter - 1) * 3 + 1)?;
        let start = MonthKey::new(first, year);
        Some(Self {
            start,
            end: shift_months(start, 2),
            kind: PeriodKind::Quarter(quarter),
        })
    }

    pub fn quarter_of(key: MonthKey) -> Self {
        let quarter = (key.month.index() - 1) / 3 + 1;
        let first = Month::from_index((quarter - 1) * 3 + 1).unwrap_or(Month::January);
        let start = MonthKey::new(first, key.year);
        Self {
            start,
            end: shift_months(start, 2),
            kind: PeriodKind::Quarter(quarter),
        }
    }

    pub fn year(year: i32) -> Self {
        Self {
            start: MonthKey::new(Month::January, year),
            end: MonthKey::new(Month::December, year),
            kind: PeriodKind::Year,
        }
    }

    /// Parse "q1-2024", "2024", "Jan-2024" or "January-2024".
    /// Years outside [`YEAR_RANGE`] are rejected.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let lower = value.to_lowercase();

        let period = if let Some(rest) = lower.strip_prefix('q') {
            let (quarter, year) = rest.split_once(['-', ' '])?;
            Period::quarter(quarter.trim().parse().ok()?, year.trim().parse().ok()?)?
        } else if let Ok(year) = value.parse::<i32>() {
            Period::year(year)
        } else {
            Period::month(MonthKey::parse(value).ok()?)
        };
        YEAR_RANGE.contains(&period.start.year).then_some(period)
    }

    /// The period of the same length immediately before this one
    pub fn previous(&self) -> Self {
        match self.kind {
            PeriodKind::Month => Period::month(shift_months(self.start, -1)),
            PeriodKind::Quarter(_) => Period::quarter_of(shift_months(self.start, -3)),
            PeriodKind::Year => Period::year(self.start.year.saturating_sub(1)),
        }
    }

    pub fn contains(&self, key: MonthKey) -> bool {
        key >= self.start && key <= self.end
    }

    pub fn label(&self) -> String {
        match self.kind {
            PeriodKind::Month => self.start.short_label(),
            PeriodKind::Quarter(quarter) => format!("Q{}-{}", quarter, self.start.year),
            PeriodKind::Year => self.start.year.to_string(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Quarters that contain data, newest first
pub fn available_quarters(entries: &[FinancialEntry]) -> Vec<Period> {
    let mut quarters: Vec<Period> = entries.iter().map(|e| Period::quarter_of(e.key())).collect();
    quarters.sort_by(|a, b| b.start.cmp(&a.start));
    quarters.dedup();
    quarters
}

/// Latest quarter with data against the quarter before it
pub fn default_comparison(entries: &[FinancialEntry]) -> Option<(Period, Period)> {
    let current = Period::quarter_of(latest_key(entries)?);
    Some((current, current.previous()))
}

/// Figures of one period, taken from the latest month recorded inside it.
/// `investments` is the liquid plus invested total that growth is measured on;
/// `assets` sums the reported current values and is only displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSnapshot {
    pub period: Period,
    pub month: Option<MonthKey>,
    pub assets: f64,
    pub investments: f64,
}

/// One category across both periods
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryComparison {
    pub category: Category,
    pub baseline_assets: f64,
    pub current_assets: f64,
    pub baseline_investments: f64,
    pub current_investments: f64,
    pub growth_percent: f64,
}

impl CategoryComparison {
    /// Change of the liquid plus invested total
    pub fn difference(&self) -> f64 {
        self.current_investments - self.baseline_investments
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub current: PeriodSnapshot,
    pub baseline: PeriodSnapshot,
    pub rows: Vec<CategoryComparison>,
    pub overall_growth: f64,
    pub best_performer: Option<CategoryComparison>,
}

impl ComparisonReport {
    /// Current total minus baseline total
    pub fn difference(&self) -> f64 {
        self.current.investments - self.baseline.investments
    }

    pub fn has_data(&self) -> bool {
        self.current.month.is_some() || self.baseline.month.is_some()
    }
}

fn snapshot_entries<'a>(entries: &'a [FinancialEntry], period: &Period) -> (Option<MonthKey>, Vec<&'a FinancialEntry>) {
    let month = entries.iter().map(|e| e.key()).filter(|key| period.contains(*key)).max();
    let selected = match month {
        Some(month) => entries.iter().filter(|e| e.key() == month).collect(),
        None => Vec::new(),
    };
    (month, selected)
}

#[derive(Default)]
struct Sums {
    assets: f64,
    investments: f64,
}

fn sums_by_category(entries: &[&FinancialEntry]) -> BTreeMap<String, (Category, Sums)> {
    let mut sums: BTreeMap<String, (Category, Sums)> = BTreeMap::new();
    for entry in entries {
        let (liquid, invested) = bucket_amounts(entry);
        let (_, sum) = sums
            .entry(entry.category.name().to_string())
            .or_insert_with(|| (entry.category.clone(), Sums::default()));
        sum.assets += entry.current_value;
        sum.investments += liquid + invested;
    }
    sums
}

pub fn compare_periods(entries: &[FinancialEntry], current: &Period, baseline: &Period) -> ComparisonReport {
    let (current_month, current_entries) = snapshot_entries(entries, current);
    let (baseline_month, baseline_entries) = snapshot_entries(entries, baseline);

    let mut current_sums = sums_by_category(&current_entries);
    let baseline_sums = sums_by_category(&baseline_entries);

    let mut rows: Vec<CategoryComparison> = Vec::new();
    for (name, (category, before)) in baseline_sums {
        let after = current_sums.remove(&name).map(|(_, sums)| sums).unwrap_or_default();
        rows.push(CategoryComparison {
            category,
            baseline_assets: before.assets,
            current_assets: after.assets,
            baseline_investments: before.investments,
            current_investments: after.investments,
            growth_percent: growth_percent(before.investments, after.investments),
        });
    }
    for (_, (category, after)) in current_sums {
        rows.push(CategoryComparison {
            category,
            baseline_assets: 0.0,
            current_assets: after.assets,
            baseline_investments: 0.0,
            current_investments: after.investments,
            growth_percent: 0.0,
        });
    }
    rows.sort_by(|a, b| a.category.name().cmp(b.category.name()));

    let best_performer = rows
        .iter()
        .max_by(|a, b| {
            a.growth_percent
                .total_cmp(&b.growth_percent)
                .then_with(|| b.category.name().cmp(a.category.name()))
        })
        .cloned();

    let current = PeriodSnapshot {
        period: *current,
        month: current_month,
        assets: rows.iter().map(|r| r.current_assets).sum(),
        investments: rows.iter().map(|r| r.current_investments).sum(),
    };
    let baseline = PeriodSnapshot {
        period: *baseline,
        month: baseline_month,
        assets: rows.iter().map(|r| r.baseline_assets).sum(),
        investments: rows.iter().map(|r| r.baseline_investments).sum(),
    };

    ComparisonReport {
        overall_growth: growth_percent(baseline.investments, current.investments),
        current,
        baseline,
        rows,
        best_performer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::summarize_dashboard;
    use crate::store::fake::entry;

    #[test]
    fn test_shift_months_crosses_years() {
        let jan = MonthKey::new(Month::January, 2024);
        assert_eq!(shift_months(jan, -1), MonthKey::new(Month::December, 2023));
        assert_eq!(shift_months(jan, 11), MonthKey::new(Month::December, 2024));
        assert_eq!(shift_months(jan, 12), MonthKey::new(Month::January, 2025));
        assert_eq!(shift_months(jan, -13), MonthKey::new(Month::December, 2022));
    }

    #[test]
    fn test_stats_range_window() {
        let latest = MonthKey::new(Month::March, 2024);
        assert_eq!(StatsRange::LastMonth.window(latest), (latest, latest));
        assert_eq!(
            StatsRange::SixMonths.window(latest),
            (MonthKey::new(Month::October, 2023), latest)
        );
        assert_eq!(
            StatsRange::LastYear.window(latest).0,
            MonthKey::new(Month::April, 2023)
        );
        assert_eq!(StatsRange::parse("3months"), Some(StatsRange::ThreeMonths));
        assert_eq!(StatsRange::parse("1YEAR"), Some(StatsRange::LastYear));
        assert_eq!(StatsRange::parse("forever"), None);
    }

    #[test]
    fn test_period_parsing() {
        let q2 = Period::parse("q2-2024").unwrap();
        assert_eq!(q2.start, MonthKey::new(Month::April, 2024));
        assert_eq!(q2.end, MonthKey::new(Month::June, 2024));
        assert_eq!(q2.label(), "Q2-2024");
        assert_eq!(q2.previous().label(), "Q1-2024");
        assert_eq!(Period::parse("Q1-2024").unwrap().previous().label(), "Q4-2023");

        assert_eq!(Period::parse("2023").unwrap().label(), "2023");
        assert_eq!(Period::parse("Feb-2024").unwrap().label(), "Feb-2024");
        assert_eq!(Period::parse("March-2024").unwrap().previous().label(), "Feb-2024");
        assert!(Period::parse("q5-2024").is_none());
        assert!(Period::parse("someday").is_none());
    }

    #[test]
    fn test_period_parsing_rejects_out_of_range_years() {
        assert!(Period::parse("q1-999999999").is_none());
        assert!(Period::parse("999999999").is_none());
        assert!(Period::parse("-2147483648").is_none());
        assert!(Period::parse("Jan-1899").is_none());
        assert!(Period::parse("q4-2101").is_none());
        assert_eq!(Period::parse("1900").unwrap().previous().label(), "1899");
        assert_eq!(Period::parse("q4-2100").unwrap().label(), "Q4-2100");
    }

    #[test]
    fn test_shift_months_saturates_at_extreme_years() {
        let last = MonthKey::new(Month::December, i32::MAX);
        assert_eq!(shift_months(last, 1), last);
        assert_eq!(shift_months(last, i32::MAX), last);

        let first = MonthKey::new(Month::January, i32::MIN);
        assert_eq!(shift_months(first, -1), first);
        assert_eq!(shift_months(first, i32::MIN), first);

        let q = Period::quarter(4, i32::MAX).unwrap();
        assert_eq!(q.start, MonthKey::new(Month::October, i32::MAX));
        assert_eq!(q.end, last);
    }

    #[test]
    fn test_compare_quarters_uses_latest_month_in_each() {
        let entries = vec![
            entry("1", "Stocks", "Tech", 0.0, 1000.0, 1000.0, Month::January, 2024),
            entry("2", "Stocks", "Tech", 0.0, 1000.0, 1100.0, Month::March, 2024),
            entry("3", "Stocks", "Tech", 0.0, 1200.0, 1320.0, Month::May, 2024),
            entry("4", "Gold", "Coins", 0.0, 500.0, 500.0, Month::March, 2024),
            entry("5", "Bank Account", "Savings", 200.0, 0.0, 200.0, Month::May, 2024),
        ];

        let current = Period::parse("q2-2024").unwrap();
        let baseline = Period::parse("q1-2024").unwrap();
        let report = compare_periods(&entries, &current, &baseline);

        assert_eq!(report.current.month, Some(MonthKey::new(Month::May, 2024)));
        assert_eq!(report.baseline.month, Some(MonthKey::new(Month::March, 2024)));
        assert_eq!(report.baseline.investments, 1500.0);
        assert_eq!(report.current.investments, 1400.0);
        assert_eq!(report.baseline.assets, 1600.0);
        assert_eq!(report.current.assets, 1520.0);
        assert_eq!(report.difference(), -100.0);
        assert!((report.overall_growth - (-100.0 / 15.0)).abs() < 1e-9);

        let names: Vec<&str> = report.rows.iter().map(|r| r.category.name()).collect();
        assert_eq!(names, vec!["Bank Account", "Gold", "Stocks"]);

        let gold = &report.rows[1];
        assert_eq!(gold.current_investments, 0.0);
        assert!((gold.growth_percent + 100.0).abs() < 1e-9);

        let stocks = &report.rows[2];
        assert!((stocks.growth_percent - 20.0).abs() < 1e-9);
        assert_eq!(stocks.difference(), 200.0);
        assert_eq!(report.best_performer.as_ref().unwrap().category, Category::Stocks);
    }

    #[test]
    fn test_comparison_growth_matches_dashboard_growth() {
        let entries = vec![
            entry("1", "Stocks", "Tech", 0.0, 100.0, 100.0, Month::March, 2024),
            entry("2", "Stocks", "Tech", 0.0, 100.0, 150.0, Month::April, 2024),
        ];

        let report = compare_periods(
            &entries,
            &Period::parse("Apr-2024").unwrap(),
            &Period::parse("Mar-2024").unwrap(),
        );
        let dashboard = summarize_dashboard(&entries);

        assert_eq!(dashboard.monthly_growth, 0.0);
        assert_eq!(report.overall_growth, dashboard.monthly_growth);
        assert_eq!(report.rows[0].growth_percent, 0.0);
        assert_eq!(report.difference(), 0.0);
        assert_eq!(report.current.assets, 150.0);

        let raised = vec![
            entries[0].clone(),
            entry("2", "Stocks", "Tech", 0.0, 125.0, 150.0, Month::April, 2024),
        ];
        let report = compare_periods(
            &raised,
            &Period::parse("Apr-2024").unwrap(),
            &Period::parse("Mar-2024").unwrap(),
        );
        let dashboard = summarize_dashboard(&raised);
        assert!((dashboard.monthly_growth - 25.0).abs() < 1e-9);
        assert_eq!(report.overall_growth, dashboard.monthly_growth);
    }

    #[test]
    fn test_compare_empty_period() {
        let entries = vec![entry("1", "Gold", "Coins", 0.0, 10.0, 10.0, Month::January, 2024)];
        let report = compare_periods(&entries, &Period::year(2024), &Period::year(2023));
        assert!(report.has_data());
        assert_eq!(report.baseline.month, None);
        assert_eq!(report.overall_growth, 0.0);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].growth_percent, 0.0);
    }

    #[test]
    fn test_default_comparison_and_quarters() {
        let entries = vec![
            entry("1", "Gold", "", 0.0, 1.0, 1.0, Month::February, 2024),
            entry("2", "Gold", "", 0.0, 1.0, 1.0, Month::August, 2024),
            entry("3", "Gold", "", 0.0, 1.0, 1.0, Month::March, 2024),
        ];
        let (current, baseline) = default_comparison(&entries).unwrap();
        assert_eq!(current.label(), "Q3-2024");
        assert_eq!(baseline.label(), "Q2-2024");

        let labels: Vec<String> = available_quarters(&entries).iter().map(Period::label).collect();
        assert_eq!(labels, vec!["Q3-2024", "Q1-2024"]);
        assert!(default_comparison(&[]).is_none());
    }
}
