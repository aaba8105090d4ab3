//! Terminal tables for the views.

use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use shared::FinancialEntry;

use crate::aggregation::DashboardSummary;
use crate::periods::ComparisonReport;
use crate::presentation::{distribution_slices, format_currency, format_lakhs, format_percent, growth_bars, trend_series};
use crate::title_table::TitleRow;
use crate::views::statistics::StatisticsView;

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn entries_table(entries: &[FinancialEntry]) -> Table {
    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.id.clone(),
                e.key().short_label(),
                e.title().to_string(),
                e.category.name().to_string(),
                format_currency(e.cash),
                format_currency(e.investment),
                format_currency(e.current_value),
            ]
        })
        .collect();
    pretty_table(
        &["ID", "Month", "Title", "Category", "Cash", "Investment", "Current Value"],
        rows,
    )
}

/// Particulars table; gain/loss is green for profit and red for loss
pub fn title_table(rows: &[TitleRow]) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(
        ["Title", "Category", "Cash", "Investment", "Current Value", "Gain/Loss"]
            .iter()
            .map(|h| Cell::new(*h)),
    );
    for row in rows {
        let color = if row.is_profit() { Color::Green } else { Color::Red };
        t.add_row(vec![
            Cell::new(&row.title),
            Cell::new(row.category.name()),
            Cell::new(format_currency(row.cash)),
            Cell::new(format_currency(row.investment)),
            Cell::new(format_currency(row.current_value)),
            Cell::new(format_currency(row.gain_loss)).fg(color),
        ]);
    }
    t
}

pub fn summary_table(summary: &DashboardSummary) -> Table {
    let month = summary
        .latest_key()
        .map(|key| key.short_label())
        .unwrap_or_else(|| "-".to_string());
    pretty_table(
        &["Month", "Liquid", "Invested", "Total Assets", "Current Value", "Monthly Growth", "All-time Growth"],
        vec![vec![
            month,
            format_currency(summary.total_liquid()),
            format_currency(summary.total_invested()),
            format_currency(summary.total_assets()),
            format_currency(summary.current_value()),
            format_percent(summary.monthly_growth),
            format_percent(summary.all_time_growth),
        ]],
    )
}

pub fn breakdown_table(summary: &DashboardSummary) -> Table {
    let rows = distribution_slices(&summary.breakdown)
        .into_iter()
        .map(|slice| vec![slice.name, format_currency(slice.value), slice.label])
        .collect();
    pretty_table(&["Category", "Current Value", "Share"], rows)
}

pub fn trend_table(summary: &DashboardSummary) -> Table {
    let rows = trend_series(&summary.series)
        .into_iter()
        .zip(growth_bars(&summary.growth))
        .map(|(point, bar)| {
            vec![
                point.label,
                format_lakhs(point.liquid),
                format_lakhs(point.invested),
                format_currency(point.total),
                bar.display,
            ]
        })
        .collect();
    pretty_table(&["Month", "Liquid", "Invested", "Total", "Growth"], rows)
}

pub fn statistics_tables(view: &StatisticsView) -> Vec<Table> {
    let monthly = pretty_table(
        &["Month", "Total Assets", "Investments", "Growth"],
        view.monthly
            .iter()
            .zip(&view.growth)
            .map(|(totals, point)| {
                vec![
                    totals.key.short_label(),
                    format_currency(totals.total()),
                    format_currency(totals.invested),
                    format_percent(point.growth_percent),
                ]
            })
            .collect(),
    );

    let distribution = pretty_table(
        &["Category", "Current Value", "Share"],
        view.distribution
            .iter()
            .map(|share| {
                vec![
                    share.category.name().to_string(),
                    format_currency(share.value),
                    format!("{:.1}%", share.percent),
                ]
            })
            .collect(),
    );

    let performance = pretty_table(
        &["Category", "Liquid", "Invested", "Current Value", "Return"],
        view.performance
            .iter()
            .map(|row| {
                vec![
                    row.category.name().to_string(),
                    format_currency(row.liquid),
                    format_currency(row.invested),
                    format_currency(row.current_value),
                    format_percent(row.return_percent),
                ]
            })
            .collect(),
    );

    vec![monthly, distribution, performance]
}

pub fn comparison_table(report: &ComparisonReport) -> Table {
    let baseline = report.baseline.period.label();
    let current = report.current.period.label();
    let mut rows: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| {
            vec![
                row.category.name().to_string(),
                format_currency(row.baseline_investments),
                format_currency(row.current_investments),
                format_currency(row.difference()),
                format_percent(row.growth_percent),
                format_currency(row.current_assets),
            ]
        })
        .collect();
    rows.push(vec![
        "Total".to_string(),
        format_currency(report.baseline.investments),
        format_currency(report.current.investments),
        format_currency(report.difference()),
        format_percent(report.overall_growth),
        format_currency(report.current.assets),
    ]);
    pretty_table(
        &["Category", baseline.as_str(), current.as_str(), "Difference", "Growth", "Current value"],
        rows,
    )
}
