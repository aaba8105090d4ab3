//! Latest-month table of particulars, one row per entry, sortable by column.

use shared::{Category, FinancialEntry};
use std::cmp::Ordering;

use crate::aggregation::{entries_for, latest_key};

#[derive(Debug, Clone, PartialEq)]
pub struct TitleRow {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub cash: f64,
    pub investment: f64,
    pub current_value: f64,
    pub gain_loss: f64,
}

impl TitleRow {
    pub fn from_entry(entry: &FinancialEntry) -> Self {
        // Liquid rows report their cash balance; investment rows their gain
        let gain_loss = if entry.cash == 0.0 {
            entry.current_value - entry.investment
        } else {
            entry.cash
        };
        Self {
            id: entry.id.clone(),
            title: entry.title().to_string(),
            category: entry.category.clone(),
            cash: entry.cash,
            investment: entry.investment,
            current_value: entry.current_value,
            gain_loss,
        }
    }

    pub fn is_profit(&self) -> bool {
        self.gain_loss >= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Title,
    Category,
    Cash,
    Investment,
    CurrentValue,
    GainLoss,
}

impl SortColumn {
    pub fn parse(value: &str) -> Option<SortColumn> {
        match value.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "title" => Some(SortColumn::Title),
            "category" => Some(SortColumn::Category),
            "cash" => Some(SortColumn::Cash),
            "investment" => Some(SortColumn::Investment),
            "currentvalue" => Some(SortColumn::CurrentValue),
            "gainloss" => Some(SortColumn::GainLoss),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortState {
    /// Same column flips the direction; a new column starts ascending
    pub fn select(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.column = column;
            self.direction = SortDirection::Ascending;
        }
    }
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

fn compare_rows(a: &TitleRow, b: &TitleRow, column: SortColumn) -> Ordering {
    let primary = match column {
        SortColumn::Title => Ordering::Equal,
        SortColumn::Category => compare_titles(a.category.name(), b.category.name()),
        SortColumn::Cash => a.cash.total_cmp(&b.cash),
        SortColumn::Investment => a.investment.total_cmp(&b.investment),
        SortColumn::CurrentValue => a.current_value.total_cmp(&b.current_value),
        SortColumn::GainLoss => a.gain_loss.total_cmp(&b.gain_loss),
    };
    primary
        .then_with(|| compare_titles(&a.title, &b.title))
        .then_with(|| compare_titles(a.category.name(), b.category.name()))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_rows(rows: &mut [TitleRow], state: SortState) {
    rows.sort_by(|a, b| {
        let ordering = compare_rows(a, b, state.column);
        match state.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Rows for the latest month in the data, ordered by title then category
pub fn build_title_rows(entries: &[FinancialEntry]) -> Vec<TitleRow> {
    let Some(latest) = latest_key(entries) else {
        return Vec::new();
    };
    let mut rows: Vec<TitleRow> = entries_for(entries, latest)
        .into_iter()
        .map(TitleRow::from_entry)
        .collect();
    sort_rows(&mut rows, SortState::default());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fake::entry;
    use shared::Month;

    fn sample() -> Vec<FinancialEntry> {
        vec![
            entry("a", "Stocks", "Tech", 0.0, 1000.0, 900.0, Month::June, 2024),
            entry("b", "Bank Account", "Savings", 500.0, 0.0, 500.0, Month::June, 2024),
            entry("c", "Gold", "Coins", 0.0, 300.0, 450.0, Month::June, 2024),
            entry("d", "Mutual Fund", "Tech", 0.0, 200.0, 260.0, Month::June, 2024),
            entry("e", "Gold", "Old coins", 0.0, 100.0, 100.0, Month::May, 2024),
        ]
    }

    fn ids(rows: &[TitleRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_rows_cover_latest_month_sorted_by_title_then_category() {
        let rows = build_title_rows(&sample());
        assert_eq!(ids(&rows), vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn test_gain_loss_asymmetry() {
        let rows = build_title_rows(&sample());
        let tech = rows.iter().find(|r| r.id == "a").unwrap();
        assert_eq!(tech.gain_loss, -100.0);
        assert!(!tech.is_profit());

        let savings = rows.iter().find(|r| r.id == "b").unwrap();
        assert_eq!(savings.gain_loss, 500.0);
        assert!(savings.is_profit());
    }

    #[test]
    fn test_sort_state_toggles() {
        let mut state = SortState::default();
        state.select(SortColumn::Cash);
        assert_eq!(state.column, SortColumn::Cash);
        assert_eq!(state.direction, SortDirection::Ascending);
        state.select(SortColumn::Cash);
        assert_eq!(state.direction, SortDirection::Descending);
        state.select(SortColumn::GainLoss);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_same_column_twice_reverses_exactly() {
        let mut rows = build_title_rows(&sample());
        let mut state = SortState::default();

        state.select(SortColumn::Cash);
        sort_rows(&mut rows, state);
        let ascending = ids(&rows).into_iter().map(String::from).collect::<Vec<_>>();

        state.select(SortColumn::Cash);
        sort_rows(&mut rows, state);
        let mut descending = ids(&rows).into_iter().map(String::from).collect::<Vec<_>>();
        descending.reverse();

        assert_eq!(ascending, descending);
        // ties on cash fall back to title then category
        assert_eq!(ascending, vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn test_sort_by_gain_loss() {
        let mut rows = build_title_rows(&sample());
        sort_rows(
            &mut rows,
            SortState {
                column: SortColumn::GainLoss,
                direction: SortDirection::Descending,
            },
        );
        assert_eq!(ids(&rows), vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn test_column_parsing() {
        assert_eq!(SortColumn::parse("current-value"), Some(SortColumn::CurrentValue));
        assert_eq!(SortColumn::parse("Gain Loss"), Some(SortColumn::GainLoss));
        assert_eq!(SortColumn::parse("colour"), None);
    }
}
