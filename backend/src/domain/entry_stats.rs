use std::collections::BTreeMap;

use super::commands::entries::EntryStats;
use super::models::FinancialEntry;

/// Totals across every entry of a user, keyed by category name
pub fn summarize(entries: &[FinancialEntry]) -> EntryStats {
    let mut category_breakdown: BTreeMap<String, f64> = BTreeMap::new();
    let mut total_amount = 0.0;

    for entry in entries {
        let amount = entry.holding.amount();
        total_amount += amount;
        *category_breakdown
            .entry(entry.category.name().to_string())
            .or_insert(0.0) += amount;
    }

    let total_entries = entries.len();
    let average_amount = if total_entries > 0 {
        total_amount / total_entries as f64
    } else {
        0.0
    };

    EntryStats {
        total_amount,
        total_entries,
        category_breakdown,
        average_amount,
    }
}
