use shared::{
    CreateEntryRequest, FinancialEntry as SharedEntry, FinancialStats, UpdateEntryRequest,
};

use crate::domain::commands::entries::{CreateEntryCommand, EntryStats, UpdateEntryCommand};
use crate::domain::models::FinancialEntry as DomainEntry;

/// Converts between wire entries and domain entries
pub struct EntryMapper;

impl EntryMapper {
    pub fn to_dto(entry: DomainEntry) -> SharedEntry {
        SharedEntry {
            amount: entry.holding.amount(),
            cash: entry.holding.cash(),
            investment: entry.holding.investment(),
            current_value: entry.holding.current_value(),
            id: entry.id,
            user_id: entry.user_id,
            category: entry.category,
            description: entry.description,
            month: entry.month,
            year: entry.year,
            date_added: entry.date_added,
            updated_at: entry.updated_at,
        }
    }

    pub fn to_create_command(user_id: &str, request: CreateEntryRequest) -> CreateEntryCommand {
        CreateEntryCommand {
            user_id: user_id.to_string(),
            category: request.category,
            description: request.description,
            amount: request.amount,
            cash: request.cash,
            investment: request.investment,
            current_value: request.current_value,
            month: request.month,
            month_number: request.month_number,
            year: request.year,
        }
    }

    pub fn to_update_command(
        user_id: &str,
        entry_id: &str,
        request: UpdateEntryRequest,
    ) -> UpdateEntryCommand {
        UpdateEntryCommand {
            user_id: user_id.to_string(),
            entry_id: entry_id.to_string(),
            category: request.category,
            description: request.description,
            amount: request.amount,
            cash: request.cash,
            investment: request.investment,
            current_value: request.current_value,
            month: request.month,
            month_number: request.month_number,
            year: request.year,
        }
    }

    pub fn stats_to_dto(stats: EntryStats) -> FinancialStats {
        FinancialStats {
            total_amount: stats.total_amount,
            total_entries: stats.total_entries,
            category_breakdown: stats.category_breakdown,
            average_amount: stats.average_amount,
        }
    }
}
