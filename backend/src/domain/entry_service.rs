//! Financial entry lifecycle: create, read, partial update and removal, all
//! scoped to the owning user.

use chrono::{Datelike, Utc};
use shared::{Category, Month};
use std::sync::Arc;
use tracing::{info, warn};

use super::commands::entries::{
    ClearAllResult, CreateEntryCommand, DeleteEntryResult, EntryResult, EntryStats,
    UpdateEntryCommand,
};
use super::entry_stats::summarize;
use super::errors::{DomainError, DomainResult};
use super::models::{FinancialEntry, Holding};
use super::validation::{
    sanitize_text, validate_amount, validate_category, validate_money, validate_month_number,
    validate_year,
};
use crate::storage::{Connection, EntryStorage};

#[derive(Clone)]
pub struct EntryService<C: Connection> {
    entry_repository: C::EntryRepository,
}

impl<C: Connection> EntryService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            entry_repository: connection.create_entry_repository(),
        }
    }

    pub async fn list_entries(&self, user_id: &str) -> DomainResult<Vec<FinancialEntry>> {
        let entries = self.entry_repository.list_entries(user_id).await?;
        info!("Found {} entries for user {}", entries.len(), user_id);
        Ok(entries)
    }

    pub async fn get_entry(&self, user_id: &str, entry_id: &str) -> DomainResult<FinancialEntry> {
        match self.entry_repository.get_entry(user_id, entry_id).await? {
            Some(entry) => Ok(entry),
            None => {
                warn!("Entry {} not found for user {}", entry_id, user_id);
                Err(DomainError::NotFound("Entry".to_string()))
            }
        }
    }

    pub async fn create_entry(&self, command: CreateEntryCommand) -> DomainResult<EntryResult> {
        info!("Creating entry for user {}", command.user_id);

        let category = parse_category(command.category.as_deref())?
            .ok_or_else(|| DomainError::validation("category", "Category is required"))?;
        let amount = command
            .amount
            .ok_or_else(|| DomainError::validation("amount", "amount is required"))?;
        validate_amount(amount)?;
        validate_figures(command.cash, command.investment, command.current_value)?;

        let today = Utc::now();
        let month = resolve_month(command.month.as_deref(), command.month_number)?
            .unwrap_or_else(|| Month::from_index(today.month()).unwrap_or(Month::January));
        let year = command.year.unwrap_or(today.year());
        validate_year(year)?;

        let holding = Holding::resolve(
            &category,
            Some(amount),
            command.cash,
            command.investment,
            command.current_value,
            None,
        );

        let now = Utc::now();
        let entry = FinancialEntry {
            id: FinancialEntry::generate_id(),
            user_id: command.user_id,
            category,
            description: clean_description(command.description.as_deref()),
            holding,
            month,
            year,
            date_added: now,
            updated_at: now,
        };

        self.entry_repository.store_entry(&entry).await?;
        info!(
            "Created entry {} ({}, {}) for user {}",
            entry.id,
            entry.category,
            entry.key(),
            entry.user_id
        );

        Ok(EntryResult {
            entry,
            success_message: "Financial entry created successfully".to_string(),
        })
    }

    pub async fn update_entry(&self, command: UpdateEntryCommand) -> DomainResult<EntryResult> {
        info!("Updating entry {} for user {}", command.entry_id, command.user_id);

        let mut entry = self.get_entry(&command.user_id, &command.entry_id).await?;

        let category = parse_category(command.category.as_deref())?;
        if let Some(amount) = command.amount {
            validate_amount(amount)?;
        }
        validate_figures(command.cash, command.investment, command.current_value)?;
        let month = resolve_month(command.month.as_deref(), command.month_number)?;
        if let Some(year) = command.year {
            validate_year(year)?;
        }

        if let Some(category) = category {
            entry.category = category;
        }
        if command.description.is_some() {
            entry.description = clean_description(command.description.as_deref());
        }
        if let Some(month) = month {
            entry.month = month;
        }
        if let Some(year) = command.year {
            entry.year = year;
        }

        let previous = entry.holding;
        let untouched = command.amount.is_none()
            && command.cash.is_none()
            && command.investment.is_none()
            && command.current_value.is_none();
        entry.holding = if untouched && previous_matches_bucket(&entry.category, &previous) {
            previous
        } else {
            Holding::resolve(
                &entry.category,
                command.amount,
                command.cash,
                command.investment,
                command.current_value,
                Some(&previous),
            )
        };
        entry.updated_at = Utc::now();

        self.entry_repository.update_entry(&entry).await?;
        info!("Updated entry {}", entry.id);

        Ok(EntryResult {
            entry,
            success_message: "Financial entry updated successfully".to_string(),
        })
    }

    /// Removing an entry that is already gone still succeeds
    pub async fn delete_entry(&self, user_id: &str, entry_id: &str) -> DomainResult<DeleteEntryResult> {
        let deleted = self.entry_repository.delete_entry(user_id, entry_id).await?;
        if deleted {
            info!("Deleted entry {} for user {}", entry_id, user_id);
        } else {
            info!("Entry {} already absent for user {}", entry_id, user_id);
        }

        Ok(DeleteEntryResult {
            deleted,
            success_message: "Financial entry deleted successfully".to_string(),
        })
    }

    pub async fn clear_all(&self, user_id: &str) -> DomainResult<ClearAllResult> {
        let deleted_count = self.entry_repository.delete_all_entries(user_id).await?;
        info!("Cleared {} entries for user {}", deleted_count, user_id);

        Ok(ClearAllResult {
            deleted_count,
            success_message: format!("Deleted {} financial entries", deleted_count),
        })
    }

    /// Distinct non-empty descriptions, for title autocomplete
    pub async fn titles(&self, user_id: &str) -> DomainResult<Vec<String>> {
        let mut titles: Vec<String> = self
            .entry_repository
            .list_entries(user_id)
            .await?
            .into_iter()
            .filter_map(|entry| entry.description)
            .filter(|description| !description.trim().is_empty())
            .collect();

        titles.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
        titles.dedup();
        Ok(titles)
    }

    pub async fn stats(&self, user_id: &str) -> DomainResult<EntryStats> {
        let entries = self.entry_repository.list_entries(user_id).await?;
        Ok(summarize(&entries))
    }
}

fn parse_category(raw: Option<&str>) -> DomainResult<Option<Category>> {
    match raw {
        Some(raw) => {
            let cleaned = sanitize_text(raw);
            validate_category(&cleaned)?;
            Ok(Some(Category::parse(&cleaned)))
        }
        None => Ok(None),
    }
}

fn validate_figures(cash: Option<f64>, investment: Option<f64>, current_value: Option<f64>) -> DomainResult<()> {
    if let Some(cash) = cash {
        validate_money("cash", cash)?;
    }
    if let Some(investment) = investment {
        validate_money("investment", investment)?;
    }
    if let Some(current_value) = current_value {
        validate_money("current_value", current_value)?;
    }
    Ok(())
}

/// A month name takes precedence over `month_number`
fn resolve_month(name: Option<&str>, number: Option<u32>) -> DomainResult<Option<Month>> {
    if let Some(name) = name {
        return Month::from_name(name)
            .map(Some)
            .map_err(|e| DomainError::validation("month", e.to_string()));
    }
    match number {
        Some(number) => {
            validate_month_number(number)?;
            Ok(Month::from_index(number))
        }
        None => Ok(None),
    }
}

fn clean_description(raw: Option<&str>) -> Option<String> {
    raw.map(sanitize_text).filter(|description| !description.is_empty())
}

fn previous_matches_bucket(category: &Category, holding: &Holding) -> bool {
    matches!(
        (category.is_liquid(), holding),
        (true, Holding::Liquid { .. }) | (false, Holding::Invested { .. })
    )
}
