use chrono::{Datelike, Utc};
use shared::{Category, CreateEntryRequest, FinancialEntry, Month, MonthKey, UpdateEntryRequest};
use tracing::{info, warn};

use super::{notice_for, Notice};
use crate::errors::ClientError;
use crate::session::Session;
use crate::store::EntryStore;

const MAX_AMOUNT: f64 = 1_000_000_000.0;
const MAX_SUGGESTIONS: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Add/edit form for one particular
#[derive(Debug, Clone, PartialEq)]
pub struct ParticularsForm {
    pub category: String,
    pub title: String,
    pub cash: Option<f64>,
    pub investment: Option<f64>,
    pub current_value: Option<f64>,
    pub month: Month,
    pub year: i32,
}

fn check_amount(errors: &mut Vec<FieldError>, field: &str, label: &str, value: Option<f64>, required: bool) {
    match value {
        None if required => errors.push(FieldError::new(field, format!("{} is required", label))),
        None => {}
        Some(v) if !v.is_finite() => errors.push(FieldError::new(field, format!("{} must be a number", label))),
        Some(v) if v < 0.0 => errors.push(FieldError::new(field, format!("{} cannot be negative", label))),
        Some(v) if required && v == 0.0 => {
            errors.push(FieldError::new(field, format!("{} must be greater than zero", label)))
        }
        Some(v) if v >= MAX_AMOUNT => errors.push(FieldError::new(field, format!("{} is too large", label))),
        Some(_) => {}
    }
}

impl ParticularsForm {
    pub fn for_month(key: MonthKey) -> Self {
        Self {
            category: String::new(),
            title: String::new(),
            cash: None,
            investment: None,
            current_value: None,
            month: key.month,
            year: key.year,
        }
    }

    pub fn from_entry(entry: &FinancialEntry) -> Self {
        Self {
            category: entry.category.name().to_string(),
            title: entry.description.clone().unwrap_or_default(),
            cash: Some(entry.cash),
            investment: Some(entry.investment),
            current_value: Some(entry.current_value),
            month: entry.month,
            year: entry.year,
        }
    }

    pub fn category(&self) -> Category {
        Category::parse(&self.category)
    }

    /// Liquid categories only take a cash figure
    pub fn is_liquid(&self) -> bool {
        self.category().is_liquid()
    }

    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let category = self.category.trim();
        if category.is_empty() {
            errors.push(FieldError::new("category", "Category is required"));
        } else if category.chars().count() > 50 {
            errors.push(FieldError::new("category", "Category must be at most 50 characters"));
        }

        if self.is_liquid() {
            check_amount(&mut errors, "cash", "Cash", self.cash, true);
        } else {
            check_amount(&mut errors, "investment", "Investment", self.investment, true);
            check_amount(&mut errors, "current_value", "Current value", self.current_value, false);
        }

        if !(1900..=2100).contains(&self.year) {
            errors.push(FieldError::new("year", "Year must be between 1900 and 2100"));
        }
        errors
    }

    /// Figures as they will be stored: (cash, investment, current_value)
    fn figures(&self) -> (f64, f64, f64) {
        if self.is_liquid() {
            let cash = self.cash.unwrap_or(0.0);
            (cash, 0.0, cash)
        } else {
            let investment = self.investment.unwrap_or(0.0);
            (0.0, investment, self.current_value.unwrap_or(investment))
        }
    }

    fn description(&self) -> Option<String> {
        let title = self.title.trim();
        if title.is_empty() {
            None
        } else {
            Some(title.to_string())
        }
    }

    pub fn to_create_request(&self) -> Result<CreateEntryRequest, Vec<FieldError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        let (cash, investment, current_value) = self.figures();
        Ok(CreateEntryRequest {
            category: Some(self.category.trim().to_string()),
            description: self.description(),
            amount: Some(cash + investment),
            cash: Some(cash),
            investment: Some(investment),
            current_value: Some(current_value),
            month: Some(self.month.name().to_string()),
            month_number: None,
            year: Some(self.year),
        })
    }

    pub fn to_update_request(&self) -> Result<UpdateEntryRequest, Vec<FieldError>> {
        let request = self.to_create_request()?;
        Ok(UpdateEntryRequest {
            category: request.category,
            description: Some(request.description.unwrap_or_default()),
            amount: request.amount,
            cash: request.cash,
            investment: request.investment,
            current_value: request.current_value,
            month: request.month,
            month_number: None,
            year: request.year,
        })
    }
}

pub fn current_month_key() -> MonthKey {
    let today = Utc::now();
    MonthKey::new(Month::from_index(today.month()).unwrap_or(Month::January), today.year())
}

pub struct ParticularsController<S> {
    store: S,
    session: Session,
    editing: Option<String>,
    pub form: ParticularsForm,
    pub errors: Vec<FieldError>,
    pub titles: Vec<String>,
    pub notice: Option<Notice>,
}

impl<S: EntryStore> ParticularsController<S> {
    pub fn new(store: S, session: Session) -> Self {
        Self {
            store,
            session,
            editing: None,
            form: ParticularsForm::for_month(current_month_key()),
            errors: Vec::new(),
            titles: Vec::new(),
            notice: None,
        }
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Previously used titles for autocomplete
    pub async fn load_titles(&mut self) {
        match self.store.titles(&self.session).await {
            Ok(titles) => self.titles = titles,
            Err(e) => {
                warn!("Failed to load titles: {}", e);
                self.notice = Some(notice_for(&e));
            }
        }
    }

    /// Titles matching the typed text; prefix matches first
    pub fn suggestions(&self, input: &str) -> Vec<&str> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let (mut prefixed, contained): (Vec<&str>, Vec<&str>) = self
            .titles
            .iter()
            .map(String::as_str)
            .filter(|title| title.to_lowercase().contains(&needle))
            .partition(|title| title.to_lowercase().starts_with(&needle));
        prefixed.extend(contained);
        prefixed.truncate(MAX_SUGGESTIONS);
        prefixed
    }

    /// Load an existing particular into the form
    pub async fn edit(&mut self, id: &str) -> bool {
        match self.store.get(&self.session, id).await {
            Ok(entry) => {
                self.form = ParticularsForm::from_entry(&entry);
                self.editing = Some(entry.id);
                self.errors.clear();
                true
            }
            Err(e) => {
                warn!("Failed to load entry {}: {}", id, e);
                self.notice = Some(notice_for(&e));
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.form = ParticularsForm::for_month(MonthKey::new(self.form.month, self.form.year));
        self.editing = None;
        self.errors.clear();
    }

    /// Validate and save; the form is kept as typed when anything fails
    pub async fn submit(&mut self) -> Option<FinancialEntry> {
        self.errors.clear();
        let result = match self.editing.clone() {
            Some(id) => match self.form.to_update_request() {
                Ok(request) => self.store.update(&self.session, &id, &request).await,
                Err(errors) => return self.reject(errors),
            },
            None => match self.form.to_create_request() {
                Ok(request) => self.store.create(&self.session, &request).await,
                Err(errors) => return self.reject(errors),
            },
        };

        match result {
            Ok(entry) => {
                info!("Saved particular {}", entry.id);
                let message = if self.editing.is_some() {
                    "Particular updated"
                } else {
                    "Particular added"
                };
                if let Some(title) = entry.description.as_deref() {
                    if !self.titles.iter().any(|t| t == title) {
                        self.titles.push(title.to_string());
                    }
                }
                self.notice = Some(Notice::Toast(message.to_string()));
                self.reset();
                Some(entry)
            }
            Err(e) => {
                warn!("Failed to save particular: {}", e);
                if let ClientError::Validation {
                    field: Some(field),
                    message,
                } = &e
                {
                    self.errors.push(FieldError::new(field, message.clone()));
                }
                self.notice = Some(notice_for(&e));
                None
            }
        }
    }

    fn reject(&mut self, errors: Vec<FieldError>) -> Option<FinancialEntry> {
        self.notice = errors.first().map(|error| Notice::Field {
            field: error.field.clone(),
            message: error.message.clone(),
        });
        self.errors = errors;
        None
    }
}
