use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Category of a financial particular.
///
/// Every category is either liquid (cash-like, only the cash figure matters)
/// or invested (tracks the contributed amount and a separate current value).
/// Names outside the known set are kept verbatim as `Custom` and treated as
/// investments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    BankAccount,
    CashInHand,
    RecurringDeposit,
    ProvidentFund,
    FixedDeposit,
    MutualFund,
    Stocks,
    RealEstate,
    Gold,
    CryptoCurrency,
    Bonds,
    Other,
    Custom(String),
}

impl Category {
    /// Categories offered by the entry form, in display order
    pub fn known() -> Vec<Category> {
        vec![
            Category::BankAccount,
            Category::CashInHand,
            Category::RecurringDeposit,
            Category::ProvidentFund,
            Category::FixedDeposit,
            Category::MutualFund,
            Category::Stocks,
            Category::RealEstate,
            Category::Gold,
            Category::CryptoCurrency,
            Category::Bonds,
            Category::Other,
        ]
    }

    /// Display name, also used on the wire
    pub fn name(&self) -> &str {
        match self {
            Category::BankAccount => "Bank Account",
            Category::CashInHand => "Cash in Hand",
            Category::RecurringDeposit => "Recurring Deposit",
            Category::ProvidentFund => "Provident Fund",
            Category::FixedDeposit => "Fixed Deposit",
            Category::MutualFund => "Mutual Fund",
            Category::Stocks => "Stocks",
            Category::RealEstate => "Real Estate",
            Category::Gold => "Gold",
            Category::CryptoCurrency => "Crypto Currency",
            Category::Bonds => "Bonds",
            Category::Other => "Other",
            Category::Custom(name) => name,
        }
    }

    /// Liquid categories only carry a cash balance; everything else is an investment
    pub fn is_liquid(&self) -> bool {
        matches!(
            self,
            Category::BankAccount
                | Category::CashInHand
                | Category::RecurringDeposit
                | Category::ProvidentFund
        )
    }

    /// Parse a category name, matching known names case-insensitively
    pub fn parse(name: &str) -> Category {
        let trimmed = name.trim();
        Category::known()
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| Category::Custom(trimmed.to_string()))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::parse(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the twelve canonical months. Declaration order is calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Canonical index, January = 1
    pub fn index(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn from_index(index: u32) -> Option<Month> {
        if (1..=12).contains(&index) {
            Some(Self::ALL[(index - 1) as usize])
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Three-letter label used on chart axes
    pub fn short_name(&self) -> &'static str {
        &self.name()[..3]
    }

    /// Accepts the full name or the three-letter abbreviation, any case
    pub fn from_name(name: &str) -> Result<Month, MonthParseError> {
        let trimmed = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|month| {
                month.name().eq_ignore_ascii_case(trimmed)
                    || month.short_name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| MonthParseError(trimmed.to_string()))
    }
}

impl TryFrom<String> for Month {
    type Error = MonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Month::from_name(&value)
    }
}

impl From<Month> for String {
    fn from(value: Month) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthParseError(pub String);

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid month name: {:?}", self.0)
    }
}

impl std::error::Error for MonthParseError {}

/// A (month, year) bucket. Orders chronologically: year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: Month,
}

impl MonthKey {
    pub fn new(month: Month, year: i32) -> Self {
        Self { year, month }
    }

    /// e.g. "January-2026"
    pub fn label(&self) -> String {
        format!("{}-{}", self.month.name(), self.year)
    }

    /// e.g. "Jan-2026"
    pub fn short_label(&self) -> String {
        format!("{}-{}", self.month.short_name(), self.year)
    }

    /// Parse "January-2026" or "Jan-2026"
    pub fn parse(label: &str) -> Result<MonthKey, MonthParseError> {
        let (month, year) = label
            .trim()
            .rsplit_once('-')
            .ok_or_else(|| MonthParseError(label.to_string()))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| MonthParseError(label.to_string()))?;
        Ok(MonthKey::new(Month::from_name(month)?, year))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A stored financial particular
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialEntry {
    pub id: String,
    /// Owner; always taken from the session, never from request bodies
    pub user_id: String,
    pub category: Category,
    /// Free-text title chosen by the user
    pub description: Option<String>,
    /// Total recorded amount (cash + investment)
    pub amount: f64,
    /// Cash balance, only non-zero for liquid categories
    pub cash: f64,
    /// Amount originally contributed, only non-zero for invested categories
    pub investment: f64,
    /// Present worth; mirrors cash for liquid categories
    pub current_value: f64,
    pub month: Month,
    pub year: i32,
    pub date_added: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FinancialEntry {
    pub fn key(&self) -> MonthKey {
        MonthKey::new(self.month, self.year)
    }

    /// Title for table display, falling back to the category name
    pub fn title(&self) -> &str {
        match self.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => description,
            _ => self.category.name(),
        }
    }
}

/// Body of POST /financial
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateEntryRequest {
    pub category: Option<String>,
    pub description: Option<String>,
    /// Required, must be positive
    pub amount: Option<f64>,
    pub cash: Option<f64>,
    pub investment: Option<f64>,
    pub current_value: Option<f64>,
    /// Month name; `month_number` is accepted as an alternative
    pub month: Option<String>,
    pub month_number: Option<u32>,
    pub year: Option<i32>,
}

/// Body of PUT /financial/{id}; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEntryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl UpdateEntryRequest {
    pub fn is_empty(&self) -> bool {
        self == &UpdateEntryRequest::default()
    }
}

/// Aggregate figures returned by GET /financial/stats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStats {
    pub total_amount: f64,
    pub total_entries: usize,
    /// Category name -> summed amount
    pub category_breakdown: BTreeMap<String, f64>,
    pub average_amount: f64,
}

/// Result of DELETE /financial/{id}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEntryResponse {
    /// False when there was nothing to delete
    pub deleted: bool,
    pub message: String,
}

/// Result of DELETE /financial/clear-all
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearAllResponse {
    pub deleted_count: u64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Public profile linked 1:1 to an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Authenticated account together with its profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub profile: Option<UserProfile>,
}

/// Bearer credential handed out on sign-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub user: CurrentUser,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInResponse {
    pub user: CurrentUser,
    pub session: SessionInfo,
    pub message: String,
}

/// Body of PUT /user/profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Standard `{ "data": ..., "message": ... }` wrapper used by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data, message: None }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body returned for every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    /// Name of the offending input field, when the error is tied to one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key_orders_by_year_then_month() {
        let march_2024 = MonthKey::new(Month::March, 2024);
        let january_2025 = MonthKey::new(Month::January, 2025);
        let december_2024 = MonthKey::new(Month::December, 2024);

        let mut keys = vec![january_2025, march_2024, december_2024];
        keys.sort();

        assert_eq!(keys, vec![march_2024, december_2024, january_2025]);
    }

    #[test]
    fn test_month_parsing() {
        assert_eq!(Month::from_name("january"), Ok(Month::January));
        assert_eq!(Month::from_name(" Sep "), Ok(Month::September));
        assert!(Month::from_name("Smarch").is_err());
        assert_eq!(Month::from_index(12), Some(Month::December));
        assert_eq!(Month::from_index(0), None);
        assert_eq!(Month::from_index(13), None);
        assert_eq!(Month::April.index(), 4);
    }

    #[test]
    fn test_month_key_labels() {
        let key = MonthKey::new(Month::January, 2026);
        assert_eq!(key.label(), "January-2026");
        assert_eq!(key.short_label(), "Jan-2026");
        assert_eq!(MonthKey::parse("January-2026"), Ok(key));
        assert_eq!(MonthKey::parse("jan-2026"), Ok(key));
        assert!(MonthKey::parse("2026").is_err());
    }

    #[test]
    fn test_category_classification() {
        for liquid in ["Bank Account", "Cash in Hand", "Recurring Deposit", "Provident Fund"] {
            assert!(Category::parse(liquid).is_liquid(), "{} should be liquid", liquid);
        }
        for invested in ["Mutual Fund", "Stocks", "Gold", "Crypto Currency", "Other"] {
            assert!(!Category::parse(invested).is_liquid(), "{} should be invested", invested);
        }

        let custom = Category::parse("Art Collection");
        assert_eq!(custom, Category::Custom("Art Collection".to_string()));
        assert!(!custom.is_liquid());
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(Category::parse("bank account"), Category::BankAccount);
        assert_eq!(Category::parse("  STOCKS "), Category::Stocks);
    }

    #[test]
    fn test_entry_serializes_category_and_month_as_names() {
        let now = Utc::now();
        let entry = FinancialEntry {
            id: "e1".to_string(),
            user_id: "u1".to_string(),
            category: Category::MutualFund,
            description: Some("Index fund".to_string()),
            amount: 500.0,
            cash: 0.0,
            investment: 500.0,
            current_value: 550.0,
            month: Month::February,
            year: 2024,
            date_added: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["category"], "Mutual Fund");
        assert_eq!(json["month"], "February");

        let back: FinancialEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_entry_title_falls_back_to_category() {
        let now = Utc::now();
        let mut entry = FinancialEntry {
            id: "e1".to_string(),
            user_id: "u1".to_string(),
            category: Category::Gold,
            description: None,
            amount: 1.0,
            cash: 0.0,
            investment: 1.0,
            current_value: 1.0,
            month: Month::May,
            year: 2024,
            date_added: now,
            updated_at: now,
        };
        assert_eq!(entry.title(), "Gold");

        entry.description = Some("   ".to_string());
        assert_eq!(entry.title(), "Gold");

        entry.description = Some("Sovereign bonds".to_string());
        assert_eq!(entry.title(), "Sovereign bonds");
    }

    #[test]
    fn test_empty_update_request() {
        assert!(UpdateEntryRequest::default().is_empty());
        let update = UpdateEntryRequest {
            cash: Some(10.0),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
