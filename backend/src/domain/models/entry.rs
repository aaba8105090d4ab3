use chrono::{DateTime, Utc};
use shared::{Category, Month, MonthKey};

/// Monetary figures of an entry, shaped by its category's bucket.
///
/// A liquid holding only has cash; its current value is the cash itself and
/// nothing is invested. An invested holding never carries cash.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Holding {
    Liquid { cash: f64 },
    Invested { investment: f64, current_value: f64 },
}

impl Holding {
    /// Resolve submitted figures into the bucket `category` dictates.
    ///
    /// `amount` fills whichever figure the bucket needs when that figure is
    /// not given explicitly. With neither, the total of `previous` is carried
    /// over so a category change keeps the recorded worth.
    pub fn resolve(
        category: &Category,
        amount: Option<f64>,
        cash: Option<f64>,
        investment: Option<f64>,
        current_value: Option<f64>,
        previous: Option<&Holding>,
    ) -> Holding {
        let carried = previous.map(Holding::amount).unwrap_or(0.0);

        if category.is_liquid() {
            return Holding::Liquid {
                cash: cash.or(amount).unwrap_or(carried),
            };
        }

        let contributed = investment.or(amount);
        let investment = contributed.unwrap_or(carried);
        let current_value = current_value.unwrap_or(match (contributed, previous) {
            (None, Some(Holding::Invested { current_value, .. })) => *current_value,
            _ => investment,
        });
        Holding::Invested {
            investment,
            current_value,
        }
    }

    /// Rebuild from stored columns, re-applying the bucket rules
    pub fn from_columns(category: &Category, cash: f64, investment: f64, current_value: f64) -> Holding {
        if category.is_liquid() {
            Holding::Liquid { cash }
        } else {
            Holding::Invested {
                investment,
                current_value,
            }
        }
    }

    pub fn cash(&self) -> f64 {
        match self {
            Holding::Liquid { cash } => *cash,
            Holding::Invested { .. } => 0.0,
        }
    }

    pub fn investment(&self) -> f64 {
        match self {
            Holding::Liquid { .. } => 0.0,
            Holding::Invested { investment, .. } => *investment,
        }
    }

    pub fn current_value(&self) -> f64 {
        match self {
            Holding::Liquid { cash } => *cash,
            Holding::Invested { current_value, .. } => *current_value,
        }
    }

    /// Recorded amount: cash + investment
    pub fn amount(&self) -> f64 {
        self.cash() + self.investment()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialEntry {
    pub id: String,
    pub user_id: String,
    pub category: Category,
    pub description: Option<String>,
    pub holding: Holding,
    pub month: Month,
    pub year: i32,
    pub date_added: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FinancialEntry {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    pub fn key(&self) -> MonthKey {
        MonthKey::new(self.month, self.year)
    }
}
