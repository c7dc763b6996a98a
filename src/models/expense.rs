//! Expense model
//!
//! An expense is a dated, categorized amount with a short description.
//! Dates are calendar dates; no time-of-day is kept.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::ExpenseId;
use super::money::Money;

/// Maximum description length, in characters
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Largest amount a single expense may carry
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000_000);

/// A single expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, minted at creation and never changed
    pub id: ExpenseId,

    /// Day the money was spent
    #[serde(with = "date_format")]
    pub date: NaiveDate,

    pub category: ExpenseCategory,

    /// Amount spent (always positive once validated)
    pub amount: Money,

    pub description: String,
}

impl Expense {
    /// Create a new expense with a freshly minted id
    pub fn new(
        date: NaiveDate,
        category: ExpenseCategory,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            date,
            category,
            amount,
            description: description.into(),
        }
    }

    /// Apply a partial update, leaving unspecified fields untouched
    pub fn apply(&mut self, update: &ExpenseUpdate) {
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > MAX_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        let len = self.description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(ExpenseValidationError::DescriptionTooLong(len));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.description,
            self.amount
        )
    }
}

/// Partial update of an expense; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseUpdate {
    pub date: Option<NaiveDate>,
    pub category: Option<ExpenseCategory>,
    pub amount: Option<Money>,
    pub description: Option<String>,
}

impl ExpenseUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True when the update would not change anything
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.description.is_none()
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    EmptyDescription,
    DescriptionTooLong(usize),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount must be at most {} (got {})", MAX_AMOUNT, amount)
            }
            Self::EmptyDescription => write!(f, "Description must not be empty"),
            Self::DescriptionTooLong(len) => write!(
                f,
                "Description must be at most {} characters (got {})",
                MAX_DESCRIPTION_LEN, len
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Serde adapter for expense dates.
///
/// Writes `YYYY-MM-DD`. Reads that form, and also full timestamps as a
/// browser `Date.toJSON()` produces them (`2024-01-15T05:00:00.000Z`),
/// keeping the calendar date as seen in local time.
mod date_format {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", s)))
    }

    pub(super) fn parse(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, FORMAT) {
            return Some(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Local).date_naive());
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|dt| dt.date())
    }
}
