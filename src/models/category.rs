//! Expense category
//!
//! Categories form a fixed, closed set. Anything outside it is rejected when
//! parsed, so every stored expense carries one of these four values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category an expense is grouped under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    /// Everyday purchases
    Daily,
    /// Groceries and eating out
    Food,
    /// Fares, fuel, parking
    Transportation,
    /// Leisure and entertainment
    Recreation,
}

impl ExpenseCategory {
    /// All categories, in the order they are laid out on the chart
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Daily,
        ExpenseCategory::Food,
        ExpenseCategory::Transportation,
        ExpenseCategory::Recreation,
    ];

    /// Storage key of the category (the serialized form)
    pub fn key(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Food => "food",
            Self::Transportation => "transportation",
            Self::Recreation => "recreation",
        }
    }

    /// Parse category from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "food" => Some(Self::Food),
            "transportation" | "transport" => Some(Self::Transportation),
            "recreation" => Some(Self::Recreation),
            _ => None,
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "Daily"),
            Self::Food => write!(f, "Food"),
            Self::Transportation => write!(f, "Transportation"),
            Self::Recreation => write!(f, "Recreation"),
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "unknown category '{}' (expected one of: daily, food, transportation, recreation)",
                s.trim()
            )
        })
    }
}
