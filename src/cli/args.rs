//! Argument parsing shared by the CLI handlers

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseCategory, Money, MonthPeriod};

pub fn parse_amount(s: &str) -> ExpenseResult<Money> {
    Money::parse(s).map_err(|e| {
        ExpenseError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '12.50' or '12'. Error: {}",
            s, e
        ))
    })
}

pub fn parse_date(s: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

pub fn parse_month(s: &str) -> ExpenseResult<MonthPeriod> {
    MonthPeriod::parse(s).map_err(|e| ExpenseError::Validation(e.to_string()))
}

pub fn parse_category(s: &str) -> ExpenseResult<ExpenseCategory> {
    ExpenseCategory::parse(s).ok_or_else(|| {
        let names: Vec<_> = ExpenseCategory::ALL.iter().map(|c| c.key()).collect();
        ExpenseError::Validation(format!(
            "Invalid category: '{}'. Use one of: {}",
            s,
            names.join(", ")
        ))
    })
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_amount("$12.50").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("twelve").unwrap_err().is_validation());

        assert_eq!(
            parse_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(parse_date("15/01/2024").is_err());

        assert_eq!(parse_month("2024-01").unwrap().month0(), 0);
        assert!(parse_month("2024-13").is_err());

        assert_eq!(parse_category("FOOD").unwrap(), ExpenseCategory::Food);
        let err = parse_category("rent").unwrap_err();
        assert!(err.to_string().contains("daily, food, transportation, recreation"));
    }
}
