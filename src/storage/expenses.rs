//! Expense repository
//!
//! Reads and writes the whole expense list to one storage slot. Loading is
//! forgiving: a missing, unreadable or malformed slot yields an empty list
//! and a warning instead of an error, so the application always starts.

use tracing::{debug, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

use super::slot::SlotStore;

/// Persistence adapter for the expense list
pub struct ExpenseRepository {
    slots: Box<dyn SlotStore>,
}

impl ExpenseRepository {
    /// Create a repository on top of a slot store
    pub fn new(slots: Box<dyn SlotStore>) -> Self {
        Self { slots }
    }

    /// Load the expense list stored under `slot`
    ///
    /// Never fails: absence gives an empty list silently, read or parse
    /// failures give an empty list and a warning.
    pub fn load(&self, slot: &str) -> Vec<Expense> {
        match self.try_load(slot) {
            Ok(Some(expenses)) => {
                debug!(slot, count = expenses.len(), "loaded expenses");
                expenses
            }
            Ok(None) => {
                debug!(slot, "slot is empty, starting with no expenses");
                Vec::new()
            }
            Err(e) => {
                warn!(slot, error = %e, "discarding unreadable expense data");
                Vec::new()
            }
        }
    }

    /// Load the expense list, reporting why it could not be read
    pub fn try_load(&self, slot: &str) -> ExpenseResult<Option<Vec<Expense>>> {
        let Some(contents) = self.slots.read_slot(slot)? else {
            return Ok(None);
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| ExpenseError::Json(format!("Malformed expense list in '{}': {}", slot, e)))
    }

    /// Overwrite `slot` with the full expense list
    pub fn save(&self, slot: &str, expenses: &[Expense]) -> ExpenseResult<()> {
        let contents = serde_json::to_string(expenses)?;
        self.slots.write_slot(slot, &contents)?;
        debug!(slot, count = expenses.len(), "saved expenses");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money};
    use crate::storage::slot::{FileSlotStore, MemorySlotStore};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn expense(y: i32, m: u32, d: u32, category: ExpenseCategory, cents: i64) -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            category,
            Money::from_cents(cents),
            "test",
        )
    }

    fn memory_repo() -> (MemorySlotStore, ExpenseRepository) {
        let slots = MemorySlotStore::new();
        let repo = ExpenseRepository::new(Box::new(slots.clone()));
        (slots, repo)
    }

    #[test]
    fn test_load_missing_slot_is_empty() {
        let (_slots, repo) = memory_repo();
        assert!(repo.load("expenses").is_empty());
        assert!(repo.try_load("expenses").unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_slots, repo) = memory_repo();
        let expenses = vec![
            expense(2024, 1, 5, ExpenseCategory::Food, 1050),
            expense(2024, 2, 29, ExpenseCategory::Recreation, 4000),
            expense(2023, 12, 31, ExpenseCategory::Daily, 1),
        ];

        repo.save("expenses", &expenses).unwrap();
        let loaded = repo.load("expenses");

        assert_eq!(loaded, expenses);
        assert_eq!(loaded[1].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_round_trip_through_files() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(Box::new(FileSlotStore::new(
            temp_dir.path().to_path_buf(),
        )));
        let expenses = vec![expense(2025, 3, 1, ExpenseCategory::Transportation, 275)];

        repo.save("expenses", &expenses).unwrap();

        let reopened = ExpenseRepository::new(Box::new(FileSlotStore::new(
            temp_dir.path().to_path_buf(),
        )));
        assert_eq!(reopened.load("expenses"), expenses);
    }

    #[test]
    fn test_corrupt_data_yields_empty_list() {
        let (slots, repo) = memory_repo();

        slots.seed("expenses", "not json at all").unwrap();
        assert!(repo.load("expenses").is_empty());
        assert!(repo.try_load("expenses").is_err());

        slots.seed("expenses", r#"{"id": "a"}"#).unwrap();
        assert!(repo.load("expenses").is_empty());

        slots
            .seed(
                "expenses",
                r#"[{"id":"a","date":"2024-01-01","category":"rent","amount":1,"description":"x"}]"#,
            )
            .unwrap();
        assert!(repo.load("expenses").is_empty());
    }

    #[test]
    fn test_loads_browser_written_data() {
        let (slots, repo) = memory_repo();
        slots
            .seed(
                "expenses",
                r#"[{"id":"k1","date":"2024-01-15T12:00:00.000Z","category":"food","amount":12.5,"description":"Lunch"}]"#,
            )
            .unwrap();

        let loaded = repo.load("expenses");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id.as_str(), "k1");
        assert_eq!(loaded[0].amount, Money::from_cents(1250));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let (slots, repo) = memory_repo();
        slots.set_fail_writes(true);

        let result = repo.save("expenses", &[]);
        assert!(matches!(result, Err(ExpenseError::Storage(_))));
    }
}
