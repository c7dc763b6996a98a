//! Expense service
//!
//! Validation and lookup on top of the expense store. The store itself
//! accepts whatever it is given; everything entering it through this
//! service has been trimmed and validated first.

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseCategory, ExpenseId, ExpenseUpdate, Money, MonthPeriod};
use crate::store::ExpenseStore;

/// Service for expense management
pub struct ExpenseService<'a> {
    store: &'a mut ExpenseStore,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Only expenses on this exact day
    pub date: Option<NaiveDate>,
    /// Only expenses in this month
    pub period: Option<MonthPeriod>,
    pub category: Option<ExpenseCategory>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn period(mut self, period: MonthPeriod) -> Self {
        self.period = Some(period);
        self
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, expense: &Expense) -> bool {
        self.date.map_or(true, |d| expense.date == d)
            && self.period.map_or(true, |p| p.contains(expense.date))
            && self.category.map_or(true, |c| expense.category == c)
    }
}

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub amount: Money,
    pub description: String,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(store: &'a mut ExpenseStore) -> Self {
        Self { store }
    }

    /// Validate and record a new expense
    pub fn create(&mut self, input: CreateExpenseInput) -> ExpenseResult<Expense> {
        let expense = Expense::new(
            input.date,
            input.category,
            input.amount,
            input.description.trim(),
        );

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.store.add(expense.clone());
        Ok(expense)
    }

    /// Get an expense by exact ID
    pub fn get(&self, id: &ExpenseId) -> Option<Expense> {
        self.store.get(id).cloned()
    }

    /// Find an expense by full ID or unique ID prefix
    ///
    /// A prefix matching more than one expense is a validation error.
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Expense>> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }

        let expenses = self.store.expenses();
        if let Some(exact) = expenses.iter().find(|e| e.id.as_str() == identifier) {
            return Ok(Some(exact.clone()));
        }

        let mut matches = expenses
            .iter()
            .filter(|e| e.id.as_str().starts_with(identifier));

        match (matches.next(), matches.next()) {
            (None, _) => Ok(None),
            (Some(only), None) => Ok(Some(only.clone())),
            (Some(_), Some(_)) => Err(ExpenseError::Validation(format!(
                "ID prefix '{}' matches more than one expense",
                identifier
            ))),
        }
    }

    /// Like [`find`](Self::find), but a missing expense is an error
    pub fn resolve(&self, identifier: &str) -> ExpenseResult<Expense> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::expense_not_found(identifier))
    }

    /// List expenses in storage order, optionally filtered
    pub fn list(&self, filter: &ExpenseFilter) -> Vec<Expense> {
        let matching = self.store.expenses().iter().filter(|e| filter.matches(e));
        match filter.limit {
            Some(limit) => matching.take(limit).cloned().collect(),
            None => matching.cloned().collect(),
        }
    }

    /// Apply a partial update after validating the merged result
    pub fn edit(&mut self, id: &ExpenseId, mut update: ExpenseUpdate) -> ExpenseResult<Expense> {
        let mut merged = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))?;

        if let Some(description) = update.description.as_mut() {
            *description = description.trim().to_string();
        }

        merged.apply(&update);
        merged
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.store
            .update(id, &update)
            .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))
    }

    /// Delete the given expenses, returning how many were removed
    pub fn remove(&mut self, ids: &[ExpenseId]) -> usize {
        match ids {
            [id] => usize::from(self.store.delete(id).is_some()),
            _ => self.store.delete_many(ids),
        }
    }

    /// Delete everything, returning how many expenses were removed
    pub fn clear(&mut self) -> usize {
        self.store.clear()
    }
}
