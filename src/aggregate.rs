//! Aggregation over the expense list
//!
//! Everything here is a pure function of an expense slice and an optional
//! month filter. Nothing is cached; callers recompute on each read (once per
//! render in an interactive front end).

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Expense, ExpenseCategory, Money, MonthPeriod};

/// Total spent in one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: Money,
}

/// Category → total mapping
///
/// Only categories with at least one matching expense are present. Entries
/// keep the order in which their category was first encountered, which is
/// what makes ranking ties deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
}

impl CategoryTotals {
    fn add(&mut self, category: ExpenseCategory, amount: Money) {
        match self.entries.iter_mut().find(|t| t.category == category) {
            Some(entry) => entry.total += amount,
            None => self.entries.push(CategoryTotal {
                category,
                total: amount,
            }),
        }
    }

    /// Total for a category, `None` if nothing was spent in it
    pub fn get(&self, category: ExpenseCategory) -> Option<Money> {
        self.entries
            .iter()
            .find(|t| t.category == category)
            .map(|t| t.total)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all categories
    pub fn grand_total(&self) -> Money {
        self.entries.iter().map(|t| t.total).sum()
    }

    /// Totals sorted by amount, highest first; ties keep encounter order
    pub fn ranked(&self) -> Vec<CategoryTotal> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.total.cmp(&a.total));
        ranked
    }
}

impl<'a> IntoIterator for &'a CategoryTotals {
    type Item = &'a CategoryTotal;
    type IntoIter = std::slice::Iter<'a, CategoryTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Spending on a single calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total: Money,
    pub count: usize,
}

/// Expenses matching an optional month filter, in storage order
pub fn filter_by_period(
    expenses: &[Expense],
    period: Option<MonthPeriod>,
) -> impl Iterator<Item = &Expense> {
    expenses
        .iter()
        .filter(move |e| period.map_or(true, |p| p.contains(e.date)))
}

/// Category → total for the matching expenses
pub fn category_totals(expenses: &[Expense], period: Option<MonthPeriod>) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for expense in filter_by_period(expenses, period) {
        totals.add(expense.category, expense.amount);
    }
    totals
}

/// Category totals sorted by amount, highest first (stable on ties)
pub fn category_totals_ranked(
    expenses: &[Expense],
    period: Option<MonthPeriod>,
) -> Vec<CategoryTotal> {
    category_totals(expenses, period).ranked()
}

/// The category with the highest total, if anything was spent
pub fn top_category(expenses: &[Expense], period: Option<MonthPeriod>) -> Option<CategoryTotal> {
    category_totals_ranked(expenses, period).into_iter().next()
}

/// Total for one category (zero when nothing was spent in it)
pub fn category_total(
    expenses: &[Expense],
    category: ExpenseCategory,
    period: Option<MonthPeriod>,
) -> Money {
    category_totals(expenses, period)
        .get(category)
        .unwrap_or_default()
}

/// Share of the grand total spent in `category`, in percent
///
/// Zero when the grand total is zero.
pub fn category_percentage(
    expenses: &[Expense],
    category: ExpenseCategory,
    period: Option<MonthPeriod>,
) -> f64 {
    let totals = category_totals(expenses, period);
    totals
        .get(category)
        .unwrap_or_default()
        .percentage_of(totals.grand_total())
}

/// Everything spent in the given month
pub fn monthly_total(expenses: &[Expense], period: MonthPeriod) -> Money {
    category_totals(expenses, Some(period)).grand_total()
}

/// Sum of the matching expenses
pub fn total(expenses: &[Expense], period: Option<MonthPeriod>) -> Money {
    filter_by_period(expenses, period).map(|e| e.amount).sum()
}

/// Number of matching expenses
pub fn count(expenses: &[Expense], period: Option<MonthPeriod>) -> usize {
    filter_by_period(expenses, period).count()
}

/// Expenses dated exactly `date`, in storage order
pub fn expenses_on(expenses: &[Expense], date: NaiveDate) -> Vec<Expense> {
    expenses.iter().filter(|e| e.date == date).cloned().collect()
}

/// Expenses in the given month, in storage order
pub fn expenses_in(expenses: &[Expense], period: MonthPeriod) -> Vec<Expense> {
    filter_by_period(expenses, Some(period)).cloned().collect()
}

/// Expenses in one category, in storage order
pub fn expenses_by_category(expenses: &[Expense], category: ExpenseCategory) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| e.category == category)
        .cloned()
        .collect()
}

/// Category totals for the current month (local time)
pub fn current_month_totals(expenses: &[Expense]) -> CategoryTotals {
    category_totals(expenses, Some(MonthPeriod::current()))
}

/// Per-day totals for a month, ordered by date; days without expenses are omitted
pub fn daily_totals(expenses: &[Expense], period: MonthPeriod) -> Vec<DayTotal> {
    let mut days: Vec<DayTotal> = Vec::new();
    for expense in filter_by_period(expenses, Some(period)) {
        match days.iter_mut().find(|d| d.date == expense.date) {
            Some(day) => {
                day.total += expense.amount;
                day.count += 1;
            }
            None => days.push(DayTotal {
                date: expense.date,
                total: expense.amount,
                count: 1,
            }),
        }
    }
    days.sort_by_key(|d| d.date);
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;

    fn expense(id: &str, date: (i32, u32, u32), category: ExpenseCategory, cents: i64) -> Expense {
        Expense {
            id: ExpenseId::from(id),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            category,
            amount: Money::from_cents(cents),
            description: id.to_string(),
        }
    }

    fn basic() -> Vec<Expense> {
        vec![
            expense("a", (2024, 1, 3), ExpenseCategory::Food, 1000),
            expense("b", (2024, 1, 9), ExpenseCategory::Food, 500),
            expense("c", (2024, 1, 9), ExpenseCategory::Daily, 300),
        ]
    }

    fn period(year: i32, month0: u32) -> MonthPeriod {
        MonthPeriod::new(year, month0).unwrap()
    }

    #[test]
    fn test_category_totals_only_present_categories() {
        let totals = category_totals(&basic(), None);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get(ExpenseCategory::Food), Some(Money::from_cents(1500)));
        assert_eq!(totals.get(ExpenseCategory::Daily), Some(Money::from_cents(300)));
        assert_eq!(totals.get(ExpenseCategory::Recreation), None);
        assert_eq!(totals.get(ExpenseCategory::Transportation), None);
    }

    #[test]
    fn test_ranked() {
        let ranked = category_totals_ranked(&basic(), None);
        assert_eq!(
            ranked,
            vec![
                CategoryTotal {
                    category: ExpenseCategory::Food,
                    total: Money::from_cents(1500)
                },
                CategoryTotal {
                    category: ExpenseCategory::Daily,
                    total: Money::from_cents(300)
                },
            ]
        );
    }

    #[test]
    fn test_ranking_ties_keep_encounter_order() {
        let expenses = vec![
            expense("a", (2024, 1, 1), ExpenseCategory::Recreation, 700),
            expense("b", (2024, 1, 1), ExpenseCategory::Daily, 900),
            expense("c", (2024, 1, 2), ExpenseCategory::Food, 700),
            expense("d", (2024, 1, 2), ExpenseCategory::Transportation, 700),
        ];

        let order: Vec<_> = category_totals_ranked(&expenses, None)
            .iter()
            .map(|t| t.category)
            .collect();
        assert_eq!(
            order,
            vec![
                ExpenseCategory::Daily,
                ExpenseCategory::Recreation,
                ExpenseCategory::Food,
                ExpenseCategory::Transportation,
            ]
        );
    }

    #[test]
    fn test_top_category() {
        let top = top_category(&basic(), None).unwrap();
        assert_eq!(top.category, ExpenseCategory::Food);
        assert_eq!(top.total, Money::from_cents(1500));

        assert_eq!(top_category(&[], None), None);
    }

    #[test]
    fn test_category_percentage() {
        let expenses = basic();
        let pct = category_percentage(&expenses, ExpenseCategory::Food, None);
        assert!((pct - 83.333).abs() < 0.01);

        assert_eq!(
            category_percentage(&expenses, ExpenseCategory::Recreation, None),
            0.0
        );
        assert_eq!(category_percentage(&[], ExpenseCategory::Food, None), 0.0);
    }

    #[test]
    fn test_month_filter_is_zero_based() {
        let expenses = vec![
            expense("jan", (2024, 1, 31), ExpenseCategory::Food, 100),
            expense("feb", (2024, 2, 1), ExpenseCategory::Food, 200),
            expense("jan-prev", (2023, 1, 15), ExpenseCategory::Food, 400),
            expense("jan-2", (2024, 1, 1), ExpenseCategory::Daily, 800),
        ];

        let january = expenses_in(&expenses, period(2024, 0));
        let ids: Vec<_> = january.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["jan", "jan-2"]);

        assert_eq!(monthly_total(&expenses, period(2024, 0)), Money::from_cents(900));
        assert_eq!(monthly_total(&expenses, period(2024, 1)), Money::from_cents(200));
        assert_eq!(monthly_total(&expenses, period(2024, 2)), Money::zero());
    }

    #[test]
    fn test_filtered_totals() {
        let expenses = vec![
            expense("a", (2024, 1, 5), ExpenseCategory::Food, 100),
            expense("b", (2024, 2, 5), ExpenseCategory::Recreation, 900),
        ];

        let jan = category_totals(&expenses, Some(period(2024, 0)));
        assert_eq!(jan.len(), 1);
        assert_eq!(jan.grand_total(), Money::from_cents(100));

        assert_eq!(
            category_total(&expenses, ExpenseCategory::Recreation, Some(period(2024, 0))),
            Money::zero()
        );
        assert_eq!(
            category_total(&expenses, ExpenseCategory::Recreation, None),
            Money::from_cents(900)
        );
        assert_eq!(count(&expenses, Some(period(2024, 1))), 1);
        assert_eq!(total(&expenses, None), Money::from_cents(1000));
    }

    #[test]
    fn test_expenses_on() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        let found = expenses_on(&basic(), day);
        let ids: Vec<_> = found.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);

        let other_year = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
        assert!(expenses_on(&basic(), other_year).is_empty());
    }

    #[test]
    fn test_expenses_by_category() {
        let food = expenses_by_category(&basic(), ExpenseCategory::Food);
        assert_eq!(food.len(), 2);
        assert!(expenses_by_category(&basic(), ExpenseCategory::Recreation).is_empty());
    }

    #[test]
    fn test_daily_totals() {
        let days = daily_totals(&basic(), period(2024, 0));
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(days[1].total, Money::from_cents(800));
        assert_eq!(days[1].count, 2);

        assert!(daily_totals(&basic(), period(2024, 5)).is_empty());
    }

    #[test]
    fn test_current_month_totals_uses_today() {
        let today = chrono::Local::now().date_naive();
        let expenses = vec![Expense::new(
            today,
            ExpenseCategory::Daily,
            Money::from_cents(100),
            "now",
        )];
        assert_eq!(
            current_month_totals(&expenses).get(ExpenseCategory::Daily),
            Some(Money::from_cents(100))
        );
    }
}
