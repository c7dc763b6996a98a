//! Expense store
//!
//! Owns the canonical in-memory expense list. Every mutator applies its
//! change in memory and then rewrites the storage slot before returning.
//! A failed write is logged and remembered (see [`ExpenseStore::is_dirty`])
//! but never surfaced as an error: the in-memory list stays authoritative
//! for the rest of the session.

use std::collections::HashSet;

use tracing::{debug, error, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::settings::DEFAULT_STORAGE_KEY;
use crate::models::{Expense, ExpenseId, ExpenseUpdate, Money};
use crate::storage::{ExpenseRepository, MemorySlotStore, SlotStore};

/// The single owner of the expense list
pub struct ExpenseStore {
    repository: ExpenseRepository,
    slot: String,
    expenses: Vec<Expense>,
    audit: Option<AuditLogger>,
    version: u64,
    dirty: bool,
}

impl ExpenseStore {
    /// Open the store, loading whatever the slot currently holds
    pub fn open(slots: Box<dyn SlotStore>, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let repository = ExpenseRepository::new(slots);
        let expenses = repository.load(&slot);

        Self {
            repository,
            slot,
            expenses,
            audit: None,
            version: 0,
            dirty: false,
        }
    }

    /// A store backed by a fresh in-memory slot
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemorySlotStore::new()), DEFAULT_STORAGE_KEY)
    }

    /// Record every mutation in the given audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Name of the slot this store persists to
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Read-only view of the current list, in storage order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Owned copy of the current list
    pub fn snapshot(&self) -> Vec<Expense> {
        self.expenses.clone()
    }

    /// Counter bumped by every mutator call
    ///
    /// Callers caching derived aggregates can key them by this value.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// True when the last write to the slot failed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Append an expense. The caller has already validated it and minted its id.
    pub fn add(&mut self, expense: Expense) {
        let entry = AuditEntry::create(&expense);
        debug!(id = %expense.id, "adding expense");
        self.expenses.push(expense);
        self.commit(vec![entry]);
    }

    /// Look up an expense by id
    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    /// Merge `update` into the matching expense
    ///
    /// Returns the updated expense, or `None` when no expense has this id
    /// (in which case nothing changes).
    pub fn update(&mut self, id: &ExpenseId, update: &ExpenseUpdate) -> Option<Expense> {
        let mut audit = Vec::new();
        let updated = self.expenses.iter_mut().find(|e| &e.id == id).map(|expense| {
            let before = expense.clone();
            expense.apply(update);
            audit.push(AuditEntry::update(&before, expense));
            expense.clone()
        });

        if updated.is_none() {
            debug!(%id, "update ignored, no such expense");
        }
        self.commit(audit);
        updated
    }

    /// Remove the matching expense, returning it if it existed
    pub fn delete(&mut self, id: &ExpenseId) -> Option<Expense> {
        let removed = self
            .expenses
            .iter()
            .position(|e| &e.id == id)
            .map(|index| self.expenses.remove(index));

        let audit = removed.iter().map(AuditEntry::delete).collect();
        self.commit(audit);
        removed
    }

    /// Remove every expense whose id is in `ids`; unknown ids are ignored
    ///
    /// Returns the number of expenses removed.
    pub fn delete_many(&mut self, ids: &[ExpenseId]) -> usize {
        let targets: HashSet<&ExpenseId> = ids.iter().collect();
        let (removed, kept): (Vec<Expense>, Vec<Expense>) = std::mem::take(&mut self.expenses)
            .into_iter()
            .partition(|e| targets.contains(&e.id));
        self.expenses = kept;

        let audit = removed.iter().map(AuditEntry::delete).collect();
        self.commit(audit);
        removed.len()
    }

    /// Remove every expense, returning how many there were
    pub fn clear(&mut self) -> usize {
        let removed = std::mem::take(&mut self.expenses);
        let audit = removed.iter().map(AuditEntry::delete).collect();
        self.commit(audit);
        removed.len()
    }

    /// Number of stored expenses
    pub fn count(&self) -> usize {
        self.expenses.len()
    }

    /// Sum of all amounts
    pub fn total(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Bump the version, write the slot once, then append audit entries
    fn commit(&mut self, audit: Vec<AuditEntry>) {
        self.version += 1;

        match self.repository.save(&self.slot, &self.expenses) {
            Ok(()) => self.dirty = false,
            Err(e) => {
                error!(slot = %self.slot, error = %e, "failed to persist expenses, keeping in-memory state");
                self.dirty = true;
            }
        }

        if let Some(logger) = &self.audit {
            let audit: Vec<AuditEntry> = audit
                .into_iter()
                .map(|entry| entry.in_slot(self.slot.as_str()))
                .collect();
            if let Err(e) = logger.log_batch(&audit) {
                warn!(error = %e, "failed to write audit log");
            }
        }
    }
}
