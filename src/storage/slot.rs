//! Durable key-value slots
//!
//! A slot is a single named location holding one serialized blob. The
//! expense list lives in exactly one slot. [`FileSlotStore`] keeps each slot
//! in its own JSON file; [`MemorySlotStore`] keeps them in process and is
//! what tests and embedders use.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{ExpenseError, ExpenseResult};

use super::file_io::{read_text, write_text_atomic};

/// A durable key-value store addressed by slot name
pub trait SlotStore {
    /// Read the raw contents of a slot, `None` if it was never written
    fn read_slot(&self, slot: &str) -> ExpenseResult<Option<String>>;

    /// Replace the contents of a slot in one step
    fn write_slot(&self, slot: &str, contents: &str) -> ExpenseResult<()>;
}

/// Slots stored as `<data_dir>/<slot>.json`
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    data_dir: PathBuf,
}

impl FileSlotStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Path of the file backing a slot
    pub fn slot_path(&self, slot: &str) -> ExpenseResult<PathBuf> {
        validate_slot_name(slot)?;
        Ok(self.data_dir.join(format!("{}.json", slot)))
    }
}

impl SlotStore for FileSlotStore {
    fn read_slot(&self, slot: &str) -> ExpenseResult<Option<String>> {
        read_text(self.slot_path(slot)?)
    }

    fn write_slot(&self, slot: &str, contents: &str) -> ExpenseResult<()> {
        write_text_atomic(self.slot_path(slot)?, contents)
    }
}

/// In-process slots. Clones share the same underlying map.
///
/// Writes can be made to fail with [`MemorySlotStore::set_fail_writes`] to
/// simulate an exhausted storage quota.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: Arc<RwLock<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `write_slot` calls so far, failed ones included
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Put raw contents into a slot, bypassing the failure switch and counter
    pub fn seed(&self, slot: &str, contents: &str) -> ExpenseResult<()> {
        let mut slots = self.slots.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        slots.insert(slot.to_string(), contents.to_string());
        Ok(())
    }
}

impl SlotStore for MemorySlotStore {
    fn read_slot(&self, slot: &str) -> ExpenseResult<Option<String>> {
        let slots = self.slots.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(slots.get(slot).cloned())
    }

    fn write_slot(&self, slot: &str, contents: &str) -> ExpenseResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ExpenseError::Storage(format!(
                "Storage quota exceeded writing slot '{}'",
                slot
            )));
        }
        self.seed(slot, contents)
    }
}

/// Slot names become file names, so keep them to a safe alphabet
fn validate_slot_name(slot: &str) -> ExpenseResult<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        && !slot.starts_with('.');

    if valid {
        Ok(())
    } else {
        Err(ExpenseError::Config(format!("Invalid slot name: '{}'", slot)))
    }
}
