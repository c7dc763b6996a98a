//! Storage layer for the expense tracker
//!
//! Provides durable key-value slots (JSON files with atomic writes, or an
//! in-memory map) and the repository that serializes the expense list into
//! one of them.

pub mod expenses;
pub mod file_io;
pub mod slot;

pub use expenses::ExpenseRepository;
pub use file_io::{read_text, write_text_atomic};
pub use slot::{FileSlotStore, MemorySlotStore, SlotStore};
