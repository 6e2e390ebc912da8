//! In-memory record store. Backs the unit tests so model behavior can be
//! verified without touching the filesystem, and doubles as the reference
//! implementation of the [`RecordStore`] contract.

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::Result;

use super::RecordStore;

/// A `HashMap`-backed store. Everything runs on the UI thread, so interior
/// mutability via `RefCell` is all the synchronization needed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held. Used by tests asserting that
    /// mutations persist (or deliberately do not).
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
