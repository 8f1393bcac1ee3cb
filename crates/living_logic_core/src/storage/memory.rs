//! In-process slot store.

use super::{SlotStore, StorageError, StorageResult};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Slot store backed by a `HashMap`, scoped to one execution context.
///
/// Read and write faults can be switched on to exercise the registry's
/// storage error policy.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `get` fail until switched off.
    pub fn fail_reads(&self, enabled: bool) {
        self.fail_reads.set(enabled);
    }

    /// Makes every subsequent `set`/`remove` fail until switched off.
    pub fn fail_writes(&self, enabled: bool) {
        self.fail_writes.set(enabled);
    }

    /// Returns the raw slot value without fault injection.
    pub fn raw(&self, slot: &str) -> Option<String> {
        self.slots.borrow().get(slot).cloned()
    }

    fn check_write(&self) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable("write rejected".to_string()));
        }
        Ok(())
    }
}

impl SlotStore for MemorySlotStore {
    fn get(&self, slot: &str) -> StorageResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(StorageError::Unavailable("read rejected".to_string()));
        }
        Ok(self.slots.borrow().get(slot).cloned())
    }

    fn set(&self, slot: &str, value: &str) -> StorageResult<()> {
        self.check_write()?;
        self.slots
            .borrow_mut()
            .insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> StorageResult<()> {
        self.check_write()?;
        self.slots.borrow_mut().remove(slot);
        Ok(())
    }
}
