//! Key-value slot backends.
//!
//! # Responsibility
//! - Define the storage seam the account registry reads and writes through.
//! - Offer an in-process backend for tests and a SQLite backend for durable use.
//!
//! # Invariants
//! - A slot holds one opaque string value; `set` replaces it whole.
//! - Backends report faults as `StorageError` and never panic.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub type StorageResult<T> = Result<T, StorageError>;

/// Fault raised by a slot backend.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Backend refused the operation (quota, disabled storage, injected fault).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "slot storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named-slot key-value store, the equivalent of browser local storage.
pub trait SlotStore {
    /// Returns the slot value, or `None` when the slot is absent.
    fn get(&self, slot: &str) -> StorageResult<Option<String>>;
    /// Replaces the full slot value.
    fn set(&self, slot: &str, value: &str) -> StorageResult<()>;
    /// Removes the slot. Removing an absent slot is not an error.
    fn remove(&self, slot: &str) -> StorageResult<()>;
}

impl<S: SlotStore + ?Sized> SlotStore for &S {
    fn get(&self, slot: &str) -> StorageResult<Option<String>> {
        (**self).get(slot)
    }

    fn set(&self, slot: &str, value: &str) -> StorageResult<()> {
        (**self).set(slot, value)
    }

    fn remove(&self, slot: &str) -> StorageResult<()> {
        (**self).remove(slot)
    }
}
