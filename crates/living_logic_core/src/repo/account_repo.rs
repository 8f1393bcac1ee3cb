//! Account registry contract and slot-backed implementation.
//!
//! # Responsibility
//! - Own the ordered collection of `RegisteredAccount` in one named slot.
//! - Answer membership and credential queries against that collection.
//!
//! # Invariants
//! - Email uniqueness is case-insensitive.
//! - `list` never fails: absent, corrupt or unreadable slots read as empty.
//! - `register` persists the full updated collection, or reports the fault.
//! - Passwords and hashes never appear in log output.

use crate::clock::Clock;
use crate::credential::{hash_password, verify_password, CredentialError};
use crate::model::account::{mask_email, NewAccount, RegisteredAccount};
use crate::storage::{SlotStore, StorageError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure writing the account slot.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    Serialize(serde_json::Error),
    Credential(CredentialError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize accounts: {err}"),
            Self::Credential(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Credential(err) => Some(err),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<CredentialError> for RepoError {
    fn from(value: CredentialError) -> Self {
        Self::Credential(value)
    }
}

/// Result of a registration attempt that reached storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    /// An account with the same case-folded email exists; nothing was written.
    DuplicateEmail,
}

/// Account registry operations.
pub trait AccountRepository {
    /// All accounts in insertion order.
    fn list(&self) -> Vec<RegisteredAccount>;
    fn register(&self, account: &NewAccount) -> RepoResult<RegisterOutcome>;
    fn validate_credentials(&self, email: &str, password: &str) -> bool;
    fn is_email_registered(&self, email: &str) -> bool;
    /// Removes the whole slot.
    fn clear_all(&self) -> RepoResult<()>;
}

/// Registry persisted as one JSON array under a named slot.
pub struct SlotAccountRepository<S: SlotStore, C: Clock> {
    store: S,
    clock: C,
    slot: String,
}

impl<S: SlotStore, C: Clock> SlotAccountRepository<S, C> {
    pub fn new(store: S, clock: C, slot: impl Into<String>) -> Self {
        Self {
            store,
            clock,
            slot: slot.into(),
        }
    }

    /// Name of the slot this registry owns.
    pub fn slot(&self) -> &str {
        &self.slot
    }
}

impl<S: SlotStore, C: Clock> AccountRepository for SlotAccountRepository<S, C> {
    fn list(&self) -> Vec<RegisteredAccount> {
        let raw = match self.store.get(&self.slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(
                    "event=accounts_read module=repo status=error slot={} error={}",
                    self.slot, err
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<RegisteredAccount>>(&raw) {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!(
                    "event=accounts_read module=repo status=error slot={} error_code=corrupt_slot error={}",
                    self.slot, err
                );
                Vec::new()
            }
        }
    }

    fn register(&self, account: &NewAccount) -> RepoResult<RegisterOutcome> {
        let mut accounts = self.list();
        if accounts
            .iter()
            .any(|existing| existing.matches_email(&account.email))
        {
            info!(
                "event=account_register module=repo status=rejected reason=duplicate_email email={}",
                mask_email(&account.email)
            );
            return Ok(RegisterOutcome::DuplicateEmail);
        }

        accounts.push(RegisteredAccount {
            email: account.email.clone(),
            password: hash_password(&account.password)?,
            name: account.name.clone(),
            registered_at: self.clock.now(),
        });

        let encoded = serde_json::to_string(&accounts)?;
        if let Err(err) = self.store.set(&self.slot, &encoded) {
            warn!(
                "event=account_register module=repo status=error slot={} error={}",
                self.slot, err
            );
            return Err(err.into());
        }

        info!(
            "event=account_register module=repo status=ok email={} total={}",
            mask_email(&account.email),
            accounts.len()
        );
        Ok(RegisterOutcome::Registered)
    }

    fn validate_credentials(&self, email: &str, password: &str) -> bool {
        self.list().iter().any(|account| {
            account.matches_email(email) && verify_password(password, &account.password)
        })
    }

    fn is_email_registered(&self, email: &str) -> bool {
        self.list()
            .iter()
            .any(|account| account.matches_email(email))
    }

    fn clear_all(&self) -> RepoResult<()> {
        self.store.remove(&self.slot)?;
        info!(
            "event=accounts_clear module=repo status=ok slot={}",
            self.slot
        );
        Ok(())
    }
}
