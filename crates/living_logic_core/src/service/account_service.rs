//! Account use-case service.
//!
//! # Responsibility
//! - Expose the registry as the boolean contract page controllers consume.
//! - Classify login attempts for the login page.
//!
//! # Invariants
//! - `register` returns `true` only when the account was durably written.
//! - Storage faults are logged here and reported as `false`.

use crate::model::account::{mask_email, NewAccount, RegisteredAccount};
use crate::repo::account_repo::{AccountRepository, RegisterOutcome};
use log::error;

/// How a login attempt relates to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    /// Email registered and password matches.
    Verified,
    /// Email registered but password does not match.
    WrongPassword,
    NotRegistered,
}

/// Use-case wrapper over an account repository.
pub struct AccountService<R: AccountRepository> {
    repo: R,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// All accounts in registration order.
    pub fn list(&self) -> Vec<RegisteredAccount> {
        self.repo.list()
    }

    /// Registers a new account.
    ///
    /// Returns `false` for a duplicate email and for any write fault; use
    /// `register_outcome` when the caller must tell them apart.
    pub fn register(&self, account: &NewAccount) -> bool {
        matches!(
            self.register_outcome(account),
            Some(RegisterOutcome::Registered)
        )
    }

    /// Registers a new account; `None` means the write failed.
    pub fn register_outcome(&self, account: &NewAccount) -> Option<RegisterOutcome> {
        match self.repo.register(account) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                error!(
                    "event=account_register module=service status=error email={} error={}",
                    mask_email(&account.email),
                    err
                );
                None
            }
        }
    }

    pub fn validate_credentials(&self, email: &str, password: &str) -> bool {
        self.repo.validate_credentials(email, password)
    }

    pub fn is_email_registered(&self, email: &str) -> bool {
        self.repo.is_email_registered(email)
    }

    pub fn login_status(&self, email: &str, password: &str) -> LoginStatus {
        if self.repo.validate_credentials(email, password) {
            LoginStatus::Verified
        } else if self.repo.is_email_registered(email) {
            LoginStatus::WrongPassword
        } else {
            LoginStatus::NotRegistered
        }
    }

    /// Wipes every account. Returns `false` when the slot could not be removed.
    pub fn clear_all(&self) -> bool {
        match self.repo.clear_all() {
            Ok(()) => true,
            Err(err) => {
                error!("event=accounts_clear module=service status=error error={err}");
                false
            }
        }
    }
}
