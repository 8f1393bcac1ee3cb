//! Core domain logic for the Living with Logic site.
//! This crate owns the account registry, field validation and toast presets
//! that every page controller calls into.

pub mod clock;
pub mod config;
pub mod credential;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;
pub mod storage;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, SiteConfig, DEFAULT_STORAGE_SLOT};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::account::{NewAccount, RegisteredAccount};
pub use notify::preset::ToastPreset;
pub use notify::toast::{Toast, ToastId, ToastKind, ToastStyle};
pub use notify::{LogToastSink, MemoryToastSink, Notifier, ToastSink};
pub use repo::account_repo::{
    AccountRepository, RegisterOutcome, RepoError, RepoResult, SlotAccountRepository,
};
pub use service::account_service::{AccountService, LoginStatus};
pub use service::form_service::{FormService, Gate, SubmitOutcome};
pub use service::submit_guard::{SubmitGuard, SubmitTicket};
pub use storage::memory::MemorySlotStore;
pub use storage::sqlite::SqliteSlotStore;
pub use storage::{SlotStore, StorageError, StorageResult};
pub use validation::form::{FieldError, FieldState, FormErrors, FormInput, FormSchema};
pub use validation::rules::FieldRule;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
