//! Form submit flows for the site's pages.
//!
//! # Responsibility
//! - Validate a submission against its form schema.
//! - Admit one submission at a time and pace it with the configured delay.
//! - Perform the page action and announce the outcome through a toast.
//!
//! # Invariants
//! - Invalid input never reaches the registry and dispatches no toast,
//!   except the newsletter form which also announces the bad email.
//! - A submit arriving while another is in flight returns `Busy` untouched.
//! - Passwords never appear in log events.

use super::account_service::{AccountService, LoginStatus};
use super::submit_guard::SubmitGuard;
use crate::config::SiteConfig;
use crate::model::account::NewAccount;
use crate::notify::preset::ToastPreset;
use crate::notify::toast::ToastId;
use crate::notify::{Notifier, ToastSink};
use crate::repo::account_repo::{AccountRepository, RegisterOutcome};
use crate::validation::form::{FormErrors, FormInput, FormSchema};
use log::info;
use std::sync::Arc;
use std::time::Duration;

const INVALID_CREDENTIALS: &str = "Invalid credentials. Please check your password.";
const DUPLICATE_EMAIL: &str =
    "This email is already registered. Please use a different email or login.";
const SIGNUP_FAILED: &str = "There was an error creating your account. Please try again.";
const NEWSLETTER_INVALID_EMAIL: &str = "Please enter a valid email address.";

/// Result of one form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The action ran and this preset was announced.
    Completed(ToastPreset),
    /// Validation failed; errors belong next to their fields.
    Invalid(FormErrors),
    /// Another submission is still in flight.
    Busy,
}

impl SubmitOutcome {
    pub fn preset(&self) -> Option<&ToastPreset> {
        match self {
            Self::Completed(preset) => Some(preset),
            Self::Invalid(_) | Self::Busy => None,
        }
    }
}

/// Content that requires a signed-in visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Article,
    Plan,
    Slot,
}

impl Gate {
    /// Parses `article`, `plan` or `slot`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "article" => Some(Self::Article),
            "plan" => Some(Self::Plan),
            "slot" => Some(Self::Slot),
            _ => None,
        }
    }

    /// Lock preset announced when a visitor hits this gate.
    pub fn preset(self) -> ToastPreset {
        match self {
            Self::Article => ToastPreset::ContentRequiresLogin,
            Self::Plan => ToastPreset::PlanRequiresLogin,
            Self::Slot => ToastPreset::SlotRequiresLogin,
        }
    }
}

/// Page-level submit flows over the registry and toast surface.
pub struct FormService<R: AccountRepository, K: ToastSink> {
    accounts: AccountService<R>,
    notifier: Notifier<K>,
    guard: Arc<SubmitGuard>,
    submit_delay: Duration,
    slow_submit_delay: Duration,
}

impl<R: AccountRepository, K: ToastSink> FormService<R, K> {
    pub fn new(repo: R, sink: K, config: &SiteConfig) -> Self {
        Self {
            accounts: AccountService::new(repo),
            notifier: Notifier::new(sink),
            guard: Arc::new(SubmitGuard::new()),
            submit_delay: config.submit_delay,
            slow_submit_delay: config.slow_submit_delay,
        }
    }

    /// Shares `guard` with other services, so that one in-flight submit
    /// blocks every form using the same guard.
    pub fn with_guard(mut self, guard: Arc<SubmitGuard>) -> Self {
        self.guard = guard;
        self
    }

    pub fn accounts(&self) -> &AccountService<R> {
        &self.accounts
    }

    pub fn notifier(&self) -> &Notifier<K> {
        &self.notifier
    }

    pub fn guard(&self) -> &SubmitGuard {
        &self.guard
    }

    /// Login page: registered + matching password is held for review.
    pub fn login(&self, input: &FormInput) -> SubmitOutcome {
        self.submit(&FormSchema::login(), input, self.submit_delay, || {
            match self
                .accounts
                .login_status(input.get("email"), input.get("password"))
            {
                LoginStatus::Verified => ToastPreset::AccountUnderReview,
                LoginStatus::WrongPassword => ToastPreset::Error(INVALID_CREDENTIALS.to_string()),
                LoginStatus::NotRegistered => ToastPreset::LoginRequiresSignup,
            }
        })
    }

    pub fn signup(&self, input: &FormInput) -> SubmitOutcome {
        self.submit(&FormSchema::signup(), input, self.submit_delay, || {
            let account = NewAccount::new(
                input.get("email").trim(),
                input.get("password"),
                input.get("name").trim(),
            );
            match self.accounts.register_outcome(&account) {
                Some(RegisterOutcome::Registered) => ToastPreset::SignupComplete,
                Some(RegisterOutcome::DuplicateEmail) => {
                    ToastPreset::Error(DUPLICATE_EMAIL.to_string())
                }
                None => ToastPreset::Error(SIGNUP_FAILED.to_string()),
            }
        })
    }

    pub fn contact(&self, input: &FormInput) -> SubmitOutcome {
        self.submit(&FormSchema::contact(), input, self.submit_delay, || {
            ToastPreset::ContactSent
        })
    }

    pub fn booking(&self, input: &FormInput) -> SubmitOutcome {
        self.submit(&FormSchema::booking(), input, self.submit_delay, || {
            ToastPreset::BookingConfirmed
        })
    }

    pub fn newsletter(&self, input: &FormInput) -> SubmitOutcome {
        let outcome = self.submit(
            &FormSchema::newsletter(),
            input,
            self.slow_submit_delay,
            || ToastPreset::NewsletterSubscribed,
        );
        if matches!(outcome, SubmitOutcome::Invalid(_)) {
            self.notifier
                .dispatch(&ToastPreset::Error(NEWSLETTER_INVALID_EMAIL.to_string()));
        }
        outcome
    }

    pub fn forgot_password(&self, input: &FormInput) -> SubmitOutcome {
        self.submit(
            &FormSchema::forgot_password(),
            input,
            self.slow_submit_delay,
            || ToastPreset::PasswordResetRequested,
        )
    }

    /// Announces that `gate` needs a signed-in visitor.
    pub fn require_login(&self, gate: Gate) -> ToastId {
        self.notifier.dispatch(&gate.preset())
    }

    fn submit(
        &self,
        schema: &FormSchema,
        input: &FormInput,
        delay: Duration,
        action: impl FnOnce() -> ToastPreset,
    ) -> SubmitOutcome {
        if let Err(errors) = schema.validate(input) {
            info!(
                "event=form_submit module=service form={} status=invalid fields={}",
                schema.name(),
                errors.len()
            );
            return SubmitOutcome::Invalid(errors);
        }

        let Some(_ticket) = self.guard.try_begin() else {
            info!(
                "event=form_submit module=service form={} status=rejected reason=in_flight",
                schema.name()
            );
            return SubmitOutcome::Busy;
        };

        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let preset = action();
        self.notifier.dispatch(&preset);
        info!(
            "event=form_submit module=service form={} status={}",
            schema.name(),
            if preset.is_error() { "error" } else { "ok" }
        );
        SubmitOutcome::Completed(preset)
    }
}

#[cfg(test)]
mod tests {
    use super::{FormService, Gate, SubmitOutcome};
    use crate::clock::SystemClock;
    use crate::config::SiteConfig;
    use crate::notify::preset::ToastPreset;
    use crate::notify::MemoryToastSink;
    use crate::repo::account_repo::SlotAccountRepository;
    use crate::storage::memory::MemorySlotStore;
    use crate::validation::form::FormInput;

    type TestService<'a> =
        FormService<SlotAccountRepository<&'a MemorySlotStore, SystemClock>, &'a MemoryToastSink>;

    fn service<'a>(store: &'a MemorySlotStore, sink: &'a MemoryToastSink) -> TestService<'a> {
        let config = SiteConfig::default().without_delays();
        let repo = SlotAccountRepository::new(store, SystemClock, config.storage_slot.clone());
        FormService::new(repo, sink, &config)
    }

    #[test]
    fn busy_submit_is_rejected_without_toast() {
        let store = MemorySlotStore::new();
        let sink = MemoryToastSink::new();
        let forms = service(&store, &sink);
        let input = FormInput::new()
            .with("name", "Jane")
            .with("email", "jane@example.com")
            .with("message", "I need help with strategy.");

        let held = forms.guard().try_begin().expect("claim guard");
        assert_eq!(forms.contact(&input), SubmitOutcome::Busy);
        assert!(sink.shown().is_empty());

        drop(held);
        assert_eq!(
            forms.contact(&input),
            SubmitOutcome::Completed(ToastPreset::ContactSent)
        );
        assert_eq!(sink.shown().len(), 1);
    }

    #[test]
    fn gates_dispatch_lock_presets() {
        let store = MemorySlotStore::new();
        let sink = MemoryToastSink::new();
        let forms = service(&store, &sink);

        forms.require_login(Gate::Article);
        forms.require_login(Gate::Plan);
        forms.require_login(Gate::Slot);

        let messages = sink
            .shown()
            .into_iter()
            .map(|toast| toast.message)
            .collect::<Vec<_>>();
        assert_eq!(
            messages,
            vec![
                "Login first for reading article",
                "Login first to go with the plan",
                "Login first to grab your preferred slot",
            ]
        );
    }

    #[test]
    fn newsletter_with_bad_email_announces_error() {
        let store = MemorySlotStore::new();
        let sink = MemoryToastSink::new();
        let forms = service(&store, &sink);

        let outcome = forms.newsletter(&FormInput::new().with("email", "not-an-email"));
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert_eq!(
            sink.last().map(|toast| toast.message).as_deref(),
            Some("Please enter a valid email address.")
        );
    }
}
