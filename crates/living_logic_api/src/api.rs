//! Use-case API for the site's page controllers.
//!
//! # Responsibility
//! - Expose one call per page action (login, signup, contact, ...).
//! - Open the durable slot store and wire the core services per call.
//! - Translate outcomes into a flat response the rendering layer displays.
//!
//! # Invariants
//! - Exported functions never panic; faults become `ok = false` responses.
//! - Responses never carry passwords or password hashes.
//! - All forms share one in-flight guard per `SiteApi`.

use living_logic_core::db::open_db;
use living_logic_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AccountService, FormInput, FormService, Gate, MemoryToastSink, Notifier, SiteConfig,
    SlotAccountRepository, SqliteSlotStore, SubmitGuard, SubmitOutcome, SystemClock, Toast,
};
use log::warn;
use std::sync::{Arc, OnceLock};

static DEFAULT_API: OnceLock<Result<SiteApi, String>> = OnceLock::new();

/// Minimal health check for controller wiring.
pub fn ping() -> String {
    ping_inner().to_owned()
}

pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Flat response envelope for one page action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormActionResponse {
    /// Whether the action succeeded from the visitor's point of view.
    pub ok: bool,
    /// Human-readable summary for diagnostics/UI.
    pub message: String,
    /// Toast the page should display, if any.
    pub toast: Option<Toast>,
    /// `(field, message)` pairs for inline errors.
    pub field_errors: Vec<(String, String)>,
}

impl FormActionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            toast: None,
            field_errors: Vec::new(),
        }
    }

    fn from_outcome(outcome: SubmitOutcome, toast: Option<Toast>) -> Self {
        match outcome {
            SubmitOutcome::Completed(preset) => Self {
                ok: !preset.is_error(),
                message: toast
                    .as_ref()
                    .map(|toast| toast.message.clone())
                    .unwrap_or_default(),
                toast,
                field_errors: Vec::new(),
            },
            SubmitOutcome::Invalid(errors) => Self {
                ok: false,
                message: format!("{} field(s) need attention.", errors.len()),
                toast,
                field_errors: errors
                    .iter()
                    .map(|(field, message)| (field.to_string(), message.to_string()))
                    .collect(),
            },
            SubmitOutcome::Busy => Self::failure("A submission is already in progress."),
        }
    }
}

/// Account row safe to show to operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub email: String,
    pub name: String,
    /// RFC 3339 registration time.
    pub registered_at: String,
}

/// Site entry points bound to one configuration and one submit guard.
pub struct SiteApi {
    config: SiteConfig,
    guard: Arc<SubmitGuard>,
}

impl SiteApi {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            guard: Arc::new(SubmitGuard::new()),
        }
    }

    /// Builds an API from `LIVING_LOGIC_*` environment variables.
    pub fn from_env() -> Result<Self, String> {
        SiteConfig::from_env()
            .map(Self::new)
            .map_err(|err| format!("invalid site configuration: {err}"))
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn login(&self, email: &str, password: &str) -> FormActionResponse {
        let input = FormInput::new()
            .with("email", email)
            .with("password", password);
        self.submit("login", |forms| forms.login(&input))
    }

    pub fn signup(&self, name: &str, email: &str, password: &str) -> FormActionResponse {
        let input = FormInput::new()
            .with("name", name)
            .with("email", email)
            .with("password", password);
        self.submit("signup", |forms| forms.signup(&input))
    }

    pub fn contact(&self, name: &str, email: &str, message: &str) -> FormActionResponse {
        let input = FormInput::new()
            .with("name", name)
            .with("email", email)
            .with("message", message);
        self.submit("contact", |forms| forms.contact(&input))
    }

    pub fn booking(
        &self,
        full_name: &str,
        email: &str,
        phone: &str,
        date: &str,
    ) -> FormActionResponse {
        let input = FormInput::new()
            .with("fullName", full_name)
            .with("email", email)
            .with("phone", phone)
            .with("date", date);
        self.submit("booking", |forms| forms.booking(&input))
    }

    pub fn newsletter(&self, email: &str) -> FormActionResponse {
        let input = FormInput::new().with("email", email);
        self.submit("newsletter", |forms| forms.newsletter(&input))
    }

    pub fn forgot_password(&self, email: &str) -> FormActionResponse {
        let input = FormInput::new().with("email", email);
        self.submit("forgot_password", |forms| forms.forgot_password(&input))
    }

    /// Announces that gated content needs a signed-in visitor.
    pub fn require_login(&self, gate: Gate) -> FormActionResponse {
        let sink = MemoryToastSink::new();
        Notifier::new(&sink).dispatch(&gate.preset());
        let toast = sink.last();
        FormActionResponse {
            ok: false,
            message: toast
                .as_ref()
                .map(|toast| toast.message.clone())
                .unwrap_or_default(),
            toast,
            field_errors: Vec::new(),
        }
    }

    /// Lists registered accounts without credentials.
    pub fn accounts(&self) -> Result<Vec<AccountSummary>, String> {
        self.with_accounts(|accounts| {
            accounts
                .list()
                .into_iter()
                .map(|account| AccountSummary {
                    email: account.email,
                    name: account.name,
                    registered_at: account.registered_at.to_rfc3339(),
                })
                .collect()
        })
    }

    pub fn is_email_registered(&self, email: &str) -> Result<bool, String> {
        self.with_accounts(|accounts| accounts.is_email_registered(email))
    }

    /// Maintenance: removes every account.
    pub fn clear_accounts(&self) -> FormActionResponse {
        match self.with_accounts(|accounts| accounts.clear_all()) {
            Ok(true) => FormActionResponse {
                ok: true,
                message: "All accounts cleared.".to_string(),
                toast: None,
                field_errors: Vec::new(),
            },
            Ok(false) => FormActionResponse::failure("clear_accounts failed: slot not removed"),
            Err(err) => FormActionResponse::failure(format!("clear_accounts failed: {err}")),
        }
    }

    fn submit(
        &self,
        action: &'static str,
        run: impl FnOnce(&SiteForms<'_, '_>) -> SubmitOutcome,
    ) -> FormActionResponse {
        let conn = match open_db(&self.config.db_path) {
            Ok(conn) => conn,
            Err(err) => {
                warn!("event=api_call module=api action={action} status=error error={err}");
                return FormActionResponse::failure(format!("{action} failed: {err}"));
            }
        };
        let store = match SqliteSlotStore::try_new(&conn) {
            Ok(store) => store,
            Err(err) => return FormActionResponse::failure(format!("{action} failed: {err}")),
        };

        let sink = MemoryToastSink::new();
        let repo = SlotAccountRepository::new(store, SystemClock, self.config.storage_slot.clone());
        let forms = FormService::new(repo, &sink, &self.config).with_guard(Arc::clone(&self.guard));
        let outcome = run(&forms);
        FormActionResponse::from_outcome(outcome, sink.last())
    }

    fn with_accounts<T>(
        &self,
        f: impl FnOnce(&AccountService<SiteRepo<'_>>) -> T,
    ) -> Result<T, String> {
        let conn = open_db(&self.config.db_path)
            .map_err(|err| format!("slot DB open failed: {err}"))?;
        let store = SqliteSlotStore::try_new(&conn).map_err(|err| err.to_string())?;
        let repo = SlotAccountRepository::new(store, SystemClock, self.config.storage_slot.clone());
        Ok(f(&AccountService::new(repo)))
    }
}

type SiteRepo<'conn> = SlotAccountRepository<SqliteSlotStore<'conn>, SystemClock>;
type SiteForms<'conn, 'sink> = FormService<SiteRepo<'conn>, &'sink MemoryToastSink>;

/// Process-wide API configured from the environment.
pub fn default_api() -> Result<&'static SiteApi, String> {
    DEFAULT_API
        .get_or_init(SiteApi::from_env)
        .as_ref()
        .map_err(Clone::clone)
}

pub fn login(email: String, password: String) -> FormActionResponse {
    with_default(|api| api.login(&email, &password))
}

pub fn signup(name: String, email: String, password: String) -> FormActionResponse {
    with_default(|api| api.signup(&name, &email, &password))
}

pub fn contact(name: String, email: String, message: String) -> FormActionResponse {
    with_default(|api| api.contact(&name, &email, &message))
}

pub fn booking(full_name: String, email: String, phone: String, date: String) -> FormActionResponse {
    with_default(|api| api.booking(&full_name, &email, &phone, &date))
}

pub fn newsletter(email: String) -> FormActionResponse {
    with_default(|api| api.newsletter(&email))
}

pub fn forgot_password(email: String) -> FormActionResponse {
    with_default(|api| api.forgot_password(&email))
}

/// `gate` is one of `article`, `plan`, `slot`.
pub fn require_login(gate: String) -> FormActionResponse {
    match Gate::parse(&gate) {
        Some(gate) => with_default(|api| api.require_login(gate)),
        None => FormActionResponse::failure(format!("unknown gate `{gate}`")),
    }
}

fn with_default(f: impl FnOnce(&SiteApi) -> FormActionResponse) -> FormActionResponse {
    match default_api() {
        Ok(api) => f(api),
        Err(err) => FormActionResponse::failure(err),
    }
}
