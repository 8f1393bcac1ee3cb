//! Operator CLI for the site's account registry and form checks.
//!
//! # Responsibility
//! - Inspect and maintain the durable account slot.
//! - Run form flows and field checks from a terminal.

use clap::{Parser, Subcommand};
use living_logic_core::db::open_db;
use living_logic_core::validation::rules::FieldRule;
use living_logic_core::{
    init_from_config, AccountService, FormInput, FormService, LogToastSink, MemoryToastSink,
    SiteConfig, SlotAccountRepository, SqliteSlotStore, SubmitOutcome, SystemClock, ToastSink,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "living-logic", version, about = "Living with Logic site tools")]
struct Cli {
    /// Slot database path; overrides LIVING_LOGIC_DB_PATH.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core linkage info.
    Ping,
    /// Register an account through the signup flow.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Run the login flow and print the resulting toast.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// List registered accounts (credentials are never printed).
    List,
    /// Report whether an email is registered.
    CheckEmail { email: String },
    /// Remove every registered account.
    Clear,
    /// Run one field rule, e.g. `validate signupPassword Abcdef12`.
    Validate { rule: String, value: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, String> {
    let mut config = SiteConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    init_from_config(&config)?;

    match cli.command {
        Command::Ping => {
            println!("living_logic_core ping={}", living_logic_core::ping());
            println!("living_logic_core version={}", living_logic_core::core_version());
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { rule, value } => {
            let rule = FieldRule::parse(&rule).ok_or_else(|| {
                let known = FieldRule::ALL.map(FieldRule::as_str).join("|");
                format!("unknown rule `{rule}`; expected {known}")
            })?;
            match rule.check(&value) {
                None => {
                    println!("ok");
                    Ok(ExitCode::SUCCESS)
                }
                Some(message) => {
                    println!("{message}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Signup {
            name,
            email,
            password,
        } => {
            let input = FormInput::new()
                .with("name", name)
                .with("email", email)
                .with("password", password);
            run_form(&config, |forms| forms.signup(&input))
        }
        Command::Login { email, password } => {
            let input = FormInput::new()
                .with("email", email)
                .with("password", password);
            run_form(&config, |forms| forms.login(&input))
        }
        Command::List => with_accounts(&config, |accounts| {
            let list = accounts.list();
            for account in &list {
                println!(
                    "{}\t{}\t{}",
                    account.registered_at.to_rfc3339(),
                    account.email,
                    account.name
                );
            }
            println!("total={}", list.len());
            ExitCode::SUCCESS
        }),
        Command::CheckEmail { email } => with_accounts(&config, |accounts| {
            let registered = accounts.is_email_registered(&email);
            println!("registered={registered}");
            if registered {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }),
        Command::Clear => with_accounts(&config, |accounts| {
            if accounts.clear_all() {
                println!("cleared");
                ExitCode::SUCCESS
            } else {
                eprintln!("failed to clear accounts");
                ExitCode::FAILURE
            }
        }),
    }
}

type CliRepo<'conn> = SlotAccountRepository<SqliteSlotStore<'conn>, SystemClock>;

fn run_form(
    config: &SiteConfig,
    submit: impl FnOnce(&FormService<CliRepo<'_>, &MemoryToastSink>) -> SubmitOutcome,
) -> Result<ExitCode, String> {
    let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
    let store = SqliteSlotStore::try_new(&conn).map_err(|err| err.to_string())?;
    let repo = SlotAccountRepository::new(store, SystemClock, config.storage_slot.clone());
    let sink = MemoryToastSink::new();
    let forms = FormService::new(repo, &sink, &config.clone().without_delays());

    let outcome = submit(&forms);
    for toast in sink.shown() {
        println!("{}", toast.message);
        // Mirror to the log file when logging is configured.
        let _ = LogToastSink.show(toast);
    }

    match outcome {
        SubmitOutcome::Completed(preset) if !preset.is_error() => Ok(ExitCode::SUCCESS),
        SubmitOutcome::Completed(_) | SubmitOutcome::Busy => Ok(ExitCode::FAILURE),
        SubmitOutcome::Invalid(errors) => {
            for (field, message) in errors.iter() {
                println!("{field}: {message}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn with_accounts(
    config: &SiteConfig,
    f: impl FnOnce(&AccountService<CliRepo<'_>>) -> ExitCode,
) -> Result<ExitCode, String> {
    let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
    let store = SqliteSlotStore::try_new(&conn).map_err(|err| err.to_string())?;
    let repo = SlotAccountRepository::new(store, SystemClock, config.storage_slot.clone());
    Ok(f(&AccountService::new(repo)))
}
