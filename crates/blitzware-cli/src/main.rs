//! `BlitzWare` CLI
//!
//! Manage a `BlitzWare` dashboard account from the terminal.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use blitzware_cli::app_cmd::{self, AppAction};
use blitzware_cli::auth_cmd::{self, AuthAction};
use blitzware_cli::chat_cmd::{self, ChatAction, LogAction};
use blitzware_cli::config::CliConfig;
use blitzware_cli::file_cmd::{self, AppLogAction, FileAction};
use blitzware_cli::license_cmd::{self, LicenseAction};
use blitzware_cli::sub_cmd::{self, SubAction};
use blitzware_cli::user_cmd::{self, UserAction};
use blitzware_client::Dashboard;
use blitzware_core::config::load_config;
use blitzware_core::tracing_init::{default_filter, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "blitzware")]
#[command(version, about = "BlitzWare licensing dashboard CLI", long_about = None)]
struct Cli {
    /// API base URL (overrides config file and BLITZWARE_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Settings file to use instead of the global one.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in, verify, register, inspect the account.
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Manage applications.
    App {
        #[command(subcommand)]
        action: AppAction,
    },
    /// Manage an application's users.
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage an application's subscription tiers.
    Sub {
        #[command(subcommand)]
        action: SubAction,
    },
    /// Generate and manage license keys.
    License {
        #[command(subcommand)]
        action: LicenseAction,
    },
    /// Manage an application's files.
    File {
        #[command(subcommand)]
        action: FileAction,
    },
    /// Application activity logs.
    AppLog {
        #[command(subcommand)]
        action: AppLogAction,
    },
    /// Community chat.
    Chat {
        #[command(subcommand)]
        action: ChatAction,
    },
    /// Your account's activity log.
    Log {
        #[command(subcommand)]
        action: LogAction,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    init_tracing(&default_filter(&config.log_level), cli.log_json);
    info!(version = env!("CARGO_PKG_VERSION"), api = %config.api.base_url, "Starting blitzware CLI");

    let mut state = CliConfig::load();
    let mut dash = Dashboard::new(&config.api)?;
    if state.matches_api(&config.api.base_url) {
        if let Some(data) = state.session.clone() {
            dash.restore(data).await;
        }
        if let Some(pending) = &state.pending {
            dash.resume_challenge(&pending.username, pending.challenge);
        }
    } else if state.session.is_some() || state.pending.is_some() {
        debug!("stored session belongs to another API, ignoring it");
        state.clear_auth();
    }
    state.api_url = Some(config.api.base_url.clone());

    let result = match cli.command {
        Command::Auth { action } => auth_cmd::run(action, &mut dash, &mut state).await,
        Command::App { action } => app_cmd::run(action, &mut dash, &mut state).await,
        Command::User { action } => user_cmd::run(action, &mut dash, &state).await,
        Command::Sub { action } => sub_cmd::run(action, &mut dash, &state).await,
        Command::License { action } => license_cmd::run(action, &mut dash, &state).await,
        Command::File { action } => file_cmd::run(action, &mut dash, &state).await,
        Command::AppLog { action } => file_cmd::run_app_logs(action, &mut dash, &state).await,
        Command::Chat { action } => chat_cmd::run(action, &mut dash).await,
        Command::Log { action } => chat_cmd::run_logs(action, &mut dash).await,
    };

    // Saved on failure too, a parked login has to survive.
    state.session = dash.session().account_data();
    state.save()?;

    result
}
