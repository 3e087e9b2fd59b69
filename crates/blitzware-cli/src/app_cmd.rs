//! Application subcommands.

use std::io::{self, Write};

use blitzware_client::Dashboard;
use blitzware_core::models::{ApplicationUpdate, Flag};

use crate::config::CliConfig;
use crate::fmt::{write_application_detail, write_applications};

#[derive(clap::Subcommand, Debug)]
pub enum AppAction {
    /// List your applications.
    List,
    /// Show one application.
    Show { id: String },
    /// Create an application.
    Create { name: String },
    /// Change application settings. Unspecified settings are kept.
    Update {
        id: String,
        #[command(flatten)]
        settings: AppSettings,
    },
    /// Delete an application.
    Delete { id: String },
    /// Make an application the default for user, license and file commands.
    Use { id: String },
}

#[derive(clap::Args, Debug, Default)]
pub struct AppSettings {
    #[arg(long)]
    pub status: Option<bool>,
    #[arg(long)]
    pub hwid_check: Option<bool>,
    #[arg(long)]
    pub developer_mode: Option<bool>,
    #[arg(long)]
    pub integrity_check: Option<bool>,
    #[arg(long)]
    pub free_mode: Option<bool>,
    #[arg(long)]
    pub two_factor_auth: Option<bool>,
    #[arg(long)]
    pub version: Option<String>,
    /// Empty string clears it.
    #[arg(long)]
    pub program_hash: Option<String>,
    /// Empty string clears it.
    #[arg(long)]
    pub download_link: Option<String>,
}

impl AppSettings {
    pub fn apply(self, update: &mut ApplicationUpdate) {
        let flag = |value: Option<bool>, current: Flag| value.map_or(current, Flag::from);
        update.status = flag(self.status, update.status);
        update.hwid_check = flag(self.hwid_check, update.hwid_check);
        update.developer_mode = flag(self.developer_mode, update.developer_mode);
        update.integrity_check = flag(self.integrity_check, update.integrity_check);
        update.free_mode = flag(self.free_mode, update.free_mode);
        update.two_factor_auth = flag(self.two_factor_auth, update.two_factor_auth);
        if let Some(version) = self.version {
            update.version = version;
        }
        if let Some(hash) = self.program_hash {
            update.program_hash = non_empty(hash);
        }
        if let Some(link) = self.download_link {
            update.download_link = non_empty(link);
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

pub async fn run(
    action: AppAction,
    dash: &mut Dashboard,
    config: &mut CliConfig,
) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        AppAction::List => {
            dash.load_applications().await?;
            write_applications(&mut out, dash.applications().as_slice())?;
        }
        AppAction::Show { id } => {
            let app = dash.select_application(&id).await?;
            write_application_detail(&mut out, app)?;
        }
        AppAction::Create { name } => {
            let app = dash.create_application(&name).await?;
            writeln!(out, "Created application {} ({})", app.name, app.id)?;
        }
        AppAction::Update { id, settings } => {
            dash.load_applications().await?;
            let app = dash
                .applications()
                .get(&id)
                .ok_or_else(|| anyhow::anyhow!("Application {id} not found"))?;
            let mut update = ApplicationUpdate::from_application(app, dash.session().account_id()?);
            settings.apply(&mut update);
            dash.update_application(&id, &update).await?;
            writeln!(out, "Updated application {id}")?;
        }
        AppAction::Delete { id } => {
            dash.delete_application(&id).await?;
            if config.active_application.as_deref() == Some(id.as_str()) {
                config.active_application = None;
            }
            writeln!(out, "Deleted application {id}")?;
        }
        AppAction::Use { id } => {
            let app = dash.select_application(&id).await?;
            writeln!(out, "Using application {} ({})", app.name, app.id)?;
            config.active_application = Some(id);
        }
    }
    Ok(())
}
