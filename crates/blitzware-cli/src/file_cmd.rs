//! File and application log subcommands.

use std::io::{self, Write};
use std::path::PathBuf;

use blitzware_client::Dashboard;

use crate::config::CliConfig;
use crate::fmt::{write_app_logs, write_files};

#[derive(clap::Subcommand, Debug)]
pub enum FileAction {
    /// List the application's files.
    List {
        #[arg(long)]
        app: Option<String>,
    },
    /// Upload a file.
    Upload {
        path: PathBuf,
        #[arg(long)]
        app: Option<String>,
    },
    /// Delete a file.
    Delete { id: String },
}

#[derive(clap::Subcommand, Debug)]
pub enum AppLogAction {
    /// List the application's end-user activity.
    List {
        #[arg(long)]
        app: Option<String>,
    },
    /// Delete a log entry.
    Delete { id: i64 },
}

pub async fn run(action: FileAction, dash: &mut Dashboard, config: &CliConfig) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        FileAction::List { app } => {
            dash.load_files(config.application(app.as_deref())?).await?;
            write_files(&mut out, dash.files().as_slice())?;
        }
        FileAction::Upload { path, app } => {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow::anyhow!("Not a file path: {}", path.display()))?
                .to_string();
            let contents = tokio::fs::read(&path)
                .await
                .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
            let file = dash
                .upload_file(config.application(app.as_deref())?, &name, contents)
                .await?;
            writeln!(
                out,
                "Uploaded {} ({}) as {}",
                file.name,
                file.display_size(),
                file.id
            )?;
        }
        FileAction::Delete { id } => {
            dash.delete_file(&id).await?;
            writeln!(out, "Deleted file {id}")?;
        }
    }
    Ok(())
}

pub async fn run_app_logs(
    action: AppLogAction,
    dash: &mut Dashboard,
    config: &CliConfig,
) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        AppLogAction::List { app } => {
            dash.load_app_logs(config.application(app.as_deref())?)
                .await?;
            write_app_logs(&mut out, dash.app_logs().as_slice())?;
        }
        AppLogAction::Delete { id } => {
            dash.delete_app_log(id).await?;
            writeln!(out, "Deleted log #{id}")?;
        }
    }
    Ok(())
}
