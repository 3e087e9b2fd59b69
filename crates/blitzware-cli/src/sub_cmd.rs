//! User subscription subcommands.

use std::io::{self, Write};

use blitzware_client::Dashboard;
use blitzware_core::models::{NewUserSubscription, UserSubscriptionUpdate};

use crate::config::CliConfig;
use crate::fmt::write_subscriptions;

#[derive(clap::Subcommand, Debug)]
pub enum SubAction {
    /// List the application's subscription tiers.
    List {
        #[arg(long)]
        app: Option<String>,
    },
    /// Create a tier.
    Create {
        name: String,
        #[arg(long, default_value = "1")]
        level: i64,
        #[arg(long)]
        app: Option<String>,
    },
    /// Rename or re-level a tier.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        level: Option<i64>,
        #[arg(long)]
        app: Option<String>,
    },
    /// Delete a tier.
    Delete { id: i64 },
}

pub async fn run(action: SubAction, dash: &mut Dashboard, config: &CliConfig) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        SubAction::List { app } => {
            dash.load_subscriptions(config.application(app.as_deref())?)
                .await?;
            write_subscriptions(&mut out, dash.subscriptions().as_slice())?;
        }
        SubAction::Create { name, level, app } => {
            let body = NewUserSubscription {
                name,
                level,
                application_id: config.application(app.as_deref())?.to_string(),
            };
            let sub = dash.create_subscription(&body).await?;
            writeln!(out, "Created subscription {} (#{})", sub.name, sub.id)?;
        }
        SubAction::Update {
            id,
            name,
            level,
            app,
        } => {
            dash.load_subscriptions(config.application(app.as_deref())?)
                .await?;
            let current = dash
                .subscriptions()
                .get(&id)
                .ok_or_else(|| anyhow::anyhow!("Subscription #{id} not found"))?;
            let update = UserSubscriptionUpdate {
                name: name.unwrap_or_else(|| current.name.clone()),
                level: level.unwrap_or(current.level),
            };
            dash.update_subscription(id, &update).await?;
            writeln!(out, "Updated subscription #{id}")?;
        }
        SubAction::Delete { id } => {
            dash.delete_subscription(id).await?;
            writeln!(out, "Deleted subscription #{id}")?;
        }
    }
    Ok(())
}
