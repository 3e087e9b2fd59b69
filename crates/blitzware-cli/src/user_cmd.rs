//! End-user subcommands.

use std::io::{self, Write};

use blitzware_client::Dashboard;
use blitzware_core::models::{Flag, NewUser, UserUpdate};
use blitzware_core::Timestamp;

use crate::config::CliConfig;
use crate::fmt::write_users;

#[derive(clap::Subcommand, Debug)]
pub enum UserAction {
    /// List the application's users.
    List {
        #[arg(long)]
        app: Option<String>,
    },
    /// Create a user.
    Create {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "BLITZWARE_USER_PASSWORD", hide_env_values = true)]
        password: String,
        /// Access lasts this many days from now.
        #[arg(long, default_value = "30")]
        days: i64,
        /// Subscription id.
        #[arg(long)]
        subscription: Option<i64>,
        #[arg(long)]
        app: Option<String>,
    },
    /// Change a user. Unspecified fields are kept.
    Update {
        id: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// New expiry, this many days from now.
        #[arg(long)]
        days: Option<i64>,
        /// Clear the bound hardware id.
        #[arg(long)]
        reset_hwid: bool,
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        two_factor_auth: Option<bool>,
        #[arg(long)]
        subscription: Option<i64>,
        #[arg(long)]
        app: Option<String>,
    },
    /// Delete a user.
    Delete { id: String },
}

pub async fn run(action: UserAction, dash: &mut Dashboard, config: &CliConfig) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        UserAction::List { app } => {
            dash.load_users(config.application(app.as_deref())?).await?;
            write_users(&mut out, dash.users().as_slice())?;
        }
        UserAction::Create {
            username,
            email,
            password,
            days,
            subscription,
            app,
        } => {
            let body = NewUser {
                username,
                email,
                password,
                application_id: config.application(app.as_deref())?.to_string(),
                expiry_date: Timestamp::in_days(days),
                subscription,
            };
            let user = dash.create_user(&body).await?;
            writeln!(out, "Created user {} ({})", user.username, user.id)?;
        }
        UserAction::Update {
            id,
            username,
            email,
            days,
            reset_hwid,
            enabled,
            two_factor_auth,
            subscription,
            app,
        } => {
            dash.load_users(config.application(app.as_deref())?).await?;
            let user = dash
                .users()
                .get(&id)
                .ok_or_else(|| anyhow::anyhow!("User {id} not found"))?;
            let mut update = UserUpdate::from(user);
            if let Some(username) = username {
                update.username = username;
            }
            if let Some(email) = email {
                update.email = email;
            }
            if let Some(days) = days {
                update.expiry_date = Timestamp::in_days(days);
            }
            if reset_hwid {
                update.hwid.clear();
            }
            if let Some(enabled) = enabled {
                update.enabled = Flag::from(enabled);
            }
            if let Some(two_factor_auth) = two_factor_auth {
                update.two_factor_auth = Flag::from(two_factor_auth);
            }
            if subscription.is_some() {
                update.subscription = subscription;
            }
            dash.update_user(&id, &update).await?;
            writeln!(out, "Updated user {id}")?;
        }
        UserAction::Delete { id } => {
            dash.delete_user(&id).await?;
            writeln!(out, "Deleted user {id}")?;
        }
    }
    Ok(())
}
