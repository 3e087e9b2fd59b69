//! License subcommands.

use std::io::{self, Write};

use blitzware_client::Dashboard;
use blitzware_core::format::LicenseFormat;
use blitzware_core::models::{Flag, LicenseUpdate, NewLicenses};
use tracing::warn;

use crate::config::CliConfig;
use crate::fmt::write_licenses;

#[derive(clap::Subcommand, Debug)]
pub enum LicenseAction {
    /// List the application's licenses.
    List {
        #[arg(long)]
        app: Option<String>,
    },
    /// Generate license keys.
    Create {
        /// Days of access a key grants once redeemed.
        #[arg(long, default_value = "30")]
        days: i64,
        #[arg(long, default_value = "1")]
        amount: u32,
        /// plain, prefixed, grouped, prefixed-grouped, or a raw template.
        #[arg(long, default_value = "grouped")]
        format: LicenseFormat,
        /// Replaces `PREFIX` in prefixed formats.
        #[arg(long, default_value = "")]
        prefix: String,
        /// Subscription id the keys grant.
        #[arg(long)]
        subscription: i64,
        #[arg(long)]
        app: Option<String>,
    },
    /// Change a license. Unspecified fields are kept.
    Update {
        id: String,
        #[arg(long)]
        key: Option<String>,
        #[arg(long)]
        days: Option<i64>,
        #[arg(long)]
        used: Option<bool>,
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        subscription: Option<i64>,
        #[arg(long)]
        app: Option<String>,
    },
    /// Delete a license.
    Delete { id: String },
}

pub async fn run(
    action: LicenseAction,
    dash: &mut Dashboard,
    config: &CliConfig,
) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        LicenseAction::List { app } => {
            dash.load_licenses(config.application(app.as_deref())?).await?;
            write_licenses(&mut out, dash.licenses().as_slice())?;
        }
        LicenseAction::Create {
            days,
            amount,
            format,
            prefix,
            subscription,
            app,
        } => {
            check_create(days, amount, subscription)?;
            if !prefix.is_empty() && !format.takes_prefix() {
                warn!(?format, "prefix ignored for a format without PREFIX");
            }
            let body = NewLicenses {
                days,
                format: format.render(&prefix),
                amount,
                subscription,
                application_id: config.application(app.as_deref())?.to_string(),
            };
            let created = dash.create_licenses(&body).await?;
            for license in &created {
                writeln!(out, "{}", license.license)?;
            }
            writeln!(out, "\n{} license(s) generated", created.len())?;
        }
        LicenseAction::Update {
            id,
            key,
            days,
            used,
            enabled,
            subscription,
            app,
        } => {
            dash.load_licenses(config.application(app.as_deref())?).await?;
            let license = dash
                .licenses()
                .get(&id)
                .ok_or_else(|| anyhow::anyhow!("License {id} not found"))?;
            let mut update = LicenseUpdate::from(license);
            if let Some(key) = key {
                update.license = key;
            }
            if let Some(days) = days {
                update.days = days;
            }
            if let Some(used) = used {
                update.used = Flag::from(used);
            }
            if let Some(enabled) = enabled {
                update.enabled = Flag::from(enabled);
            }
            if subscription.is_some() {
                update.subscription = subscription;
            }
            dash.update_license(&id, &update).await?;
            writeln!(out, "Updated license {id}")?;
        }
        LicenseAction::Delete { id } => {
            dash.delete_license(&id).await?;
            writeln!(out, "Deleted license {id}")?;
        }
    }
    Ok(())
}

/// Days, amount and subscription must all be set before keys are generated.
pub fn check_create(days: i64, amount: u32, subscription: i64) -> anyhow::Result<()> {
    if days <= 0 {
        anyhow::bail!("--days must be at least 1");
    }
    if amount == 0 {
        anyhow::bail!("--amount must be at least 1");
    }
    if subscription == 0 {
        anyhow::bail!("--subscription is required");
    }
    Ok(())
}
