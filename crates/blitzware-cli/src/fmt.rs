//! Output formatting helpers.

use std::io::{self, Write};

use blitzware_core::format::format_date;
use blitzware_core::models::{
    Account, AppLog, Application, ChatMessage, File, License, Log, User, UserSubscription,
};
use blitzware_core::Timestamp;

/// Truncate to `max` characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// `dd MMM yyyy HH:mm`, or the raw value when it does not parse.
pub fn date(ts: &Timestamp) -> String {
    ts.parse()
        .map_or_else(|| ts.as_str().to_string(), |at| format_date(&at))
}

fn opt(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

pub fn write_account_detail(w: &mut impl Write, account: &Account) -> io::Result<()> {
    writeln!(w, "  ID:       {}", account.id)?;
    writeln!(w, "  Username: {}", account.username)?;
    writeln!(w, "  Email:    {}", account.email)?;
    writeln!(w, "  Role:     {}", opt(account.primary_role()))?;
    writeln!(w, "  Created:  {}", date(&account.creation_date))?;
    writeln!(w, "  Verified: {}", account.email_verified)?;
    writeln!(w, "  2FA:      {}", account.two_factor_auth)?;
    writeln!(w, "  Enabled:  {}", account.enabled)?;
    if account.profile_picture.is_some() {
        writeln!(w, "  Avatar:   set")?;
    }
    Ok(())
}

pub fn write_applications(w: &mut impl Write, apps: &[Application]) -> io::Result<()> {
    if apps.is_empty() {
        return writeln!(w, "No applications found.");
    }
    writeln!(w, "{:<38} {:<24} {:<8} {:<8}", "ID", "NAME", "STATUS", "VERSION")?;
    for app in apps {
        writeln!(
            w,
            "{:<38} {:<24} {:<8} {:<8}",
            app.id,
            truncate(&app.name, 24),
            if app.status.get() { "on" } else { "off" },
            truncate(&app.version, 8),
        )?;
    }
    writeln!(w, "\n{} application(s)", apps.len())
}

pub fn write_application_detail(w: &mut impl Write, app: &Application) -> io::Result<()> {
    writeln!(w, "  ID:        {}", app.id)?;
    writeln!(w, "  Name:      {}", app.name)?;
    writeln!(w, "  Secret:    {}", app.secret)?;
    writeln!(w, "  Version:   {}", app.version)?;
    writeln!(w, "  Status:    {}", app.status)?;
    writeln!(w, "  HWID:      {}", app.hwid_check)?;
    writeln!(w, "  Dev mode:  {}", app.developer_mode)?;
    writeln!(w, "  Integrity: {}", app.integrity_check)?;
    writeln!(w, "  Free mode: {}", app.free_mode)?;
    writeln!(w, "  2FA:       {}", app.two_factor_auth)?;
    writeln!(w, "  Hash:      {}", opt(app.program_hash.as_deref()))?;
    writeln!(w, "  Download:  {}", opt(app.download_link.as_deref()))?;
    if let Some(level) = app.admin_role_level {
        writeln!(w, "  Admin lvl: {level}")?;
    }
    Ok(())
}

pub fn write_users(w: &mut impl Write, users: &[User]) -> io::Result<()> {
    if users.is_empty() {
        return writeln!(w, "No users found.");
    }
    writeln!(
        w,
        "{:<38} {:<20} {:<18} {:<16} {:<8}",
        "ID", "USERNAME", "EXPIRES", "LAST IP", "ENABLED"
    )?;
    for user in users {
        let expiry = if user.is_expired() {
            format!("{} !", date(&user.expiry_date))
        } else {
            date(&user.expiry_date)
        };
        writeln!(
            w,
            "{:<38} {:<20} {:<18} {:<16} {:<8}",
            user.id,
            truncate(&user.username, 20),
            expiry,
            truncate(&user.last_ip, 16),
            user.enabled,
        )?;
    }
    writeln!(w, "\n{} user(s)", users.len())
}

pub fn write_subscriptions(w: &mut impl Write, subs: &[UserSubscription]) -> io::Result<()> {
    if subs.is_empty() {
        return writeln!(w, "No subscriptions found.");
    }
    writeln!(w, "{:<8} {:<24} {:<6}", "ID", "NAME", "LEVEL")?;
    for sub in subs {
        writeln!(w, "{:<8} {:<24} {:<6}", sub.id, truncate(&sub.name, 24), sub.level)?;
    }
    writeln!(w, "\n{} subscription(s)", subs.len())
}

pub fn write_licenses(w: &mut impl Write, licenses: &[License]) -> io::Result<()> {
    if licenses.is_empty() {
        return writeln!(w, "No licenses found.");
    }
    writeln!(
        w,
        "{:<38} {:<32} {:<5} {:<5} {:<16}",
        "ID", "KEY", "DAYS", "USED", "USED BY"
    )?;
    for license in licenses {
        writeln!(
            w,
            "{:<38} {:<32} {:<5} {:<5} {:<16}",
            license.id,
            truncate(&license.license, 32),
            license.days,
            license.used,
            truncate(opt(license.used_by.as_deref()), 16),
        )?;
    }
    writeln!(w, "\n{} license(s)", licenses.len())
}

pub fn write_files(w: &mut impl Write, files: &[File]) -> io::Result<()> {
    if files.is_empty() {
        return writeln!(w, "No files found.");
    }
    writeln!(w, "{:<38} {:<32} {:<12} {:<18}", "ID", "NAME", "SIZE", "CREATED")?;
    for file in files {
        writeln!(
            w,
            "{:<38} {:<32} {:<12} {:<18}",
            file.id,
            truncate(&file.name, 32),
            file.display_size(),
            date(&file.created_on),
        )?;
    }
    writeln!(w, "\n{} file(s)", files.len())
}

pub fn write_chat(w: &mut impl Write, messages: &[ChatMessage]) -> io::Result<()> {
    if messages.is_empty() {
        return writeln!(w, "No messages yet.");
    }
    for msg in messages {
        writeln!(
            w,
            "[{}] #{} {}: {}",
            date(&msg.date),
            msg.id,
            msg.username,
            msg.message
        )?;
    }
    Ok(())
}

pub fn write_logs(w: &mut impl Write, logs: &[Log]) -> io::Result<()> {
    if logs.is_empty() {
        return writeln!(w, "No logs found.");
    }
    writeln!(w, "{:<8} {:<18} {:<20} {}", "ID", "DATE", "ACTION", "MESSAGE")?;
    for log in logs {
        writeln!(
            w,
            "{:<8} {:<18} {:<20} {}",
            log.id,
            date(&log.date),
            truncate(&log.action, 20),
            log.message,
        )?;
    }
    Ok(())
}

pub fn write_app_logs(w: &mut impl Write, logs: &[AppLog]) -> io::Result<()> {
    if logs.is_empty() {
        return writeln!(w, "No application logs found.");
    }
    writeln!(
        w,
        "{:<8} {:<18} {:<20} {:<20} {:<16}",
        "ID", "DATE", "USERNAME", "ACTION", "IP"
    )?;
    for log in logs {
        writeln!(
            w,
            "{:<8} {:<18} {:<20} {:<20} {:<16}",
            log.id,
            date(&log.date),
            truncate(&log.username, 20),
            truncate(&log.action, 20),
            log.ip,
        )?;
    }
    Ok(())
}
