//! Auth subcommands: login, verification, registration, account.
//!
//! User-facing output uses writeln! to stdout (this is a CLI binary, not debug output).

use std::io::{self, Write};
use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use blitzware_client::{Dashboard, LoginOutcome};
use blitzware_core::AuthChallenge;

use crate::config::{CliConfig, PendingLogin};
use crate::fmt::write_account_detail;

/// Auth subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum AuthAction {
    /// Log in to the dashboard.
    Login {
        /// Username.
        #[arg(short, long)]
        username: String,
        /// Password.
        #[arg(short, long, env = "BLITZWARE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Submit the six-digit authenticator code for a pending login.
    #[command(name = "verify-2fa")]
    Verify2fa {
        code: String,
    },
    /// Submit the four-digit email code for a pending login.
    VerifyOtp {
        code: String,
    },
    /// Create a dashboard account.
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "BLITZWARE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and forget the stored token.
    Logout,
    /// Show current auth status.
    Status,
    /// Fetch the account from the server and show it.
    Whoami,
    /// Upload a profile picture.
    Avatar {
        /// Image file.
        path: PathBuf,
    },
}

/// Execute an auth subcommand.
pub async fn run(
    action: AuthAction,
    dash: &mut Dashboard,
    config: &mut CliConfig,
) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        AuthAction::Login { username, password } => {
            config.pending = None;
            match dash.login(&username, &password).await? {
                LoginOutcome::Authenticated => {
                    writeln!(out, "Logged in as {username}")?;
                }
                LoginOutcome::ChallengeRequired(challenge) => {
                    config.pending = Some(PendingLogin {
                        username,
                        challenge,
                    });
                    writeln!(out, "{}", challenge_prompt(challenge))?;
                }
            }
        }
        AuthAction::Verify2fa { code } => {
            check_code(AuthChallenge::TwoFactor, &code)?;
            dash.verify_two_factor(&code).await?;
            finish_login(dash, config, &mut out)?;
        }
        AuthAction::VerifyOtp { code } => {
            check_code(AuthChallenge::EmailOtp, &code)?;
            dash.verify_otp(&code).await?;
            finish_login(dash, config, &mut out)?;
        }
        AuthAction::Register {
            username,
            email,
            password,
        } => {
            dash.register(&username, &email, &password).await?;
            writeln!(out, "Registered {username}. Log in with `auth login`.")?;
        }
        AuthAction::Logout => {
            dash.logout().await;
            config.clear_auth();
            writeln!(out, "Logged out")?;
        }
        AuthAction::Status => status(dash, config, &mut out)?,
        AuthAction::Whoami => {
            dash.refresh_account().await?;
            if let Some(account) = dash.session().account() {
                write_account_detail(&mut out, account)?;
            }
        }
        AuthAction::Avatar { path } => {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
            dash.update_profile_picture(STANDARD.encode(bytes)).await?;
            writeln!(out, "Profile picture updated")?;
        }
    }
    Ok(())
}

fn finish_login(dash: &Dashboard, config: &mut CliConfig, out: &mut impl Write) -> anyhow::Result<()> {
    config.pending = None;
    let username = dash.session().username()?;
    writeln!(out, "Logged in as {username}")?;
    Ok(())
}

fn status(dash: &Dashboard, config: &CliConfig, out: &mut impl Write) -> anyhow::Result<()> {
    if let Some(account) = dash.session().account() {
        writeln!(out, "Logged in as: {}", account.username)?;
        writeln!(out, "Account ID: {}", account.id)?;
    } else if let Some(pending) = &config.pending {
        writeln!(out, "Login pending for {}: {}", pending.username, pending.challenge)?;
    } else {
        writeln!(out, "Not logged in")?;
    }
    writeln!(out, "API: {}", dash.api().base_url())?;
    if let Some(app) = &config.active_application {
        writeln!(out, "Application: {app}")?;
    }
    Ok(())
}

fn challenge_prompt(challenge: AuthChallenge) -> &'static str {
    match challenge {
        AuthChallenge::TwoFactor => {
            "Two-factor authentication required. Run `auth verify-2fa <code>`."
        }
        AuthChallenge::EmailOtp => {
            "A verification code was sent to your email. Run `auth verify-otp <code>`."
        }
    }
}

/// Reject codes of the wrong shape before they reach the server.
pub fn check_code(challenge: AuthChallenge, code: &str) -> anyhow::Result<()> {
    let expected = challenge.code_length();
    if code.len() != expected || !code.bytes().all(|b| b.is_ascii_digit()) {
        anyhow::bail!("Expected a {expected}-digit code");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_shape_is_checked() {
        assert!(check_code(AuthChallenge::TwoFactor, "123456").is_ok());
        assert!(check_code(AuthChallenge::TwoFactor, "1234").is_err());
        assert!(check_code(AuthChallenge::EmailOtp, "1234").is_ok());
        assert!(check_code(AuthChallenge::EmailOtp, "12a4").is_err());
    }

    #[test]
    fn prompts_name_the_next_command() {
        assert!(challenge_prompt(AuthChallenge::TwoFactor).contains("verify-2fa"));
        assert!(challenge_prompt(AuthChallenge::EmailOtp).contains("verify-otp"));
    }
}
