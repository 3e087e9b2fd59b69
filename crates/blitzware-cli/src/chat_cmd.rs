//! Community chat and account activity log subcommands.

use std::io::{self, Write};

use blitzware_client::Dashboard;
use blitzware_core::models::GENERAL_CHAT_ID;

use crate::fmt::{write_chat, write_logs};

#[derive(clap::Subcommand, Debug)]
pub enum ChatAction {
    /// Show a channel's messages.
    List {
        #[arg(long, default_value_t = GENERAL_CHAT_ID)]
        chat: i64,
    },
    /// Post a message as the logged-in account.
    Send {
        message: String,
        #[arg(long, default_value_t = GENERAL_CHAT_ID)]
        chat: i64,
    },
    /// Delete a message.
    Delete { id: i64 },
}

#[derive(clap::Subcommand, Debug)]
pub enum LogAction {
    /// Show your account's activity log.
    List,
    /// Delete a log entry.
    Delete { id: i64 },
}

pub async fn run(action: ChatAction, dash: &mut Dashboard) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        ChatAction::List { chat } => {
            dash.load_chat(chat).await?;
            write_chat(&mut out, dash.chat().as_slice())?;
        }
        ChatAction::Send { message, chat } => {
            let sent = dash.send_chat_message(&message, chat).await?;
            writeln!(out, "Sent message #{}", sent.id)?;
        }
        ChatAction::Delete { id } => {
            dash.delete_chat_message(id).await?;
            writeln!(out, "Deleted message #{id}")?;
        }
    }
    Ok(())
}

pub async fn run_logs(action: LogAction, dash: &mut Dashboard) -> anyhow::Result<()> {
    let mut out = io::stdout();
    match action {
        LogAction::List => {
            dash.load_logs().await?;
            write_logs(&mut out, dash.logs().as_slice())?;
        }
        LogAction::Delete { id } => {
            dash.delete_log(id).await?;
            writeln!(out, "Deleted log #{id}")?;
        }
    }
    Ok(())
}
