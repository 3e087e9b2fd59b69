//! `BlitzWare` CLI Library
//!
//! Terminal front-end for the `BlitzWare` dashboard: account login,
//! applications, end-users, subscriptions, licenses, files, chat and logs.

pub mod app_cmd;
pub mod auth_cmd;
pub mod chat_cmd;
pub mod config;
pub mod file_cmd;
pub mod fmt;
pub mod license_cmd;
pub mod sub_cmd;
pub mod user_cmd;
