//! `BlitzWare` Core Library
//!
//! Shared functionality for `BlitzWare` components:
//! - Data model mirrored from the dashboard REST API
//! - Request lifecycle and authentication state machines
//! - Configuration resolution and hierarchy
//! - Common error types and display helpers

pub mod auth;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod request_state;
pub mod timestamp;
pub mod tracing_init;

pub use auth::{AuthChallenge, AuthState};
pub use config::Config;
pub use error::{Error, ErrorBody, Result};
pub use request_state::RequestState;
pub use timestamp::Timestamp;
