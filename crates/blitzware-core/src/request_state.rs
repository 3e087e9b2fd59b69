//! Lifecycle of a single API call.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where an API call currently is in its lifecycle.
///
/// `None -> Pending -> Sent -> {Success | Error}`. `Pending` is entered on
/// call entry, `Sent` once the transport returned and before the body is
/// decoded, and the terminal state after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    #[default]
    None,
    Pending,
    Sent,
    Success,
    Error,
}

impl RequestState {
    /// `true` while the call is waiting on the network or decoding.
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::Pending | Self::Sent)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    /// Whether `next` is a legal successor of `self`.
    ///
    /// A new call may start from any state that is not in flight. `Error`
    /// is reachable from `Pending` as well as `Sent` because local
    /// serialization and transport failures happen before anything is sent.
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::None | Self::Success | Self::Error, Self::Pending)
            | (Self::Pending, Self::Sent | Self::Error)
            | (Self::Sent, Self::Success | Self::Error) => true,
            _ => false,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
