//! Login flow state machine.
//!
//! ```text
//! Anonymous -> PendingCredentials -> Authenticated
//!                    |       ^
//!                    v       |
//!     TwoFactorRequired / OtpRequired --(verified)--> Authenticated
//! ```
//!
//! A failed login whose error is classified as an [`AuthChallenge`] parks
//! the flow in the matching branch. Failed verifications keep it there;
//! a fresh login attempt goes back through `PendingCredentials`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ErrorBody;

/// Server message that asks for an authenticator code.
pub const TWO_FACTOR_REQUIRED_MESSAGE: &str = "2FA required";

/// Server message that asks for the one-time code sent by email.
pub const OTP_REQUIRED_MESSAGE: &str = "we need to verify it is you, check your email";

/// Machine-readable code for [`AuthChallenge::TwoFactor`].
pub const TWO_FACTOR_REQUIRED_CODE: &str = "TWO_FACTOR_REQUIRED";

/// Machine-readable code for [`AuthChallenge::EmailOtp`].
pub const OTP_REQUIRED_CODE: &str = "OTP_REQUIRED";

/// Secondary verification the server demands before issuing a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthChallenge {
    /// Six-digit authenticator app code.
    TwoFactor,
    /// Four-digit code delivered by email.
    EmailOtp,
}

impl AuthChallenge {
    /// Classify a login error.
    ///
    /// The `code` field is checked first. Servers that only signal the
    /// challenge through prose are matched on the exact message text.
    pub fn from_error(body: &ErrorBody) -> Option<Self> {
        match body.code.as_str() {
            TWO_FACTOR_REQUIRED_CODE => return Some(Self::TwoFactor),
            OTP_REQUIRED_CODE => return Some(Self::EmailOtp),
            _ => {}
        }
        match body.message.as_str() {
            TWO_FACTOR_REQUIRED_MESSAGE => Some(Self::TwoFactor),
            OTP_REQUIRED_MESSAGE => Some(Self::EmailOtp),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::TwoFactor => TWO_FACTOR_REQUIRED_CODE,
            Self::EmailOtp => OTP_REQUIRED_CODE,
        }
    }

    /// Number of digits the user is expected to type.
    pub const fn code_length(self) -> usize {
        match self {
            Self::TwoFactor => 6,
            Self::EmailOtp => 4,
        }
    }
}

impl fmt::Display for AuthChallenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoFactor => f.write_str("two-factor code required"),
            Self::EmailOtp => f.write_str("email verification code required"),
        }
    }
}

/// Where the session is in the login flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    PendingCredentials { username: String },
    TwoFactorRequired { username: String },
    OtpRequired { username: String },
    Authenticated { username: String },
}

impl AuthState {
    /// Credentials were submitted.
    pub fn begin_login(&mut self, username: &str) {
        *self = Self::PendingCredentials {
            username: username.to_string(),
        };
    }

    /// The login call failed. Returns the challenge if the error asks for one.
    ///
    /// Any other error drops the flow back to `Anonymous`.
    pub fn login_failed(&mut self, error: &ErrorBody) -> Option<AuthChallenge> {
        let username = self.username().unwrap_or_default().to_string();
        let challenge = AuthChallenge::from_error(error);
        *self = match challenge {
            Some(AuthChallenge::TwoFactor) => Self::TwoFactorRequired { username },
            Some(AuthChallenge::EmailOtp) => Self::OtpRequired { username },
            None => Self::Anonymous,
        };
        if let Some(c) = challenge {
            info!(challenge = c.code(), "login requires secondary verification");
        }
        challenge
    }

    /// A verification code was rejected. Challenge states are re-entrant,
    /// so the flow waits for another code; anything else is unaffected.
    pub const fn verification_failed(&self) -> Option<AuthChallenge> {
        self.awaiting()
    }

    /// Park the flow on `challenge` for `username` without a login call,
    /// e.g. when resuming a flow persisted by a previous process.
    pub fn await_challenge(&mut self, username: &str, challenge: AuthChallenge) {
        let username = username.to_string();
        *self = match challenge {
            AuthChallenge::TwoFactor => Self::TwoFactorRequired { username },
            AuthChallenge::EmailOtp => Self::OtpRequired { username },
        };
    }

    /// The server issued a token.
    pub fn authenticated(&mut self, username: &str) {
        info!(username, "authenticated");
        *self = Self::Authenticated {
            username: username.to_string(),
        };
    }

    pub fn logout(&mut self) {
        *self = Self::Anonymous;
    }

    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// The challenge this state is waiting on, if any.
    pub const fn awaiting(&self) -> Option<AuthChallenge> {
        match self {
            Self::TwoFactorRequired { .. } => Some(AuthChallenge::TwoFactor),
            Self::OtpRequired { .. } => Some(AuthChallenge::EmailOtp),
            _ => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::PendingCredentials { username }
            | Self::TwoFactorRequired { username }
            | Self::OtpRequired { username }
            | Self::Authenticated { username } => Some(username),
        }
    }
}
