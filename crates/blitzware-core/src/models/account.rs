use std::fmt;

use serde::{Deserialize, Serialize};

use super::Flag;
use crate::timestamp::Timestamp;

/// Dashboard account (the person operating the dashboard, not an end-user).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub creation_date: Timestamp,
    /// Base64-encoded image.
    #[serde(default)]
    pub profile_picture: Option<String>,
    pub email_verified: Flag,
    pub two_factor_auth: Flag,
    pub enabled: Flag,
}

impl Account {
    /// Role shown next to the account name. The server orders roles by rank.
    pub fn primary_role(&self) -> Option<&str> {
        self.roles.first().map(String::as_str)
    }
}

/// Successful login / verification payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    pub account: Account,
    pub token: String,
}

impl fmt::Debug for AccountData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountData")
            .field("account", &self.account)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// `POST /accounts/login`
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `POST /accounts/register`
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `POST /accounts/verifyLogin2FA`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorVerification {
    pub username: String,
    pub two_factor_code: String,
}

/// `POST /accounts/verifyLoginOTP`
#[derive(Debug, Clone, Serialize)]
pub struct OtpVerification {
    pub username: String,
    pub otp: String,
}

/// `PUT /accounts/profilePicture/{id}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePictureUpdate {
    pub profile_picture: String,
}
