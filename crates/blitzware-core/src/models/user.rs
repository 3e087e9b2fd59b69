use serde::{Deserialize, Serialize};

use super::{ApplicationRef, Flag};
use crate::timestamp::Timestamp;

/// Licensed end-user of an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub expiry_date: Timestamp,
    pub last_login: Timestamp,
    #[serde(rename = "lastIP")]
    pub last_ip: String,
    pub hwid: String,
    pub license: String,
    pub enabled: Flag,
    pub two_factor_auth: Flag,
    #[serde(default)]
    pub user_sub_id: Option<i64>,
    pub application: ApplicationRef,
}

impl User {
    pub fn apply_update(&mut self, update: &UserUpdate) {
        self.username.clone_from(&update.username);
        self.email.clone_from(&update.email);
        self.expiry_date = update.expiry_date.clone();
        self.hwid.clone_from(&update.hwid);
        self.two_factor_auth = update.two_factor_auth;
        self.enabled = update.enabled;
        self.user_sub_id = update.subscription;
    }

    /// Whether the user's access has lapsed. Unparseable dates count as
    /// "now", so they read as expired.
    pub fn is_expired(&self) -> bool {
        self.expiry_date.or_now() <= chrono::Utc::now()
    }
}

/// `POST /users`: create a user from the dashboard.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub application_id: String,
    pub expiry_date: Timestamp,
    pub subscription: Option<i64>,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("application_id", &self.application_id)
            .field("expiry_date", &self.expiry_date)
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}

/// `PUT /users/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub username: String,
    pub email: String,
    pub expiry_date: Timestamp,
    pub hwid: String,
    pub two_factor_auth: Flag,
    pub enabled: Flag,
    pub subscription: Option<i64>,
}

impl From<&User> for UserUpdate {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            expiry_date: user.expiry_date.clone(),
            hwid: user.hwid.clone(),
            two_factor_auth: user.two_factor_auth,
            enabled: user.enabled,
            subscription: user.user_sub_id,
        }
    }
}
