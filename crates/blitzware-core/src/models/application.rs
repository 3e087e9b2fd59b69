use serde::{Deserialize, Serialize};

use super::Flag;

/// Application registered under a dashboard account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub name: String,
    pub secret: String,
    pub status: Flag,
    pub hwid_check: Flag,
    pub developer_mode: Flag,
    pub integrity_check: Flag,
    pub free_mode: Flag,
    pub two_factor_auth: Flag,
    #[serde(default)]
    pub program_hash: Option<String>,
    pub version: String,
    #[serde(default)]
    pub download_link: Option<String>,
    #[serde(default)]
    pub admin_role_id: Option<i64>,
    #[serde(default)]
    pub admin_role_level: Option<i64>,
}

impl Application {
    /// Copy the mutable settings of `update` onto this application.
    pub fn apply_update(&mut self, update: &ApplicationUpdate) {
        self.status = update.status;
        self.hwid_check = update.hwid_check;
        self.developer_mode = update.developer_mode;
        self.integrity_check = update.integrity_check;
        self.free_mode = update.free_mode;
        self.two_factor_auth = update.two_factor_auth;
        self.program_hash.clone_from(&update.program_hash);
        self.version.clone_from(&update.version);
        self.download_link.clone_from(&update.download_link);
        self.admin_role_id = update.subscription;
    }
}

/// Short reference embedded in users, licenses and files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRef {
    pub id: String,
    pub name: String,
}

/// `POST /applications`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub name: String,
    pub account_id: String,
}

/// `PUT /applications/{id}`: full replacement of the mutable settings.
///
/// Optional fields serialize as `null` so the server clears them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationUpdate {
    pub status: Flag,
    pub hwid_check: Flag,
    pub developer_mode: Flag,
    pub integrity_check: Flag,
    pub free_mode: Flag,
    pub two_factor_auth: Flag,
    pub program_hash: Option<String>,
    pub version: String,
    pub download_link: Option<String>,
    pub account_id: String,
    pub subscription: Option<i64>,
}

impl ApplicationUpdate {
    /// Snapshot `app`'s current settings as an update owned by `account_id`.
    pub fn from_application(app: &Application, account_id: &str) -> Self {
        Self {
            status: app.status,
            hwid_check: app.hwid_check,
            developer_mode: app.developer_mode,
            integrity_check: app.integrity_check,
            free_mode: app.free_mode,
            two_factor_auth: app.two_factor_auth,
            program_hash: app.program_hash.clone(),
            version: app.version.clone(),
            download_link: app.download_link.clone(),
            account_id: account_id.to_string(),
            subscription: app.admin_role_id,
        }
    }
}
