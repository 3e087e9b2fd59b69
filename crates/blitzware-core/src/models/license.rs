use serde::{Deserialize, Serialize};

use super::{ApplicationRef, Flag};
use crate::timestamp::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: String,
    pub license: String,
    pub days: i64,
    pub expiry_date: Timestamp,
    pub used: Flag,
    #[serde(default)]
    pub used_by: Option<String>,
    pub enabled: Flag,
    #[serde(default)]
    pub user_sub_id: Option<i64>,
    pub application: ApplicationRef,
}

impl License {
    pub fn apply_update(&mut self, update: &LicenseUpdate) {
        self.license.clone_from(&update.license);
        self.days = update.days;
        self.used = update.used;
        self.enabled = update.enabled;
        self.user_sub_id = update.subscription;
    }
}

/// `POST /licenses`: generate `amount` keys following `format`.
///
/// The server answers with the generated licenses as an array.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLicenses {
    pub days: i64,
    pub format: String,
    pub amount: u32,
    pub subscription: i64,
    pub application_id: String,
}

/// `PUT /licenses/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseUpdate {
    pub license: String,
    pub days: i64,
    pub used: Flag,
    pub enabled: Flag,
    pub subscription: Option<i64>,
}

impl From<&License> for LicenseUpdate {
    fn from(license: &License) -> Self {
        Self {
            license: license.license.clone(),
            days: license.days,
            used: license.used,
            enabled: license.enabled,
            subscription: license.user_sub_id,
        }
    }
}
