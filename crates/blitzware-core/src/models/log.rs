use serde::{Deserialize, Serialize};

use crate::timestamp::Timestamp;

/// Account activity entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub id: i64,
    pub username: String,
    pub date: Timestamp,
    pub action: String,
    pub message: String,
}

/// Activity of an application's end-users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppLog {
    pub id: i64,
    pub username: String,
    pub date: Timestamp,
    pub action: String,
    pub ip: String,
    pub app_id: String,
}
