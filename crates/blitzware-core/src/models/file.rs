use serde::{Deserialize, Serialize};

use super::ApplicationRef;
use crate::format::format_bytes;
use crate::timestamp::Timestamp;

/// File uploaded for an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub id: String,
    pub name: String,
    /// Byte count, string-encoded by the server.
    pub size: String,
    pub created_on: Timestamp,
    pub application: ApplicationRef,
}

impl File {
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.trim().parse().ok()
    }

    /// Size with units, e.g. `1.50 KB`; falls back to the raw string.
    pub fn display_size(&self) -> String {
        format_bytes(&self.size, 2).unwrap_or_else(|| self.size.clone())
    }
}
