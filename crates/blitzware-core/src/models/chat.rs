use serde::{Deserialize, Serialize};

use crate::timestamp::Timestamp;

/// Channel shown on the community screen.
pub const GENERAL_CHAT_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    pub username: String,
    pub message: String,
    pub date: Timestamp,
    pub chat_id: i64,
}

/// `POST /chatMsgs`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChatMessage {
    pub username: String,
    pub message: String,
    pub date: Timestamp,
    pub chat_id: i64,
}

impl NewChatMessage {
    /// Message stamped with the current time.
    pub fn now(username: &str, message: &str, chat_id: i64) -> Self {
        Self {
            username: username.to_string(),
            message: message.to_string(),
            date: Timestamp::now(),
            chat_id,
        }
    }
}
