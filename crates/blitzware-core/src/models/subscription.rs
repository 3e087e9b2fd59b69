use serde::{Deserialize, Serialize};

/// Subscription tier end-users and licenses can be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSubscription {
    pub id: i64,
    pub name: String,
    pub level: i64,
    pub application_id: String,
}

impl UserSubscription {
    pub fn apply_update(&mut self, update: &UserSubscriptionUpdate) {
        self.name.clone_from(&update.name);
        self.level = update.level;
    }
}

/// `POST /userSubs`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserSubscription {
    pub name: String,
    pub level: i64,
    pub application_id: String,
}

/// `PUT /userSubs/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSubscriptionUpdate {
    pub name: String,
    pub level: i64,
}
