use serde::{Deserialize, Serialize};

use super::envelope::RecordId;

/// Admin notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    #[serde(rename = "id", alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

/// New notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationInput {
    pub title: String,
    pub message: String,
}
