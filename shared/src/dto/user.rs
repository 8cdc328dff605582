use serde::{Deserialize, Serialize};

use super::envelope::RecordId;

/// Registered customer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    #[serde(default, alias = "full_name")]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, alias = "created_on")]
    pub created_at: Option<String>,
}
