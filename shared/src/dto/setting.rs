use serde::{Deserialize, Serialize};

use super::envelope::RecordId;

/// Administrator profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, alias = "full_name")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "profileImage")]
    pub profile_pic: Option<String>,
}

/// Profile fields the settings form may change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Static content page (terms, privacy policy, trust and safety).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentPage {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub description: String,
}

/// Body of a content page replacement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentInput {
    pub description: String,
}
