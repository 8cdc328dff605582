use serde::{Deserialize, Serialize};

use super::envelope::RecordId;

/// Blog post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Path relative to the image host.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// The `data` part of a blog create/update multipart body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogInput {
    pub title: String,
    pub description: String,
}
