use serde::{Deserialize, Serialize};

use super::envelope::RecordId;

/// Frequently asked question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of FAQ create and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaqInput {
    pub question: String,
    pub answer: String,
}
