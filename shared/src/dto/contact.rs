use serde::{Deserialize, Serialize};
use std::fmt;

use super::envelope::RecordId;

/// Workflow status of a cleaning contact request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
    Approved,
    Rejected,
}

impl ContactStatus {
    /// Value used both on the wire and as the `status` list filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Pending => "Pending",
            ContactStatus::InProgress => "In Progress",
            ContactStatus::Completed => "Completed",
            ContactStatus::Cancelled => "Cancelled",
            ContactStatus::Approved => "Approved",
            ContactStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ContactStatus::Pending),
            "in progress" | "in-progress" | "in_progress" => Ok(ContactStatus::InProgress),
            "completed" => Ok(ContactStatus::Completed),
            "cancelled" => Ok(ContactStatus::Cancelled),
            "approved" => Ok(ContactStatus::Approved),
            "rejected" => Ok(ContactStatus::Rejected),
            other => Err(format!("unknown contact status: {other}")),
        }
    }
}

/// Cleaning contact request submitted by a customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub category: String,
    pub status: ContactStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// New contact request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
    pub category: String,
}

/// Body of the contact status update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactStatusUpdate {
    pub status: ContactStatus,
}
