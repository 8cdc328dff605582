use serde::{Deserialize, Serialize};

use super::envelope::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Complete,
    Pending,
    Failed,
}

/// Customer summary embedded in a payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Service summary embedded in a payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentService {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
}

/// Payment transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub amount: f64,
    #[serde(default)]
    pub user: Option<PaymentUser>,
    #[serde(default)]
    pub service: Option<PaymentService>,
    #[serde(default)]
    pub transaction_id: String,
    #[serde(default)]
    pub email: String,
    pub status: PaymentStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Dashboard headline numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_users: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_services: Option<u64>,
}
