use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::envelope::RecordId;

/// Cleaning service offered under a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub service_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub price: f64,
    /// Add-on name to price.
    #[serde(default)]
    pub additional_services: BTreeMap<String, f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The `data` part of a service create/update multipart body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    pub service_name: String,
    pub category: String,
    pub details: String,
    pub price: f64,
    #[serde(default)]
    pub additional_services: BTreeMap<String, f64>,
}

/// Line item priced under a service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    #[serde(rename = "id", alias = "_id")]
    pub id: RecordId,
    #[serde(default, alias = "item_name")]
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, alias = "service_id")]
    pub service: Option<RecordId>,
}

/// New item under a service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemInput {
    pub service: RecordId,
    pub name: String,
    pub price: f64,
}
