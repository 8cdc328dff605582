//! Response envelope and list normalization.
//!
//! Every backend response is wrapped as `{ success, message, data }`. List
//! endpoints nest their records under `data.result`, which is either an array
//! or a map keyed by category name, plus optional `data.meta` pagination
//! totals. [`ListPage`] flattens both shapes into one ordered list.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::utils::total_pages;

/// The `{ success, message, data }` wrapper used by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}

/// Envelope returned by mutations, whose payload the dashboard rarely reads.
pub type MutationResponse = Envelope<serde_json::Value>;

/// Identifier of a backend record.
///
/// Mongo-backed endpoints send string ids, Django-backed ones send integers;
/// both deserialize into the same string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => RecordId(text),
            Raw::Number(number) => RecordId(number.to_string()),
        })
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId(value)
    }
}

/// Pagination totals attached to list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: u64,
    #[serde(default, alias = "totalPages")]
    pub total_page: Option<u32>,
}

fn first_page() -> u32 {
    1
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
            total: 0,
            total_page: None,
        }
    }
}

/// Raw `data.result` as the backend sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResult<T> {
    Flat(Vec<T>),
    Grouped(BTreeMap<String, Vec<T>>),
}

/// Raw `data` of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListData<T> {
    pub result: ListResult<T>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

/// Normalized list response: always an ordered list of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub meta: Meta,
}

impl<T> From<ListData<T>> for ListPage<T> {
    fn from(data: ListData<T>) -> Self {
        let items: Vec<T> = match data.result {
            ListResult::Flat(items) => items,
            // Category-keyed maps are flattened in key order.
            ListResult::Grouped(groups) => groups.into_values().flatten().collect(),
        };
        let meta = data.meta.unwrap_or_else(|| Meta {
            total: items.len() as u64,
            ..Meta::default()
        });
        Self { items, meta }
    }
}

impl<T> ListPage<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of pages, preferring the backend's own count when it sends one.
    pub fn total_pages(&self) -> u32 {
        if let Some(pages) = self.meta.total_page {
            return pages;
        }
        let per_page = self
            .meta
            .limit
            .unwrap_or_else(|| u32::try_from(self.items.len()).unwrap_or(u32::MAX));
        total_pages(self.meta.total, per_page)
    }

    /// Group records client-side, e.g. services by category.
    pub fn group_by<K, F>(&self, key: F) -> BTreeMap<K, Vec<&T>>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        let mut groups: BTreeMap<K, Vec<&T>> = BTreeMap::new();
        for item in &self.items {
            groups.entry(key(item)).or_default().push(item);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        #[serde(rename = "_id")]
        id: RecordId,
        category: String,
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: Envelope<Row> = serde_json::from_value(json!({
            "success": true,
            "message": "Contact deleted successfully."
        }))
        .unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.data, None);
    }

    #[test]
    fn test_flat_result_keeps_meta() {
        let data: ListData<Row> = serde_json::from_value(json!({
            "result": [{ "_id": "a", "category": "Carpet" }, { "_id": "b", "category": "Office" }],
            "meta": { "page": 2, "limit": 2, "total": 7 }
        }))
        .unwrap();

        let page = ListPage::from(data);
        assert_eq!(page.len(), 2);
        assert_eq!(page.meta.page, 2);
        assert_eq!(page.total_pages(), 4);
    }

    #[test]
    fn test_grouped_result_is_flattened_in_key_order() {
        let data: ListData<Row> = serde_json::from_value(json!({
            "result": {
                "Residential Cleaning Services": [{ "_id": "r1", "category": "Residential Cleaning Services" }],
                "Carpet Cleaning Service": [
                    { "_id": "c1", "category": "Carpet Cleaning Service" },
                    { "_id": "c2", "category": "Carpet Cleaning Service" }
                ]
            }
        }))
        .unwrap();

        let page = ListPage::from(data);
        let ids: Vec<&str> = page.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "r1"]);
        assert_eq!(page.meta.total, 3);
        assert_eq!(page.meta.page, 1);

        let groups = page.group_by(|r| r.category.clone());
        assert_eq!(groups["Carpet Cleaning Service"].len(), 2);
    }

    #[test]
    fn test_numeric_ids_read_as_strings() {
        let row: Row = serde_json::from_value(json!({ "_id": 447, "category": "x" })).unwrap();
        assert_eq!(row.id, RecordId::from("447"));
    }

    #[test]
    fn test_envelope_defaults() {
        let envelope: MutationResponse =
            serde_json::from_value(json!({ "message": "Contact deleted successfully." })).unwrap();
        assert!(envelope.success);
        assert!(envelope.data.is_none());
    }
}
