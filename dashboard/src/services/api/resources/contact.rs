//! # Contact Endpoints
//!
//! Cleaning contact requests, listed page by page and filtered by workflow
//! status. Status changes and deletions also refresh the dashboard
//! statistics.

use shared::dto::contact::{Contact, ContactInput, ContactStatus, ContactStatusUpdate};
use shared::dto::envelope::{ListPage, MutationResponse};

use crate::core::error::ApiError;
use crate::services::api::args::Args;
use crate::services::api::endpoint::{BodyEncoding, Endpoint, Param, Tag};
use crate::services::api::query::QueryHandle;
use crate::services::api::registry::{Registry, Resource};
use crate::services::api::request::{HttpMethod, RequestBody};

pub const GROUP: &str = "contact";

pub static ENDPOINTS: &[Endpoint] = &[
    Endpoint::query("getAllContacts", "/contact/get-all-cleaning-contact")
        .with_params(&[Param::Page, Param::Limit, Param::Status])
        .provides(&[Tag::Contacts]),
    Endpoint::mutation("createContact", HttpMethod::Post, "/api-apps/CreateContact/", BodyEncoding::Json)
        .invalidates(&[Tag::Contacts]),
    Endpoint::mutation("updateContactStatus", HttpMethod::Patch, "/contact/cleaning-status/{id}", BodyEncoding::Json)
        .invalidates(&[Tag::Contacts, Tag::Statistics]),
    Endpoint::mutation("deleteContact", HttpMethod::Delete, "/contact/delete/{id}", BodyEncoding::None)
        .invalidates(&[Tag::Contacts, Tag::Statistics]),
];

/// Page and status filter of the contact list. `None` fields take the list
/// defaults (page 1, 10 per page, every status).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<ContactStatus>,
}

impl ContactFilter {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn status(mut self, status: ContactStatus) -> Self {
        self.status = Some(status);
        self
    }

    fn args(&self) -> Args {
        Args {
            page: self.page,
            limit: self.limit,
            status: self.status.map(|s| s.as_str().to_string()),
            ..Args::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactApi {
    resource: Resource,
}

impl ContactApi {
    pub fn register(registry: &Registry) -> Result<Self, ApiError> {
        Ok(Self {
            resource: registry.register_resource(GROUP, ENDPOINTS)?,
        })
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn contacts(&self, filter: &ContactFilter) -> Result<QueryHandle, ApiError> {
        self.resource.query("getAllContacts", &filter.args())
    }

    pub async fn fetch_contacts(&self, filter: &ContactFilter) -> Result<ListPage<Contact>, ApiError> {
        self.resource.fetch_list("getAllContacts", &filter.args()).await
    }

    pub async fn create_contact(&self, input: &ContactInput) -> Result<MutationResponse, ApiError> {
        self.resource
            .mutation("createContact")?
            .trigger(&Args::new(), RequestBody::json(input)?)
            .await
    }

    pub async fn update_status(&self, id: &str, status: ContactStatus) -> Result<MutationResponse, ApiError> {
        let body = RequestBody::json(&ContactStatusUpdate { status })?;
        self.resource
            .mutation("updateContactStatus")?
            .trigger(&Args::id(id), body)
            .await
    }

    pub async fn delete_contact(&self, id: &str) -> Result<MutationResponse, ApiError> {
        self.resource
            .mutation("deleteContact")?
            .trigger(&Args::id(id), RequestBody::Empty)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiErrorKind;
    use crate::services::api::cache::{QueryCache, QueryStatus};
    use crate::services::api::testing::MockTransport;
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn contact(id: &str, status: &str) -> Value {
        json!({
            "_id": id,
            "name": "Jane Cooper",
            "email": "jane@example.com",
            "message": "Deep clean, two bedrooms",
            "category": "Residential",
            "status": status
        })
    }

    /// Backend double keeping a contact table the mutations act on.
    fn backend(rows: Vec<Value>) -> (Arc<MockTransport>, Arc<Mutex<Vec<Value>>>) {
        let table = Arc::new(Mutex::new(rows));
        let store = table.clone();
        let transport = MockTransport::new(move |request| {
            let mut rows = store.lock();
            match request.endpoint {
                "deleteContact" => {
                    let id = request.path.rsplit('/').next().unwrap_or_default().to_string();
                    rows.retain(|row| row["_id"] != json!(id));
                    Ok(json!({ "success": true, "message": "Contact deleted successfully." }))
                }
                "updateContactStatus" => Ok(json!({ "success": true, "message": "Status updated" })),
                _ => Ok(json!({
                    "success": true,
                    "message": "Contacts retrieved",
                    "data": { "result": rows.clone(), "meta": { "page": 1, "limit": 10, "total": rows.len() } }
                })),
            }
        });
        (transport, table)
    }

    fn api(transport: Arc<MockTransport>) -> ContactApi {
        ContactApi::register(&Registry::new(QueryCache::new(transport))).unwrap()
    }

    #[tokio::test]
    async fn test_delete_contact_refetches_subscribed_list() {
        let (transport, _) = backend(vec![contact("abc123", "Pending"), contact("def456", "Completed")]);
        let contacts = api(transport.clone());
        let mut list = contacts.contacts(&ContactFilter::default()).unwrap();
        list.settled().await;
        assert_eq!(list.decode_list::<Contact>().unwrap().unwrap().len(), 2);

        let response = contacts.delete_contact("abc123").await.unwrap();

        assert!(response.success);
        assert_eq!(response.message, "Contact deleted successfully.");
        let state = list.settled().await;
        assert_eq!(state.status, QueryStatus::Success);
        let page = list.decode_list::<Contact>().unwrap().unwrap();
        assert!(page.items.iter().all(|c| c.id.as_str() != "abc123"));
        assert_eq!(page.meta.total, 1);
        assert_eq!(transport.call_count("getAllContacts"), 2);
    }

    #[tokio::test]
    async fn test_filter_defaults_and_status() {
        let (transport, _) = backend(vec![contact("abc123", "In Progress")]);
        let contacts = api(transport.clone());

        contacts.fetch_contacts(&ContactFilter::default()).await.unwrap();
        let filter = ContactFilter::default().page(3).status(ContactStatus::InProgress);
        let page = contacts.fetch_contacts(&filter).await.unwrap();

        assert_eq!(page.items[0].status, ContactStatus::InProgress);
        let calls = transport.calls();
        assert_eq!(
            calls[0].query,
            vec![("page", "1".to_string()), ("limit", "10".to_string()), ("status", String::new())]
        );
        assert_eq!(
            calls[1].query,
            vec![("page", "3".to_string()), ("limit", "10".to_string()), ("status", "In Progress".to_string())]
        );
    }

    #[tokio::test]
    async fn test_status_update_sends_wire_name() {
        let (transport, _) = backend(vec![]);
        let contacts = api(transport.clone());

        contacts.update_status("abc123", ContactStatus::Completed).await.unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.path, "/contact/cleaning-status/abc123");
        assert_eq!(call.body.as_json(), Some(&json!({ "status": "Completed" })));
    }

    #[tokio::test]
    async fn test_delete_without_id_fails_fast() {
        let (transport, table) = backend(vec![contact("abc123", "Pending")]);

        let err = api(transport.clone()).delete_contact("").await.unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::InvalidArgument);
        assert!(err.message.contains("deleteContact"));
        assert!(transport.calls().is_empty());
        assert_eq!(table.lock().len(), 1);
    }
}
