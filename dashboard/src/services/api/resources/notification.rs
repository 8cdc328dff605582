//! # Notification Endpoints

use shared::dto::envelope::{ListPage, MutationResponse};
use shared::dto::notification::{Notification, NotificationInput};

use crate::core::error::ApiError;
use crate::services::api::args::Args;
use crate::services::api::endpoint::{BodyEncoding, Endpoint, Tag};
use crate::services::api::query::QueryHandle;
use crate::services::api::registry::{Registry, Resource};
use crate::services::api::request::{HttpMethod, RequestBody};

pub const GROUP: &str = "notification";

pub static ENDPOINTS: &[Endpoint] = &[
    Endpoint::query("getNotifications", "/api-apps/ViewAllNotification/").provides(&[Tag::Notifications]),
    Endpoint::mutation("createNotification", HttpMethod::Post, "/api-apps/AddNotification/", BodyEncoding::Json)
        .invalidates(&[Tag::Notifications]),
];

#[derive(Debug, Clone)]
pub struct NotificationApi {
    resource: Resource,
}

impl NotificationApi {
    pub fn register(registry: &Registry) -> Result<Self, ApiError> {
        Ok(Self {
            resource: registry.register_resource(GROUP, ENDPOINTS)?,
        })
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn notifications(&self) -> Result<QueryHandle, ApiError> {
        self.resource.query("getNotifications", &Args::new())
    }

    pub async fn fetch_notifications(&self) -> Result<ListPage<Notification>, ApiError> {
        self.resource.fetch_list("getNotifications", &Args::new()).await
    }

    pub async fn create_notification(&self, input: &NotificationInput) -> Result<MutationResponse, ApiError> {
        lib_utils::validate_not_empty(&input.title, "title").map_err(ApiError::invalid_argument)?;
        self.resource
            .mutation("createNotification")?
            .trigger(&Args::new(), RequestBody::json(input)?)
            .await
    }
}
