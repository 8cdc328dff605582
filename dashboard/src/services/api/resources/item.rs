//! # Item Endpoints
//!
//! Line items priced under one service.

use shared::dto::envelope::{ListPage, MutationResponse};
use shared::dto::service::{Item, ItemInput};

use crate::core::error::ApiError;
use crate::services::api::args::Args;
use crate::services::api::endpoint::{BodyEncoding, Endpoint, Param, Tag};
use crate::services::api::query::QueryHandle;
use crate::services::api::registry::{Registry, Resource};
use crate::services::api::request::{HttpMethod, RequestBody};

pub const GROUP: &str = "item";

pub static ENDPOINTS: &[Endpoint] = &[
    Endpoint::query("viewAllItems", "/api-apps/ViewAllItems/")
        .with_params(&[Param::ServiceId])
        .provides(&[Tag::Items]),
    Endpoint::mutation("createItem", HttpMethod::Post, "/api-apps/CreateItem/", BodyEncoding::Json)
        .invalidates(&[Tag::Items]),
];

#[derive(Debug, Clone)]
pub struct ItemApi {
    resource: Resource,
}

impl ItemApi {
    pub fn register(registry: &Registry) -> Result<Self, ApiError> {
        Ok(Self {
            resource: registry.register_resource(GROUP, ENDPOINTS)?,
        })
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn items(&self, service_id: &str) -> Result<QueryHandle, ApiError> {
        self.resource.query("viewAllItems", &Args::new().service_id(service_id))
    }

    pub async fn fetch_items(&self, service_id: &str) -> Result<ListPage<Item>, ApiError> {
        self.resource
            .fetch_list("viewAllItems", &Args::new().service_id(service_id))
            .await
    }

    pub async fn create_item(&self, input: &ItemInput) -> Result<MutationResponse, ApiError> {
        lib_utils::validate_positive(input.price, "price").map_err(ApiError::invalid_argument)?;
        self.resource
            .mutation("createItem")?
            .trigger(&Args::new(), RequestBody::json(input)?)
            .await
    }
}
