//! # Service Endpoints
//!
//! Service categories, listed all at once or filtered by category. The
//! backend may group the list by category; [`ListPage`] flattens it.
//! Service writes also invalidate items, which are priced per service.

use shared::dto::envelope::{ListPage, MutationResponse};
use shared::dto::service::{Service, ServiceInput};

use crate::core::error::ApiError;
use crate::services::api::args::Args;
use crate::services::api::endpoint::{BodyEncoding, Endpoint, Param, Tag};
use crate::services::api::query::QueryHandle;
use crate::services::api::registry::{Registry, Resource};
use crate::services::api::request::{FilePart, HttpMethod, MultipartBody, RequestBody};

pub const GROUP: &str = "service";

pub static ENDPOINTS: &[Endpoint] = &[
    Endpoint::query("getAllServices", "/service/get-all-service")
        .with_params(&[Param::Category])
        .provides(&[Tag::Services]),
    Endpoint::query("getServiceById", "/service/get-details/{id}").provides(&[Tag::Services]),
    Endpoint::mutation("createService", HttpMethod::Post, "/service/create-service", BodyEncoding::Multipart)
        .invalidates(&[Tag::Services, Tag::Items]),
    Endpoint::mutation("updateService", HttpMethod::Patch, "/service/update-service/{id}", BodyEncoding::Multipart)
        .invalidates(&[Tag::Services, Tag::Items]),
    Endpoint::mutation("deleteService", HttpMethod::Delete, "/service/delete-service/{id}", BodyEncoding::None)
        .invalidates(&[Tag::Services, Tag::Items]),
];

#[derive(Debug, Clone)]
pub struct ServiceApi {
    resource: Resource,
}

impl ServiceApi {
    pub fn register(registry: &Registry) -> Result<Self, ApiError> {
        Ok(Self {
            resource: registry.register_resource(GROUP, ENDPOINTS)?,
        })
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Services in `category`, or every service when `None`.
    pub fn services(&self, category: Option<&str>) -> Result<QueryHandle, ApiError> {
        self.resource.query("getAllServices", &category_args(category))
    }

    pub async fn fetch_services(&self, category: Option<&str>) -> Result<ListPage<Service>, ApiError> {
        self.resource.fetch_list("getAllServices", &category_args(category)).await
    }

    pub fn service(&self, id: &str) -> Result<QueryHandle, ApiError> {
        self.resource.query("getServiceById", &Args::id(id))
    }

    pub async fn fetch_service(&self, id: &str) -> Result<Service, ApiError> {
        self.resource.fetch_data("getServiceById", &Args::id(id)).await
    }

    pub async fn create_service(
        &self,
        input: &ServiceInput,
        image: Option<FilePart>,
    ) -> Result<MutationResponse, ApiError> {
        let body = MultipartBody::new(input)?.with_optional_image(image);
        self.resource
            .mutation("createService")?
            .trigger(&Args::new(), RequestBody::from(body))
            .await
    }

    pub async fn update_service(
        &self,
        id: &str,
        input: &ServiceInput,
        image: Option<FilePart>,
    ) -> Result<MutationResponse, ApiError> {
        let body = MultipartBody::new(input)?.with_optional_image(image);
        self.resource
            .mutation("updateService")?
            .trigger(&Args::id(id), RequestBody::from(body))
            .await
    }

    pub async fn delete_service(&self, id: &str) -> Result<MutationResponse, ApiError> {
        self.resource
            .mutation("deleteService")?
            .trigger(&Args::id(id), RequestBody::Empty)
            .await
    }
}

fn category_args(category: Option<&str>) -> Args {
    match category {
        Some(category) => Args::new().category(category),
        None => Args::new(),
    }
}
