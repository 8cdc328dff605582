//! # FAQ Endpoints

use shared::dto::envelope::{ListPage, MutationResponse};
use shared::dto::faq::{Faq, FaqInput};

use crate::core::error::ApiError;
use crate::services::api::args::Args;
use crate::services::api::endpoint::{BodyEncoding, Endpoint, Tag};
use crate::services::api::query::QueryHandle;
use crate::services::api::registry::{Registry, Resource};
use crate::services::api::request::{HttpMethod, RequestBody};

pub const GROUP: &str = "faq";

pub static ENDPOINTS: &[Endpoint] = &[
    Endpoint::query("getFaq", "/faq/get-all-faq").provides(&[Tag::Faqs]),
    Endpoint::mutation("createFaq", HttpMethod::Post, "/faq/create-faq", BodyEncoding::Json)
        .invalidates(&[Tag::Faqs]),
    Endpoint::mutation("updateFaq", HttpMethod::Patch, "/faq/update-faq/{id}", BodyEncoding::Json)
        .invalidates(&[Tag::Faqs]),
    Endpoint::mutation("deleteFaq", HttpMethod::Delete, "/faq/delete-faq/{id}", BodyEncoding::None)
        .invalidates(&[Tag::Faqs]),
];

#[derive(Debug, Clone)]
pub struct FaqApi {
    resource: Resource,
}

impl FaqApi {
    pub fn register(registry: &Registry) -> Result<Self, ApiError> {
        Ok(Self {
            resource: registry.register_resource(GROUP, ENDPOINTS)?,
        })
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn faqs(&self) -> Result<QueryHandle, ApiError> {
        self.resource.query("getFaq", &Args::new())
    }

    pub async fn fetch_faqs(&self) -> Result<ListPage<Faq>, ApiError> {
        self.resource.fetch_list("getFaq", &Args::new()).await
    }

    pub async fn create_faq(&self, input: &FaqInput) -> Result<MutationResponse, ApiError> {
        self.resource
            .mutation("createFaq")?
            .trigger(&Args::new(), RequestBody::json(input)?)
            .await
    }

    pub async fn update_faq(&self, id: &str, input: &FaqInput) -> Result<MutationResponse, ApiError> {
        self.resource
            .mutation("updateFaq")?
            .trigger(&Args::id(id), RequestBody::json(input)?)
            .await
    }

    pub async fn delete_faq(&self, id: &str) -> Result<MutationResponse, ApiError> {
        self.resource
            .mutation("deleteFaq")?
            .trigger(&Args::id(id), RequestBody::Empty)
            .await
    }
}
