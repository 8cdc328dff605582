//! # User Endpoints

use shared::dto::envelope::ListPage;
use shared::dto::user::User;

use crate::core::error::ApiError;
use crate::services::api::args::Args;
use crate::services::api::endpoint::{Endpoint, Param, Tag};
use crate::services::api::query::QueryHandle;
use crate::services::api::registry::{Registry, Resource};

pub const GROUP: &str = "user";

pub static ENDPOINTS: &[Endpoint] = &[
    Endpoint::query("getAllUsers", "/user/get-all-users")
        .with_params(&[Param::Page, Param::Limit])
        .provides(&[Tag::Users]),
    Endpoint::query("getUserById", "/api-auth/single_user/{id}").provides(&[Tag::Users]),
];

#[derive(Debug, Clone)]
pub struct UserApi {
    resource: Resource,
}

impl UserApi {
    pub fn register(registry: &Registry) -> Result<Self, ApiError> {
        Ok(Self {
            resource: registry.register_resource(GROUP, ENDPOINTS)?,
        })
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn users(&self, page: u32, limit: u32) -> Result<QueryHandle, ApiError> {
        self.resource.query("getAllUsers", &Args::new().page(page).limit(limit))
    }

    pub async fn fetch_users(&self, page: u32, limit: u32) -> Result<ListPage<User>, ApiError> {
        self.resource
            .fetch_list("getAllUsers", &Args::new().page(page).limit(limit))
            .await
    }

    pub fn user(&self, id: &str) -> Result<QueryHandle, ApiError> {
        self.resource.query("getUserById", &Args::id(id))
    }

    pub async fn fetch_user(&self, id: &str) -> Result<User, ApiError> {
        self.resource.fetch_data("getUserById", &Args::id(id)).await
    }
}
