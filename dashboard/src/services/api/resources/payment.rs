//! # Payment Endpoints
//!
//! Payment history and the dashboard statistics cards. Statistics are
//! refreshed whenever a contact changes status or is deleted.

use shared::dto::envelope::ListPage;
use shared::dto::payment::{Payment, Statistics};

use crate::core::error::ApiError;
use crate::services::api::args::Args;
use crate::services::api::endpoint::{Endpoint, Param, Tag};
use crate::services::api::query::QueryHandle;
use crate::services::api::registry::{Registry, Resource};

pub const GROUP: &str = "payment";

pub static ENDPOINTS: &[Endpoint] = &[
    Endpoint::query("getPayment", "/payment/get-all-payment")
        .with_params(&[Param::Page, Param::Limit])
        .provides(&[Tag::Payments]),
    Endpoint::query("getStatics", "/dashboard/get-statics").provides(&[Tag::Statistics]),
];

#[derive(Debug, Clone)]
pub struct PaymentApi {
    resource: Resource,
}

impl PaymentApi {
    pub fn register(registry: &Registry) -> Result<Self, ApiError> {
        Ok(Self {
            resource: registry.register_resource(GROUP, ENDPOINTS)?,
        })
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn payments(&self, page: u32, limit: u32) -> Result<QueryHandle, ApiError> {
        self.resource.query("getPayment", &Args::new().page(page).limit(limit))
    }

    pub async fn fetch_payments(&self, page: u32, limit: u32) -> Result<ListPage<Payment>, ApiError> {
        self.resource
            .fetch_list("getPayment", &Args::new().page(page).limit(limit))
            .await
    }

    pub fn statistics(&self) -> Result<QueryHandle, ApiError> {
        self.resource.query("getStatics", &Args::new())
    }

    pub async fn fetch_statistics(&self) -> Result<Statistics, ApiError> {
        self.resource.fetch_data("getStatics", &Args::new()).await
    }
}
