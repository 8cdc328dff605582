//! # Resource Groups
//!
//! One module per backend resource. Each holds a static `ENDPOINTS` table and
//! a typed wrapper over the [`Resource`](super::registry::Resource) the table
//! registers into.
//!
//! ```text
//! resources/
//! ├── auth.rs          - login, password reset, one-time codes
//! ├── blog.rs          - blog posts (multipart)
//! ├── contact.rs       - cleaning contact requests
//! ├── faq.rs           - FAQ entries
//! ├── service.rs       - service categories (multipart)
//! ├── item.rs          - items priced under a service
//! ├── user.rs          - registered customers
//! ├── payment.rs       - payments and dashboard statistics
//! ├── setting.rs       - admin profile and content pages
//! └── notification.rs  - admin notifications
//! ```

pub mod auth;
pub mod blog;
pub mod contact;
pub mod faq;
pub mod item;
pub mod notification;
pub mod payment;
pub mod service;
pub mod setting;
pub mod user;

pub use auth::AuthApi;
pub use blog::BlogApi;
pub use contact::{ContactApi, ContactFilter};
pub use faq::FaqApi;
pub use item::ItemApi;
pub use notification::NotificationApi;
pub use payment::PaymentApi;
pub use service::ServiceApi;
pub use setting::SettingApi;
pub use user::UserApi;

use std::sync::Arc;

use crate::core::error::ApiError;
use crate::core::service::Transport;
use super::cache::QueryCache;
use super::registry::Registry;

/// Every resource group registered against one cache.
#[derive(Debug, Clone)]
pub struct Api {
    cache: QueryCache,
    pub auth: AuthApi,
    pub blog: BlogApi,
    pub contact: ContactApi,
    pub faq: FaqApi,
    pub service: ServiceApi,
    pub item: ItemApi,
    pub user: UserApi,
    pub payment: PaymentApi,
    pub setting: SettingApi,
    pub notification: NotificationApi,
}

impl Api {
    pub fn new(transport: Arc<dyn Transport>) -> Result<Self, ApiError> {
        Self::with_cache(QueryCache::new(transport))
    }

    pub fn with_cache(cache: QueryCache) -> Result<Self, ApiError> {
        let registry = Registry::new(cache.clone());
        Ok(Self {
            auth: AuthApi::register(&registry)?,
            blog: BlogApi::register(&registry)?,
            contact: ContactApi::register(&registry)?,
            faq: FaqApi::register(&registry)?,
            service: ServiceApi::register(&registry)?,
            item: ItemApi::register(&registry)?,
            user: UserApi::register(&registry)?,
            payment: PaymentApi::register(&registry)?,
            setting: SettingApi::register(&registry)?,
            notification: NotificationApi::register(&registry)?,
            cache,
        })
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }
}
