//! # Cleaning-Services Admin Dashboard - Library Root
//!
//! Client-side data layer of the admin dashboard for a cleaning-services
//! business: blog posts, services and their items, contact requests, FAQs,
//! users, payments and statistics, notifications, the admin profile and the
//! static content pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              dashboard (this crate)                    │
//! ├────────────────────────────────────────────────────────┤
//! │  resources::*   - typed accessors per resource group   │
//! │  Registry       - endpoint tables -> Resource          │
//! │  QueryCache     - coalescing, tags, live state         │
//! │  ApiClient      - reqwest transport, bearer auth       │
//! └────────────────────────────────────────────────────────┘
//!          │
//!          │ HTTP/JSON  { success, message, data }
//!          ▼
//! ┌─────────────────┐
//! │  Admin backend  │
//! └─────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **config**: API/image base URLs, token file, timeout
//! - **core**: [`ApiError`](core::ApiError), [`AppError`], the `Transport`
//!   and `TokenSource` seams
//! - **debug**: tracing subscriber setup
//! - **services**: the API binding layer and session storage
//! - **utils**: pagination math and image links
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dashboard::services::api::{Api, ApiClient};
//! use dashboard::services::api::resources::ContactFilter;
//! use dashboard::services::session::{AuthContext, StaticToken};
//!
//! # async fn run() -> Result<(), dashboard::core::ApiError> {
//! let client = ApiClient::new("http://localhost:5000", AuthContext::new(StaticToken::new("jwt")));
//! let api = Api::new(Arc::new(client))?;
//!
//! let mut contacts = api.contact.contacts(&ContactFilter::default().page(2))?;
//! contacts.settled().await;
//!
//! // Refetches every observed contact list before returning.
//! api.contact.delete_contact("665f1c").await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod utils;

pub use core::{AppError, Result};
