//! # Data Transfer Objects (DTOs)
//!
//! Records and request bodies for every resource the dashboard manages.
//!
//! ## Module Organization
//!
//! - [`envelope`] - Response envelope, list pages, pagination meta, record ids
//! - [`auth`] - Login, password reset, one-time-code verification
//! - [`blog`] - Blog posts
//! - [`contact`] - Cleaning contact requests and their status workflow
//! - [`faq`] - Frequently asked questions
//! - [`service`] - Service categories and per-service items
//! - [`user`] - Registered customers
//! - [`payment`] - Payments and dashboard statistics
//! - [`notification`] - Admin notifications
//! - [`setting`] - Admin profile and static content pages
//!
//! ## Example JSON Communication
//!
//! ```text
//! PATCH /contact/cleaning-status/665f1c
//! Content-Type: application/json
//!
//! { "status": "Completed" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! { "success": true, "message": "Status updated", "data": { "_id": "665f1c", "status": "Completed" } }
//! ```

pub mod auth;
pub mod blog;
pub mod contact;
pub mod envelope;
pub mod faq;
pub mod notification;
pub mod payment;
pub mod service;
pub mod setting;
pub mod user;

pub use auth::*;
pub use blog::*;
pub use contact::*;
pub use envelope::*;
pub use faq::*;
pub use notification::*;
pub use payment::*;
pub use service::*;
pub use setting::*;
pub use user::*;
