//! # Shared Data Transfer Objects Library
//!
//! This library defines the wire contract between the admin dashboard and the
//! cleaning-services backend. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::envelope`]**: The `{ success, message, data }` response envelope and list normalization
//!   - **[`dto::auth`]**: Login and one-time-code verification
//!   - **[`dto::blog`]**, **[`dto::contact`]**, **[`dto::faq`]**, **[`dto::service`]**: Content records
//!   - **[`dto::user`]**, **[`dto::payment`]**, **[`dto::notification`]**, **[`dto::setting`]**: Admin records
//! - **[`utils`]**: Pagination math and text helpers shared by every list screen
//!
//! ## Wire Format
//!
//! The backend speaks camelCase JSON with Mongo-style `_id` keys. Records
//! accept both `_id` and `id`, and numeric ids are read as strings so callers
//! never branch on the backend's id type.
//!
//! ```rust
//! use shared::dto::envelope::{Envelope, ListData, ListPage};
//! use shared::dto::faq::Faq;
//!
//! let body = r#"{
//!     "success": true,
//!     "message": "FAQs retrieved",
//!     "data": { "result": [{ "_id": "f1", "question": "Q", "answer": "A" }], "meta": { "page": 1, "total": 1 } }
//! }"#;
//!
//! let envelope: Envelope<ListData<Faq>> = serde_json::from_str(body).unwrap();
//! let page = ListPage::from(envelope.data.unwrap());
//! assert_eq!(page.items[0].question, "Q");
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
