//! # Utility Functions
//!
//! ## Modules
//!
//! - **[`url`]**: Absolute links for image paths returned by the backend
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Pagination math shared with the DTO crate
//! - [`lib_utils::validation`]: Form input checks callers run before a mutation

pub mod url;

pub use shared::utils::{page_window, total_pages, truncate_text};
pub use url::image_url;
