//! # Endpoint Descriptors
//!
//! Static declaration of one REST operation. Resource modules keep their
//! descriptors in a `static ENDPOINTS: &[Endpoint]` table built with the
//! `const` builders below:
//!
//! ```rust
//! use dashboard::services::api::endpoint::{BodyEncoding, Endpoint, Param, Tag};
//! use dashboard::services::api::request::HttpMethod;
//!
//! static ENDPOINTS: &[Endpoint] = &[
//!     Endpoint::query("getAllContacts", "/contact/get-all-cleaning-contact")
//!         .with_params(&[Param::Page, Param::Limit, Param::Status])
//!         .provides(&[Tag::Contacts]),
//!     Endpoint::mutation("deleteContact", HttpMethod::Delete, "/contact/delete/{id}", BodyEncoding::None)
//!         .invalidates(&[Tag::Contacts]),
//! ];
//!
//! assert!(ENDPOINTS[1].needs_id());
//! ```

use serde::Serialize;
use std::fmt;

use crate::core::error::ApiError;
use super::args::{Args, CacheKey};
use super::request::{ApiRequest, HttpMethod, RequestBody};

/// Label attached to cached query results; mutations invalidate by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Tag {
    Blogs,
    Contacts,
    Faqs,
    Services,
    Items,
    Users,
    Payments,
    Statistics,
    Profile,
    Terms,
    Privacy,
    TrustSafety,
    Notifications,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndpointKind {
    /// Idempotent read, cached by arguments.
    Query,
    /// Write, never cached, invalidates tags on success.
    Mutation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BodyEncoding {
    None,
    Json,
    Multipart,
}

/// Query-string parameter an endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Param {
    Page,
    Limit,
    Status,
    Category,
    ServiceId,
}

impl Param {
    pub fn key(&self) -> &'static str {
        match self {
            Param::Page => "page",
            Param::Limit => "limit",
            Param::Status => "status",
            Param::Category => "category",
            Param::ServiceId => "service_id",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub kind: EndpointKind,
    pub method: HttpMethod,
    /// Path template; `{id}` is replaced by the id argument.
    pub path: &'static str,
    pub params: &'static [Param],
    pub body: BodyEncoding,
    pub provides: &'static [Tag],
    pub invalidates: &'static [Tag],
}

impl Endpoint {
    /// GET query with no parameters and no tags.
    pub const fn query(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            kind: EndpointKind::Query,
            method: HttpMethod::Get,
            path,
            params: &[],
            body: BodyEncoding::None,
            provides: &[],
            invalidates: &[],
        }
    }

    pub const fn mutation(
        name: &'static str,
        method: HttpMethod,
        path: &'static str,
        body: BodyEncoding,
    ) -> Self {
        Self {
            name,
            kind: EndpointKind::Mutation,
            method,
            path,
            params: &[],
            body,
            provides: &[],
            invalidates: &[],
        }
    }

    pub const fn with_params(self, params: &'static [Param]) -> Self {
        Self { params, ..self }
    }

    pub const fn provides(self, tags: &'static [Tag]) -> Self {
        Self { provides: tags, ..self }
    }

    pub const fn invalidates(self, tags: &'static [Tag]) -> Self {
        Self { invalidates: tags, ..self }
    }

    pub fn is_query(&self) -> bool {
        self.kind == EndpointKind::Query
    }

    pub fn needs_id(&self) -> bool {
        self.path.contains("{id}")
    }

    /// True when this query's result carries any of `tags`.
    pub fn provides_any(&self, tags: &[Tag]) -> bool {
        self.provides.iter().any(|t| tags.contains(t))
    }

    /// Cache key for a query invocation.
    pub fn cache_key(&self, args: &Args) -> Result<CacheKey, ApiError> {
        let resolved = args.resolve(self)?;
        Ok(CacheKey::new(self.name, &resolved))
    }

    /// Validate arguments and body, then build the request.
    ///
    /// Fails fast, without sending anything, when a required id is missing,
    /// a pagination argument is zero, or the body does not match the declared
    /// encoding.
    pub fn build(&self, args: &Args, body: RequestBody) -> Result<ApiRequest, ApiError> {
        let resolved = args.resolve(self)?;

        if body.encoding() != self.body {
            return Err(ApiError::invalid_argument(format!(
                "{} expects a {:?} body, got {:?}",
                self.name,
                self.body,
                body.encoding()
            )));
        }

        let path = match &resolved.id {
            Some(id) => self.path.replace("{id}", id),
            None => self.path.to_string(),
        };

        Ok(ApiRequest {
            endpoint: self.name,
            method: self.method,
            path,
            query: resolved
                .params
                .into_iter()
                .map(|(param, value)| (param.key(), value))
                .collect(),
            body,
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.method, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiErrorKind;
    use crate::services::api::request::MultipartBody;
    use serde_json::json;

    const CONTACTS: Endpoint = Endpoint::query("getAllContacts", "/contact/get-all-cleaning-contact")
        .with_params(&[Param::Page, Param::Limit, Param::Status])
        .provides(&[Tag::Contacts]);
    const UPDATE_BLOG: Endpoint =
        Endpoint::mutation("updateBlog", HttpMethod::Put, "/blog/update-blog/{id}", BodyEncoding::Multipart)
            .invalidates(&[Tag::Blogs]);

    #[test]
    fn test_page_defaults_to_one() {
        let request = CONTACTS.build(&Args::new(), RequestBody::Empty).unwrap();
        let url = request.url("http://localhost:5000").unwrap();
        assert_eq!(url.query(), Some("page=1&limit=10&status="));
    }

    #[test]
    fn test_page_and_limit_appear_once() {
        let request = CONTACTS
            .build(&Args::new().page(3).limit(10), RequestBody::Empty)
            .unwrap();
        let url = request.url("http://localhost:5000").unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("page=3&limit=10"));
        assert_eq!(query.matches("page=").count(), 1);
        assert_eq!(query.matches("limit=").count(), 1);
    }

    #[test]
    fn test_id_is_substituted() {
        let body = MultipartBody::new(&json!({ "title": "A" })).unwrap().into();
        let request = UPDATE_BLOG.build(&Args::id("66a1"), body).unwrap();
        assert_eq!(request.path, "/blog/update-blog/66a1");
        assert_eq!(request.method, HttpMethod::Put);
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_missing_id_fails_fast() {
        let body: RequestBody = MultipartBody::new(&json!({ "title": "A" })).unwrap().into();
        let err = UPDATE_BLOG.build(&Args::new(), body.clone()).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InvalidArgument);
        assert!(err.message.contains("updateBlog"));

        let err = UPDATE_BLOG.build(&Args::id("  "), body).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InvalidArgument);
    }

    #[test]
    fn test_json_body_refused_for_multipart_endpoint() {
        let body = RequestBody::json(&json!({ "title": "A" })).unwrap();
        let err = UPDATE_BLOG.build(&Args::id("66a1"), body).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InvalidArgument);
        assert!(err.message.contains("Multipart"));
    }

    #[test]
    fn test_provides_any() {
        assert!(CONTACTS.provides_any(&[Tag::Statistics, Tag::Contacts]));
        assert!(!CONTACTS.provides_any(&[Tag::Blogs]));
        assert!(!UPDATE_BLOG.provides_any(&[Tag::Blogs]));
    }
}
