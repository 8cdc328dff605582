//! # API Client
//!
//! reqwest-backed [`Transport`] for the dashboard backend.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::core::error::ApiError;
use crate::core::service::Transport;
use crate::services::session::AuthContext;
use super::envelope::parse_response;
use super::request::{ApiRequest, RequestBody};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the admin backend.
///
/// Holds one connection pool and the [`AuthContext`] consulted for the bearer
/// token on every request. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: AuthContext,
}

impl ApiClient {
    /// Create a client with the default 10 second timeout.
    pub fn new(base_url: impl Into<String>, auth: AuthContext) -> Self {
        Self::with_timeout(base_url, auth, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, auth: AuthContext, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            auth,
        }
    }

    pub fn from_config(config: &Config, auth: AuthContext) -> Self {
        Self::with_timeout(config.api_url.clone(), auth, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }
}

#[async_trait]
impl Transport for ApiClient {
    #[tracing::instrument(
        skip(self, request),
        fields(
            request_id = %uuid::Uuid::new_v4(),
            endpoint = request.endpoint,
            method = %request.method,
            path = %request.path,
        )
    )]
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let start = std::time::Instant::now();
        let url = request.url(&self.base_url)?;

        let mut builder = self.client.request(request.method.as_reqwest(), url);
        match self.auth.bearer().await {
            Some(bearer) => builder = builder.header(AUTHORIZATION, bearer),
            None => tracing::debug!("No access token, sending without Authorization header"),
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(body) => builder.multipart(body.into_form()?),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::error!(error = %e, "Request network error");
            ApiError::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, status, "Failed to read response body");
            ApiError::network(format!("Network error: {}", e)).with_status(status)
        })?;
        let duration = start.elapsed();

        match parse_response(status, &body) {
            Ok(value) => {
                tracing::debug!(status, duration_ms = duration.as_millis(), "Request succeeded");
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(
                    status,
                    duration_ms = duration.as_millis(),
                    kind = %e.kind,
                    error = %e.message,
                    "Request failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiErrorKind;
    use crate::services::api::args::Args;
    use crate::services::api::endpoint::{BodyEncoding, Endpoint, Param, Tag};
    use crate::services::api::request::{FilePart, HttpMethod, MultipartBody};
    use crate::services::session::{FileTokenStore, StaticToken};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    const CONTACTS: Endpoint = Endpoint::query("getAllContacts", "/contact/get-all-cleaning-contact")
        .with_params(&[Param::Page, Param::Limit, Param::Status])
        .provides(&[Tag::Contacts]);
    const CREATE_BLOG: Endpoint =
        Endpoint::mutation("createBlog", HttpMethod::Post, "/blog/create-blog", BodyEncoding::Multipart)
            .invalidates(&[Tag::Blogs]);
    const UPDATE_FAQ: Endpoint =
        Endpoint::mutation("updateFaq", HttpMethod::Patch, "/faq/update-faq/{id}", BodyEncoding::Json)
            .invalidates(&[Tag::Faqs]);

    fn ok_body() -> serde_json::Value {
        json!({ "success": true, "message": "ok", "data": { "result": [] } })
    }

    #[tokio::test]
    async fn test_bearer_token_read_on_every_call() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contact/get-all-cleaning-contact"))
            .and(header("authorization", "Bearer first"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/contact/get-all-cleaning-contact"))
            .and(header("authorization", "Bearer second"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;
        let token = Arc::new(StaticToken::new("first"));
        let client = ApiClient::new(server.uri(), AuthContext::new(token.clone()));
        let request = CONTACTS.build(&Args::new(), RequestBody::Empty).unwrap();

        // Act
        client.send(request.clone()).await.unwrap();
        token.set("second");
        client.send(request).await.unwrap();

        // Assert: expectations verified when the server drops
    }

    #[tokio::test]
    async fn test_bearer_token_from_file_store() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer stored"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));
        store.save("stored").await.unwrap();
        let client = ApiClient::new(server.uri(), AuthContext::new(store));

        let request = CONTACTS.build(&Args::new(), RequestBody::Empty).unwrap();
        client.send(request).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_token_omits_header() {
        let server = MockServer::start().await;
        Mock::given(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri(), AuthContext::anonymous());

        let request = CONTACTS.build(&Args::new(), RequestBody::Empty).unwrap();
        assert!(client.send(request).await.is_ok());
    }

    #[tokio::test]
    async fn test_query_string_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contact/get-all-cleaning-contact"))
            .and(query_param("page", "3"))
            .and(query_param("limit", "10"))
            .and(query_param("status", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri(), AuthContext::anonymous());

        let request = CONTACTS.build(&Args::new().page(3).limit(10), RequestBody::Empty).unwrap();
        client.send(request).await.unwrap();
    }

    #[tokio::test]
    async fn test_multipart_body_without_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/blog/create-blog"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true, "message": "Blog created" })))
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri(), AuthContext::anonymous());
        let body = MultipartBody::new(&json!({ "title": "A", "description": "B" })).unwrap();

        let request = CREATE_BLOG.build(&Args::new(), body.into()).unwrap();
        client.send(request).await.unwrap();

        let received: Vec<Request> = server.received_requests().await.unwrap();
        let content_type = received[0].headers.get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
        let text = String::from_utf8_lossy(&received[0].body);
        assert!(text.contains(r#"name="data""#));
        assert!(text.contains(r#"{"title":"A","description":"B"}"#));
        assert!(!text.contains(r#"name="image""#));
    }

    #[tokio::test]
    async fn test_multipart_body_with_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri(), AuthContext::anonymous());
        let body = MultipartBody::new(&json!({ "title": "A" }))
            .unwrap()
            .with_image(FilePart::new("kitchen.png", vec![0x89, 0x50, 0x4e, 0x47]));

        let request = CREATE_BLOG.build(&Args::new(), body.into()).unwrap();
        client.send(request).await.unwrap();

        let received = server.received_requests().await.unwrap();
        let text = String::from_utf8_lossy(&received[0].body);
        assert!(text.contains(r#"name="image"; filename="kitchen.png""#));
        assert!(text.contains("image/png"));
    }

    #[tokio::test]
    async fn test_json_body_and_id_path() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/faq/update-faq/f1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "Updated" })))
            .expect(1)
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri(), AuthContext::anonymous());

        let body = RequestBody::json(&json!({ "question": "Q", "answer": "A" })).unwrap();
        let request = UPDATE_FAQ.build(&Args::id("f1"), body).unwrap();
        let value = client.send(request).await.unwrap();

        assert_eq!(value["message"], "Updated");
        let received = server.received_requests().await.unwrap();
        let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(sent, json!({ "question": "Q", "answer": "A" }));
    }

    #[tokio::test]
    async fn test_error_normalization() {
        let server = MockServer::start().await;
        Mock::given(path("/blog/create-blog"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "success": false, "message": "jwt expired" })),
            )
            .mount(&server)
            .await;
        Mock::given(path("/contact/get-all-cleaning-contact"))
            .and(query_param("status", "broken"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;
        Mock::given(path("/contact/get-all-cleaning-contact"))
            .and(query_param("status", "rejected"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": "Not allowed" })),
            )
            .mount(&server)
            .await;
        let client = ApiClient::new(server.uri(), AuthContext::anonymous());

        let body = MultipartBody::new(&json!({ "title": "A" })).unwrap();
        let err = client
            .send(CREATE_BLOG.build(&Args::new(), body.into()).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Http);
        assert_eq!(err.status, Some(401));
        assert_eq!(err.message, "jwt expired");
        assert!(err.is_unauthorized());

        let err = client
            .send(CONTACTS.build(&Args::new().status("broken"), RequestBody::Empty).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Decode);
        assert_eq!(err.raw.as_deref(), Some("<html>oops</html>"));

        let err = client
            .send(CONTACTS.build(&Args::new().status("rejected"), RequestBody::Empty).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Rejected);
        assert_eq!(err.message, "Not allowed");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Nothing listens on port 9 of localhost in the test environment.
        let client = ApiClient::with_timeout("http://127.0.0.1:9", AuthContext::anonymous(), Duration::from_secs(2));

        let err = client
            .send(CONTACTS.build(&Args::new(), RequestBody::Empty).unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::Network);
        assert!(err.message.starts_with("Network error"));
        assert!(err.status.is_none());
    }
}
