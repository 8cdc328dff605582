//! # Authentication Endpoints
//!
//! Login, password reset and one-time-code verification. None of these are
//! cached and none invalidate anything.

use shared::dto::auth::{EmailRequest, LoginData, LoginRequest, VerifyOtpRequest};
use shared::dto::envelope::MutationResponse;

use crate::core::error::ApiError;
use crate::services::api::args::Args;
use crate::services::api::endpoint::{BodyEncoding, Endpoint};
use crate::services::api::registry::{Registry, Resource};
use crate::services::api::request::{HttpMethod, RequestBody};

pub const GROUP: &str = "auth";

pub static ENDPOINTS: &[Endpoint] = &[
    Endpoint::mutation("login", HttpMethod::Post, "/auth/login", BodyEncoding::Json),
    Endpoint::mutation("forgotPassword", HttpMethod::Post, "/auth/forgot-password", BodyEncoding::Json),
    Endpoint::mutation("sendOtp", HttpMethod::Post, "/api-auth/resend_code/", BodyEncoding::Json),
    Endpoint::mutation("resendOtp", HttpMethod::Post, "/auth/resend-otp", BodyEncoding::Json),
    Endpoint::mutation("verifyOtp", HttpMethod::Post, "/auth/verify-email", BodyEncoding::Json),
];

#[derive(Debug, Clone)]
pub struct AuthApi {
    resource: Resource,
}

impl AuthApi {
    pub fn register(registry: &Registry) -> Result<Self, ApiError> {
        Ok(Self {
            resource: registry.register_resource(GROUP, ENDPOINTS)?,
        })
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Exchange credentials for an access token.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginData, ApiError> {
        let body = RequestBody::json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        self.resource
            .mutation("login")?
            .trigger_typed::<LoginData>(&Args::new(), body)
            .await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<MutationResponse, ApiError> {
        self.send_email("forgotPassword", email).await
    }

    pub async fn send_otp(&self, email: &str) -> Result<MutationResponse, ApiError> {
        self.send_email("sendOtp", email).await
    }

    pub async fn resend_otp(&self, email: &str) -> Result<MutationResponse, ApiError> {
        self.send_email("resendOtp", email).await
    }

    /// Verify the six-digit code sent by email. A malformed code is rejected
    /// without a request.
    pub async fn verify_otp(&self, email: &str, code: &str) -> Result<MutationResponse, ApiError> {
        let code = code.trim();
        lib_utils::validate_one_time_code(code).map_err(ApiError::invalid_argument)?;
        let one_time_code = code
            .parse()
            .map_err(|_| ApiError::invalid_argument(format!("Invalid one-time code: {code}")))?;

        let body = RequestBody::json(&VerifyOtpRequest {
            email: email.to_string(),
            one_time_code,
        })?;
        self.resource.mutation("verifyOtp")?.trigger(&Args::new(), body).await
    }

    async fn send_email(&self, name: &str, email: &str) -> Result<MutationResponse, ApiError> {
        let body = RequestBody::json(&EmailRequest {
            email: email.to_string(),
        })?;
        self.resource.mutation(name)?.trigger(&Args::new(), body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiErrorKind;
    use crate::services::api::cache::QueryCache;
    use crate::services::api::testing::MockTransport;
    use serde_json::json;

    fn api(transport: std::sync::Arc<MockTransport>) -> AuthApi {
        AuthApi::register(&Registry::new(QueryCache::new(transport))).unwrap()
    }

    #[tokio::test]
    async fn test_login_returns_tokens() {
        let transport = MockTransport::new(|_| {
            Ok(json!({
                "success": true,
                "message": "User login successfully",
                "data": { "accessToken": "jwt-abc", "refreshToken": "refresh-abc" }
            }))
        });
        let auth = api(transport.clone());

        let data = auth.login("admin@sparkle.test", "hunter22").await.unwrap();

        assert_eq!(data.access_token, "jwt-abc");
        let calls = transport.calls();
        assert_eq!(calls[0].path, "/auth/login");
        assert_eq!(
            calls[0].body.as_json(),
            Some(&json!({ "email": "admin@sparkle.test", "password": "hunter22" }))
        );
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let transport = MockTransport::new(|_| {
            Err(ApiError::http(401, "Password is incorrect!", Some(r#"{"success":false}"#.to_string())))
        });
        let err = api(transport).login("admin@sparkle.test", "nope").await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(err.message, "Password is incorrect!");
    }

    #[tokio::test]
    async fn test_verify_otp_sends_numeric_code() {
        let transport = MockTransport::new(|_| Ok(json!({ "success": true, "message": "Email verified" })));
        let auth = api(transport.clone());

        auth.verify_otp("admin@sparkle.test", " 123456 ").await.unwrap();

        let calls = transport.calls();
        assert_eq!(
            calls[0].body.as_json(),
            Some(&json!({ "email": "admin@sparkle.test", "oneTimeCode": 123456 }))
        );
    }

    #[tokio::test]
    async fn test_malformed_code_sends_nothing() {
        let transport = MockTransport::new(|_| Ok(json!({ "success": true })));
        let auth = api(transport.clone());

        let err = auth.verify_otp("admin@sparkle.test", "12ab").await.unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::InvalidArgument);
        assert!(transport.calls().is_empty());
    }
}
