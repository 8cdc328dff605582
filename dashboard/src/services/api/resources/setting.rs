//! # Setting Endpoints
//!
//! The administrator's own profile, password change, and the three static
//! content pages shown in the settings screen. Each content page is a single
//! record that the backend may return wrapped in a one-element array.

use serde::Serialize;
use std::fmt;

use shared::dto::auth::ChangePasswordRequest;
use shared::dto::envelope::MutationResponse;
use shared::dto::setting::{ContentInput, ContentPage, Profile, ProfileUpdate};

use crate::core::error::ApiError;
use crate::services::api::args::Args;
use crate::services::api::endpoint::{BodyEncoding, Endpoint, Tag};
use crate::services::api::envelope::decode_first;
use crate::services::api::query::QueryHandle;
use crate::services::api::registry::{Registry, Resource};
use crate::services::api::request::{HttpMethod, RequestBody};

pub const GROUP: &str = "setting";

pub static ENDPOINTS: &[Endpoint] = &[
    Endpoint::query("getProfile", "/api-auth/user_profile/").provides(&[Tag::Profile]),
    Endpoint::mutation("updateProfile", HttpMethod::Patch, "/api-auth/update_profile/", BodyEncoding::Json)
        .invalidates(&[Tag::Profile]),
    Endpoint::mutation("updatePassword", HttpMethod::Post, "/api-auth/change_password/", BodyEncoding::Json),
    Endpoint::query("getTermsAndConditions", "/dicipline/terms-conditions/").provides(&[Tag::Terms]),
    Endpoint::mutation("setTermsAndConditions", HttpMethod::Put, "/dicipline/terms-conditions/", BodyEncoding::Json)
        .invalidates(&[Tag::Terms]),
    Endpoint::query("getPrivacyPolicy", "/api-apps/privacy_policies/").provides(&[Tag::Privacy]),
    Endpoint::mutation("setPrivacyPolicy", HttpMethod::Put, "/api-apps/privacy_policies/", BodyEncoding::Json)
        .invalidates(&[Tag::Privacy]),
    Endpoint::query("getTrustAndSafety", "/dicipline/trust-safety/").provides(&[Tag::TrustSafety]),
    Endpoint::mutation("setTrustAndSafety", HttpMethod::Put, "/dicipline/trust-safety/", BodyEncoding::Json)
        .invalidates(&[Tag::TrustSafety]),
];

/// Static content pages editable from the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContentKind {
    Terms,
    Privacy,
    TrustSafety,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Terms, ContentKind::Privacy, ContentKind::TrustSafety];

    fn query_name(&self) -> &'static str {
        match self {
            ContentKind::Terms => "getTermsAndConditions",
            ContentKind::Privacy => "getPrivacyPolicy",
            ContentKind::TrustSafety => "getTrustAndSafety",
        }
    }

    fn mutation_name(&self) -> &'static str {
        match self {
            ContentKind::Terms => "setTermsAndConditions",
            ContentKind::Privacy => "setPrivacyPolicy",
            ContentKind::TrustSafety => "setTrustAndSafety",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Terms => write!(f, "Terms and Conditions"),
            ContentKind::Privacy => write!(f, "Privacy Policy"),
            ContentKind::TrustSafety => write!(f, "Trust and Safety"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingApi {
    resource: Resource,
}

impl SettingApi {
    pub fn register(registry: &Registry) -> Result<Self, ApiError> {
        Ok(Self {
            resource: registry.register_resource(GROUP, ENDPOINTS)?,
        })
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn profile(&self) -> Result<QueryHandle, ApiError> {
        self.resource.query("getProfile", &Args::new())
    }

    pub async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        self.resource.fetch_data("getProfile", &Args::new()).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<MutationResponse, ApiError> {
        self.resource
            .mutation("updateProfile")?
            .trigger(&Args::new(), RequestBody::json(update)?)
            .await
    }

    pub async fn update_password(&self, request: &ChangePasswordRequest) -> Result<MutationResponse, ApiError> {
        lib_utils::validate_not_empty(&request.new_password, "new_password").map_err(ApiError::invalid_argument)?;
        self.resource
            .mutation("updatePassword")?
            .trigger(&Args::new(), RequestBody::json(request)?)
            .await
    }

    pub fn content(&self, kind: ContentKind) -> Result<QueryHandle, ApiError> {
        self.resource.query(kind.query_name(), &Args::new())
    }

    /// The page's current text, `None` when it has never been written.
    pub async fn fetch_content(&self, kind: ContentKind) -> Result<Option<ContentPage>, ApiError> {
        decode_first(&self.resource.fetch(kind.query_name(), &Args::new()).await?)
    }

    pub async fn set_content(&self, kind: ContentKind, description: &str) -> Result<MutationResponse, ApiError> {
        let body = RequestBody::json(&ContentInput {
            description: description.to_string(),
        })?;
        self.resource
            .mutation(kind.mutation_name())?
            .trigger(&Args::new(), body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiErrorKind;
    use crate::services::api::cache::QueryCache;
    use crate::services::api::testing::MockTransport;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_content_pages_are_tagged_separately() {
        let text = Arc::new(Mutex::new("Be kind".to_string()));
        let store = text.clone();
        let transport = MockTransport::new(move |request| match request.method {
            HttpMethod::Put => {
                if let Some(description) = request.body.as_json().and_then(|b| b["description"].as_str()) {
                    *store.lock() = description.to_string();
                }
                Ok(json!({ "success": true, "message": "Saved" }))
            }
            _ => Ok(json!({ "success": true, "data": [{ "id": 1, "description": store.lock().clone() }] })),
        });
        let api = SettingApi::register(&Registry::new(QueryCache::new(transport.clone()))).unwrap();
        let mut terms = api.content(ContentKind::Terms).unwrap();
        let mut privacy = api.content(ContentKind::Privacy).unwrap();
        terms.settled().await;
        privacy.settled().await;

        api.set_content(ContentKind::Terms, "Be very kind").await.unwrap();
        terms.settled().await;

        assert_eq!(transport.call_count("getTermsAndConditions"), 2);
        assert_eq!(transport.call_count("getPrivacyPolicy"), 1);
        let page = api.fetch_content(ContentKind::Terms).await.unwrap().unwrap();
        assert_eq!(page.description, "Be very kind");
    }

    #[tokio::test]
    async fn test_missing_content_is_none() {
        let transport = MockTransport::new(|_| Ok(json!({ "success": true, "data": [] })));
        let api = SettingApi::register(&Registry::new(QueryCache::new(transport))).unwrap();

        for kind in ContentKind::ALL {
            assert!(api.fetch_content(kind).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_profile_update_invalidates_profile() {
        let transport = MockTransport::new(|request| match request.endpoint {
            "updateProfile" => Ok(json!({ "success": true, "message": "Profile updated" })),
            _ => Ok(json!({ "success": true, "data": { "full_name": "Admin", "email": "admin@sparkle.test" } })),
        });
        let api = SettingApi::register(&Registry::new(QueryCache::new(transport.clone()))).unwrap();
        let mut profile = api.profile().unwrap();
        profile.settled().await;
        let update = ProfileUpdate {
            full_name: Some("Site Admin".to_string()),
            phone: None,
        };

        api.update_profile(&update).await.unwrap();
        profile.settled().await;

        assert_eq!(transport.calls()[1].body.as_json(), Some(&json!({ "full_name": "Site Admin" })));
        assert_eq!(transport.call_count("getProfile"), 2);
        assert_eq!(profile.decode::<Profile>().unwrap().unwrap().name, "Admin");
    }

    #[tokio::test]
    async fn test_password_change_does_not_invalidate() {
        let transport = MockTransport::new(|_| Ok(json!({ "success": true, "message": "ok", "data": {} })));
        let api = SettingApi::register(&Registry::new(QueryCache::new(transport.clone()))).unwrap();
        let mut profile = api.profile().unwrap();
        profile.settled().await;

        let blank = ChangePasswordRequest {
            old_password: "old".to_string(),
            new_password: " ".to_string(),
        };
        assert_eq!(api.update_password(&blank).await.unwrap_err().kind, ApiErrorKind::InvalidArgument);

        let request = ChangePasswordRequest {
            old_password: "old".to_string(),
            new_password: "n3w-secret".to_string(),
        };
        api.update_password(&request).await.unwrap();

        assert!(!profile.state().is_fetching());
        assert_eq!(transport.call_count("getProfile"), 1);
    }
}
