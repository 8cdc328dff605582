//! # Requests
//!
//! A fully resolved request: method, path with the id already substituted,
//! query-string pairs, and body. Built by [`super::endpoint::Endpoint::build`]
//! and sent by a [`crate::core::service::Transport`].

use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;

use crate::core::error::ApiError;
use super::endpoint::BodyEncoding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    pub fn as_reqwest(&self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary file attached to a multipart body.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_image_type(&file_name).map(str::to_string);
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read an image from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    fn into_part(self) -> Result<Part, ApiError> {
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        match self.content_type {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| ApiError::invalid_argument(format!("Invalid image content type {mime}: {e}"))),
            None => Ok(part),
        }
    }
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn guess_image_type(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Image-upload body: a `data` field carrying a JSON-serialized object and an
/// optional `image` file field.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartBody {
    data: Value,
    image: Option<FilePart>,
}

impl MultipartBody {
    /// `data` must serialize to a JSON object.
    pub fn new<T: Serialize>(data: &T) -> Result<Self, ApiError> {
        let data = serde_json::to_value(data)
            .map_err(|e| ApiError::invalid_argument(format!("Failed to encode form data: {e}")))?;
        if !data.is_object() {
            return Err(ApiError::invalid_argument("Multipart data must be a JSON object"));
        }
        Ok(Self { data, image: None })
    }

    pub fn with_image(mut self, image: FilePart) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_optional_image(mut self, image: Option<FilePart>) -> Self {
        self.image = image;
        self
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn image(&self) -> Option<&FilePart> {
        self.image.as_ref()
    }

    /// Text content of the `data` field.
    pub fn data_field(&self) -> String {
        self.data.to_string()
    }

    /// Names of the fields that will be sent, in order.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = vec!["data"];
        if self.image.is_some() {
            names.push("image");
        }
        names
    }

    pub fn into_form(self) -> Result<Form, ApiError> {
        let form = Form::new().text("data", self.data.to_string());
        match self.image {
            Some(image) => Ok(form.part("image", image.into_part()?)),
            None => Ok(form),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartBody),
}

impl RequestBody {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::invalid_argument(format!("Failed to encode request body: {e}")))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_multipart(&self) -> Option<&MultipartBody> {
        match self {
            RequestBody::Multipart(body) => Some(body),
            _ => None,
        }
    }

    pub fn encoding(&self) -> BodyEncoding {
        match self {
            RequestBody::Empty => BodyEncoding::None,
            RequestBody::Json(_) => BodyEncoding::Json,
            RequestBody::Multipart(_) => BodyEncoding::Multipart,
        }
    }
}

impl From<MultipartBody> for RequestBody {
    fn from(body: MultipartBody) -> Self {
        RequestBody::Multipart(body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Name of the endpoint this request was built from.
    pub endpoint: &'static str,
    pub method: HttpMethod,
    /// Path relative to the base URL, id already substituted.
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    /// Absolute URL against `base_url`.
    ///
    /// The base may carry its own path prefix (`https://host/api/v1`); the
    /// request path is appended to it rather than resolved against it.
    pub fn url(&self, base_url: &str) -> Result<Url, ApiError> {
        let joined = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined)
            .map_err(|e| ApiError::invalid_argument(format!("Invalid request URL {joined}: {e}")))?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}
