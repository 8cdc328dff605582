//! # Response Normalization
//!
//! Turns a raw HTTP response into either the parsed JSON body or a structured
//! [`ApiError`], and decodes cached JSON into the typed envelope shapes from
//! `shared`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use shared::dto::envelope::{Envelope, ListData, ListPage, ListResult};

use crate::core::error::ApiError;

/// Parse a response body received with HTTP `status`.
///
/// - non-2xx: `Http`, with the envelope's message when the body has one
/// - empty 2xx body: `{}`
/// - malformed JSON: `Decode`
/// - 2xx envelope with `success: false`: `Rejected`
pub fn parse_response(status: u16, body: &str) -> Result<Value, ApiError> {
    let parsed = if body.trim().is_empty() {
        Ok(Value::Object(Default::default()))
    } else {
        serde_json::from_str::<Value>(body)
    };

    if !(200..300).contains(&status) {
        let message = parsed
            .as_ref()
            .ok()
            .and_then(envelope_message)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        return Err(ApiError::http(status, message, raw(body)));
    }

    let value = parsed.map_err(|e| {
        ApiError::decode(format!("Failed to parse response: {}", e), raw(body)).with_status(status)
    })?;

    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let message = envelope_message(&value).unwrap_or_else(|| "Request was rejected".to_string());
        return Err(ApiError::rejected(status, message, raw(body)));
    }

    Ok(value)
}

fn envelope_message(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn raw(body: &str) -> Option<String> {
    (!body.is_empty()).then(|| body.to_string())
}

/// Decode the whole `{ success, message, data }` envelope.
pub fn decode_envelope<T: DeserializeOwned>(value: &Value) -> Result<Envelope<T>, ApiError> {
    Envelope::<T>::deserialize(value).map_err(|e| {
        ApiError::decode(
            format!("Unexpected response shape: {}", e),
            Some(value.to_string()),
        )
    })
}

/// Decode `data`, failing when it is absent.
pub fn decode_data<T: DeserializeOwned>(value: &Value) -> Result<T, ApiError> {
    decode_envelope::<T>(value)?
        .data
        .ok_or_else(|| ApiError::decode("Response has no data", Some(value.to_string())))
}

/// Decode a list endpoint into a normalized [`ListPage`].
///
/// Accepts `data.result` (array or category-keyed map) with optional
/// `data.meta`, and also a bare `data` array.
pub fn decode_list<T: DeserializeOwned>(value: &Value) -> Result<ListPage<T>, ApiError> {
    if let Some(Value::Array(_)) = value.get("data") {
        let items = decode_data::<Vec<T>>(value)?;
        return Ok(ListPage::from(ListData {
            result: ListResult::Flat(items),
            meta: None,
        }));
    }
    decode_data::<ListData<T>>(value).map(ListPage::from)
}

/// Decode a single record that the backend may wrap in a one-element array,
/// as the static content endpoints do.
pub fn decode_first<T: DeserializeOwned>(value: &Value) -> Result<Option<T>, ApiError> {
    match value.get("data") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(rows)) => rows.first().map(|row| from_value(row, value)).transpose(),
        Some(row) => from_value(row, value).map(Some),
    }
}

fn from_value<T: DeserializeOwned>(row: &Value, whole: &Value) -> Result<T, ApiError> {
    T::deserialize(row).map_err(|e| {
        ApiError::decode(
            format!("Unexpected response shape: {}", e),
            Some(whole.to_string()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiErrorKind;
    use serde_json::json;
    use shared::dto::faq::Faq;
    use shared::dto::setting::ContentPage;

    #[test]
    fn test_http_error_uses_envelope_message() {
        let err = parse_response(404, r#"{"success":false,"message":"Blog not found"}"#).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Http);
        assert_eq!(err.status, Some(404));
        assert_eq!(err.message, "Blog not found");
        assert!(err.raw.unwrap().contains("Blog not found"));
    }

    #[test]
    fn test_http_error_with_html_body() {
        let err = parse_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Http);
        assert_eq!(err.message, "Request failed with status 502");
        assert_eq!(err.raw.as_deref(), Some("<html>Bad Gateway</html>"));
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let err = parse_response(200, "{not json").unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Decode);
        assert_eq!(err.status, Some(200));
        assert_eq!(err.raw.as_deref(), Some("{not json"));
    }

    #[test]
    fn test_success_false_is_rejected() {
        let err = parse_response(200, r#"{"success":false,"message":"Invalid OTP"}"#).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Rejected);
        assert_eq!(err.message, "Invalid OTP");
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        assert_eq!(parse_response(204, "").unwrap(), json!({}));
    }

    #[test]
    fn test_decode_list_and_shape_errors() {
        let value = json!({
            "success": true,
            "message": "ok",
            "data": { "result": [{ "_id": "f1", "question": "Q", "answer": "A" }] }
        });
        let page = decode_list::<Faq>(&value).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.meta.total, 1);

        let err = decode_list::<Faq>(&json!({ "success": true, "data": { "result": 5 } })).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Decode);

        let bare = json!({ "success": true, "data": [{ "_id": "f1", "question": "Q", "answer": "A" }] });
        assert_eq!(decode_list::<Faq>(&bare).unwrap().items[0].answer, "A");

        let err = decode_data::<Faq>(&json!({ "success": true })).unwrap_err();
        assert_eq!(err.message, "Response has no data");
    }

    #[test]
    fn test_envelope_without_data_decodes() {
        let value = json!({ "success": true, "message": "FAQ deleted" });
        let envelope = decode_envelope::<Faq>(&value).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message, "FAQ deleted");
    }

    #[test]
    fn test_decode_first_accepts_array_or_object() {
        let wrapped = json!({ "data": [{ "id": 1, "description": "<p>Terms</p>" }] });
        let page: ContentPage = decode_first(&wrapped).unwrap().unwrap();
        assert_eq!(page.description, "<p>Terms</p>");

        let bare = json!({ "data": { "id": 1, "description": "Policy" } });
        assert!(decode_first::<ContentPage>(&bare).unwrap().is_some());

        assert!(decode_first::<ContentPage>(&json!({ "data": [] })).unwrap().is_none());
    }
}
