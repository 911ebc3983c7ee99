//! Normalization of raw transport responses into `Result<T, ApiError>`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ApiError;

const MAX_SNIPPET: usize = 2000;

/// What the transport hands back for a single request.
///
/// `body` is the already-decoded success payload (absent when the server
/// sent nothing), `error_body` the raw text of a failure response.
#[derive(Debug, Clone)]
pub struct TransportResponse<T> {
    pub is_successful: bool,
    pub status_code: u16,
    pub body: Option<T>,
    pub error_body: Option<String>,
}

impl<T> TransportResponse<T> {
    pub fn success(status_code: u16, body: Option<T>) -> Self {
        Self {
            is_successful: true,
            status_code,
            body,
            error_body: None,
        }
    }

    pub fn failure(status_code: u16, error_body: Option<String>) -> Self {
        Self {
            is_successful: false,
            status_code,
            body: None,
            error_body,
        }
    }
}

/// Converts a transport response into a typed result.
pub fn to_result<T>(response: TransportResponse<T>) -> Result<T, ApiError> {
    if response.is_successful {
        return response
            .body
            .ok_or_else(|| ApiError::invalid_response("Response body was empty"));
    }
    Err(ApiError::from_http_code(
        response.status_code,
        response.error_body.as_deref(),
    ))
}

/// Builds a [`TransportResponse`] from a status and raw body text.
///
/// A blank success body becomes `body: None`. A success body that does not
/// decode is reported as a decoding error rather than an empty response.
pub fn from_raw<T: DeserializeOwned>(
    status_code: u16,
    body: &str,
) -> Result<TransportResponse<T>, ApiError> {
    if !(200..300).contains(&status_code) {
        return Ok(TransportResponse::failure(
            status_code,
            server_message(body),
        ));
    }
    if body.trim().is_empty() {
        return Ok(TransportResponse::success(status_code, None));
    }
    let parsed = serde_json::from_str::<T>(body).map_err(|e| {
        tracing::error!("Failed to parse resource: {} | body: {}", e, truncate_body(body));
        ApiError::decoding(e.to_string())
    })?;
    Ok(TransportResponse::success(status_code, Some(parsed)))
}

/// Classifies a raw HTTP exchange end to end.
///
/// Unlike [`to_result`] this sees the raw failure body, so a 422 carrying a
/// structured `errors` object produces a populated `ValidationError`.
pub fn classify_raw<T: DeserializeOwned>(status_code: u16, body: &str) -> Result<T, ApiError> {
    if status_code == 422 {
        if let Some(fields) = validation_errors(body) {
            return Err(ApiError::validation(fields));
        }
    }
    to_result(from_raw(status_code, body)?)
}

/// Extracts a human-readable message from a failure body.
///
/// JSON bodies are searched for `message`, `error` and `detail` string
/// keys. Anything else falls back to the trimmed, truncated raw text.
pub fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        for key in ["message", "error", "detail"] {
            if let Some(Value::String(msg)) = map.get(key) {
                if !msg.trim().is_empty() {
                    return Some(msg.trim().to_string());
                }
            }
        }
        return None;
    }
    Some(truncate_body(trimmed))
}

/// Parses `{"errors": {"field": "msg" | ["msg", ...]}}` into field messages.
///
/// Only the first message of each field is kept.
pub fn validation_errors(body: &str) -> Option<BTreeMap<String, String>> {
    let value: Value = serde_json::from_str(body.trim()).ok()?;
    let errors = value.get("errors")?.as_object()?;
    let mut fields = BTreeMap::new();
    for (field, messages) in errors {
        let first = match messages {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => items.iter().find_map(|v| v.as_str().map(str::to_string)),
            _ => None,
        };
        if let Some(msg) = first {
            fields.insert(field.clone(), msg);
        }
    }
    Some(fields)
}

pub(crate) fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_SNIPPET {
        body.to_string()
    } else {
        let mut end = MAX_SNIPPET;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn successful_response_with_body_is_ok() {
        let resp = TransportResponse::success(200, Some(7));
        assert_eq!(to_result(resp), Ok(7));
    }

    #[test]
    fn successful_response_without_body_is_invalid_response() {
        let resp: TransportResponse<u32> = TransportResponse::success(204, None);
        assert!(matches!(
            to_result(resp),
            Err(ApiError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn failed_response_is_classified_by_status() {
        let resp: TransportResponse<u32> =
            TransportResponse::failure(418, Some("short and stout".to_string()));
        assert_eq!(
            to_result(resp),
            Err(ApiError::from_http_code(418, Some("short and stout")))
        );

        let resp: TransportResponse<u32> = TransportResponse::failure(401, None);
        assert!(matches!(to_result(resp), Err(ApiError::Unauthorized { .. })));
    }

    #[test]
    fn raw_blank_body_is_invalid_response() {
        let result: Result<Item, ApiError> = classify_raw(200, "   ");
        assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
    }

    #[test]
    fn raw_malformed_body_is_decoding_error() {
        let result: Result<Item, ApiError> = classify_raw(200, "{\"name\": 1}");
        assert!(matches!(result, Err(ApiError::DecodingError { .. })));
    }

    #[test]
    fn raw_success_decodes() {
        let result: Result<Item, ApiError> = classify_raw(200, r#"{"id": "l1"}"#);
        assert_eq!(result, Ok(Item { id: "l1".to_string() }));
    }

    #[test]
    fn raw_failure_carries_json_server_message() {
        let result: Result<Item, ApiError> =
            classify_raw(409, r#"{"message": "Listing already published"}"#);
        match result {
            Err(ApiError::HttpError {
                http_code,
                server_message,
                ..
            }) => {
                assert_eq!(http_code, 409);
                assert_eq!(server_message.as_deref(), Some("Listing already published"));
            }
            other => panic!("expected http error, got {:?}", other),
        }
    }

    #[test]
    fn raw_422_parses_field_errors() {
        let body = r#"{"message": "invalid", "errors": {"title": ["Title is required", "Too short"], "price": "Must be positive"}}"#;
        let result: Result<Item, ApiError> = classify_raw(422, body);
        match result {
            Err(ApiError::ValidationError { field_errors, .. }) => {
                assert_eq!(field_errors.len(), 2);
                assert_eq!(field_errors["title"], "Title is required");
                assert_eq!(field_errors["price"], "Must be positive");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn raw_422_without_structure_has_empty_fields() {
        let result: Result<Item, ApiError> = classify_raw(422, "nope");
        match result {
            Err(ApiError::ValidationError { field_errors, .. }) => assert!(field_errors.is_empty()),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn server_message_variants() {
        assert_eq!(server_message(""), None);
        assert_eq!(server_message("plain text"), Some("plain text".to_string()));
        assert_eq!(
            server_message(r#"{"error": "bad cursor"}"#),
            Some("bad cursor".to_string())
        );
        assert_eq!(server_message(r#"{"code": 7}"#), None);
    }

    #[test]
    fn truncate_long_bodies() {
        let body = "é".repeat(MAX_SNIPPET);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("...[truncated]"));
        assert!(truncated.len() < body.len());
    }
}
