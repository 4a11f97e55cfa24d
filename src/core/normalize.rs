//! Turns any non-2xx response into a single `ApiError::Http`.
//!
//! Every client operation funnels its failures through
//! [`normalize_error_response`], so the message rules live in one place.

use crate::domain::http::HttpResponse;
use crate::utils::error::ApiError;
use serde_json::Value;

pub fn default_error_message(status: u16) -> String {
    format!("HTTP error {} while communicating with the API.", status)
}

pub fn normalize_error_response(response: &HttpResponse) -> ApiError {
    let message = match serde_json::from_slice::<Value>(&response.body) {
        Ok(value) => extract_message(&value),
        Err(e) => {
            // 錯誤內容不是 JSON：僅記錄，沿用預設訊息
            tracing::debug!(
                "Could not parse error body for HTTP {} as JSON: {}",
                response.status,
                e
            );
            None
        }
    };

    ApiError::Http {
        status: response.status,
        message: message.unwrap_or_else(|| default_error_message(response.status)),
    }
}

/// `{"message": "..."}`, `{"message": ["a", "b"]}` or a bare JSON string.
fn extract_message(value: &Value) -> Option<String> {
    let message = match value {
        Value::Object(map) => match map.get("message")? {
            Value::String(text) => text.clone(),
            Value::Array(items) => {
                let parts = items
                    .iter()
                    .map(|item| item.as_str())
                    .collect::<Option<Vec<_>>>()?;
                parts.join(", ")
            }
            _ => return None,
        },
        Value::String(text) => text.clone(),
        _ => return None,
    };

    if message.trim().is_empty() {
        None
    } else {
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(status: u16, body: &str) -> (String, Option<u16>) {
        let err = normalize_error_response(&HttpResponse::new(status, body));
        (err.message(), err.http_status())
    }

    #[test]
    fn test_string_message_used_verbatim() {
        assert_eq!(
            normalize(401, r#"{"message":"Invalid credentials","statusCode":401}"#),
            ("Invalid credentials".to_string(), Some(401))
        );
    }

    #[test]
    fn test_message_list_joined() {
        let (message, status) = normalize(
            400,
            r#"{"message":["email must be valid","password too short"],"error":"Bad Request"}"#,
        );
        assert_eq!(message, "email must be valid, password too short");
        assert_eq!(status, Some(400));
    }

    #[test]
    fn test_unparseable_bodies_fall_back_to_default() {
        for body in ["", "<html>Bad Gateway</html>", "{not json"] {
            assert_eq!(
                normalize(500, body),
                (
                    "HTTP error 500 while communicating with the API.".to_string(),
                    Some(500)
                )
            );
        }
    }

    #[test]
    fn test_json_without_usable_message_falls_back() {
        let expected = default_error_message(422);
        assert_eq!(normalize(422, r#"{"error":"Unprocessable"}"#).0, expected);
        assert_eq!(normalize(422, r#"{"message":42}"#).0, expected);
        assert_eq!(normalize(422, r#"{"message":""}"#).0, expected);
        assert_eq!(normalize(422, r#"{"message":[]}"#).0, expected);
        assert_eq!(normalize(422, r#"{"message":["ok", 1]}"#).0, expected);
        assert_eq!(normalize(422, "null").0, expected);
        assert_eq!(normalize(422, "[1,2]").0, expected);
    }

    #[test]
    fn test_bare_json_string_body() {
        assert_eq!(normalize(403, r#""Forbidden resource""#).0, "Forbidden resource");
    }
}
