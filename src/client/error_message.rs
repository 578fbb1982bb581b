//! Server error message extraction

use reqwest::StatusCode;

const MESSAGE_KEYS: [&str; 3] = ["message", "detail", "error"];

/// Human-readable message for a failed response.
///
/// Prefers a string under `message`, `detail` or `error` (including
/// `error.message`) in a JSON body, then a non-empty plain-text body, then a
/// message naming the status.
pub(crate) fn server_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(msg) = message_from_json(&json) {
            return msg;
        }
    } else if let Ok(text) = std::str::from_utf8(body) {
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }
    format!("HTTP error! status: {}", status.as_u16())
}

fn message_from_json(json: &serde_json::Value) -> Option<String> {
    for key in MESSAGE_KEYS {
        match json.get(key) {
            Some(serde_json::Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(obj @ serde_json::Value::Object(_)) => {
                if let Some(serde_json::Value::String(s)) = obj.get("message") {
                    return Some(s.clone());
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_message_then_detail_then_error() {
        let body = br#"{"detail":"Not found.","message":"Video missing"}"#;
        assert_eq!(server_message(StatusCode::NOT_FOUND, body), "Video missing");

        let body = br#"{"detail":"Not found."}"#;
        assert_eq!(server_message(StatusCode::NOT_FOUND, body), "Not found.");

        let body = br#"{"error":{"message":"quota exceeded"}}"#;
        assert_eq!(
            server_message(StatusCode::TOO_MANY_REQUESTS, body),
            "quota exceeded"
        );
    }

    #[test]
    fn falls_back_to_status() {
        assert_eq!(
            server_message(StatusCode::INTERNAL_SERVER_ERROR, b""),
            "HTTP error! status: 500"
        );
        assert_eq!(
            server_message(StatusCode::BAD_REQUEST, br#"{"title":["required"]}"#),
            "HTTP error! status: 400"
        );
    }

    #[test]
    fn uses_plain_text_body() {
        assert_eq!(
            server_message(StatusCode::BAD_GATEWAY, b"  upstream down \n"),
            "upstream down"
        );
    }
}
