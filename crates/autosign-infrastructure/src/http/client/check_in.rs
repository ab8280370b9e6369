use anyhow::{Context, Result};
use reqwest::{header, StatusCode};
use std::collections::HashMap;

use autosign_domain::check_in::{CheckInOutcome, Provider};

use super::types::{browser_headers, cookie_header};

impl super::HttpClient {
    /// POST the check-in request and classify the response.
    pub async fn execute_check_in(
        &self,
        provider: &Provider,
        cookies: &HashMap<String, String>,
        api_user: &str,
    ) -> Result<CheckInOutcome> {
        let url = provider.sign_in_url();

        let mut headers = browser_headers(provider.domain(), provider.api_user_key(), api_user)?;
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::HeaderName::from_static("x-requested-with"),
            header::HeaderValue::from_static("XMLHttpRequest"),
        );

        let mut request = self.client.post(&url).headers(headers);

        let cookie_string = cookie_header(cookies);
        if !cookie_string.is_empty() {
            request = request.header(header::COOKIE, cookie_string);
        }

        let response = request
            .send()
            .await
            .context("Failed to send check-in request")?;

        let status = response.status();
        log::info!("Check-in response status: {}", status);

        let text = response.text().await.unwrap_or_default();

        Ok(classify_check_in_response(status, &text))
    }
}

/// Classify a check-in response, in order:
/// 1. non-200 status is a failure regardless of body;
/// 2. JSON bodies succeed on `ret == 1`, `code == 0` or a truthy `success`,
///    and fail with the payload's own `msg`/`message` otherwise;
/// 3. non-JSON bodies degrade to a case-insensitive "success" marker search.
/// The service does not guarantee JSON on every code path, so the classifier
/// never errors on a malformed body.
pub(super) fn classify_check_in_response(status: StatusCode, body: &str) -> CheckInOutcome {
    if status != StatusCode::OK {
        return CheckInOutcome {
            success: false,
            message: format!("HTTP {}", status.as_u16()),
        };
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(data) => {
            let success = data["ret"].as_i64() == Some(1)
                || data["code"].as_i64() == Some(0)
                || is_truthy(&data["success"]);

            if success {
                CheckInOutcome {
                    success: true,
                    message: "Check-in successful".to_string(),
                }
            } else {
                let message = data["msg"]
                    .as_str()
                    .or_else(|| data["message"].as_str())
                    .unwrap_or("unknown error")
                    .to_string();
                CheckInOutcome {
                    success: false,
                    message,
                }
            }
        }
        Err(_) => {
            if body.to_lowercase().contains("success") {
                CheckInOutcome {
                    success: true,
                    message: "Check-in successful".to_string(),
                }
            } else {
                CheckInOutcome {
                    success: false,
                    message: "invalid response format".to_string(),
                }
            }
        }
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_200_status_is_failure() {
        let outcome = classify_check_in_response(StatusCode::FORBIDDEN, "whatever");
        assert!(!outcome.success);
        assert_eq!(outcome.message, "HTTP 403");
    }

    #[test]
    fn test_ret_one_is_success() {
        let outcome = classify_check_in_response(StatusCode::OK, r#"{"ret": 1}"#);
        assert!(outcome.success);
    }

    #[test]
    fn test_code_zero_is_success() {
        let outcome = classify_check_in_response(StatusCode::OK, r#"{"code": 0}"#);
        assert!(outcome.success);
    }

    #[test]
    fn test_truthy_success_flag_is_success() {
        let outcome = classify_check_in_response(StatusCode::OK, r#"{"success": true}"#);
        assert!(outcome.success);
    }

    #[test]
    fn test_json_failure_carries_msg_field() {
        let outcome =
            classify_check_in_response(StatusCode::OK, r#"{"code": 1, "msg": "already signed in"}"#);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "already signed in");
    }

    #[test]
    fn test_json_failure_falls_back_to_message_field() {
        let outcome =
            classify_check_in_response(StatusCode::OK, r#"{"code": 1, "message": "rate limited"}"#);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "rate limited");
    }

    #[test]
    fn test_json_failure_without_reason_defaults() {
        let outcome = classify_check_in_response(StatusCode::OK, r#"{"code": 1}"#);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "unknown error");
    }

    #[test]
    fn test_non_json_body_with_success_marker() {
        let outcome = classify_check_in_response(StatusCode::OK, "<p>Operation SUCCESS</p>");
        assert!(outcome.success);
    }

    #[test]
    fn test_non_json_body_without_marker() {
        let outcome = classify_check_in_response(StatusCode::OK, "<html>blocked</html>");
        assert!(!outcome.success);
        assert_eq!(outcome.message, "invalid response format");
    }
}
