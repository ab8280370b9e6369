use anyhow::{Context, Result};
use reqwest::header;
use std::collections::HashMap;

use autosign_domain::check_in::{Provider, UserInfo};

use super::types::{browser_headers, cookie_header, preview, round2, QUOTA_SCALE};

impl super::HttpClient {
    /// Fetch quota figures for the account
    pub async fn get_user_info(
        &self,
        provider: &Provider,
        cookies: &HashMap<String, String>,
        api_user: &str,
    ) -> Result<UserInfo> {
        let url = provider.user_info_url();
        let headers = browser_headers(provider.domain(), provider.api_user_key(), api_user)?;

        let mut request = self.client.get(&url).headers(headers);

        let cookie_string = cookie_header(cookies);
        if !cookie_string.is_empty() {
            request = request.header(header::COOKIE, cookie_string);
        }

        let response = request
            .send()
            .await
            .context("Failed to send user info request")?;

        let status = response.status();
        log::debug!("User info response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("user info request returned HTTP {}", status.as_u16());
        }

        let text = response
            .text()
            .await
            .context("Failed to read user info response")?;

        parse_user_info(&text)
    }
}

/// Parse the user-info payload: a truthy `success` flag wrapping integer
/// quota units, scaled to display dollars and rounded to two decimals.
pub(super) fn parse_user_info(body: &str) -> Result<UserInfo> {
    let data: serde_json::Value = serde_json::from_str(body)
        .with_context(|| format!("user info response is not JSON: {}", preview(body, 200)))?;

    if !data["success"].as_bool().unwrap_or(false) {
        let message = data["message"]
            .as_str()
            .unwrap_or("user info request was not successful");
        anyhow::bail!("{}", message);
    }

    let quota_raw = data["data"]["quota"]
        .as_f64()
        .ok_or_else(|| anyhow::anyhow!("missing 'quota' field in user info response"))?;
    let used_raw = data["data"]["used_quota"]
        .as_f64()
        .ok_or_else(|| anyhow::anyhow!("missing 'used_quota' field in user info response"))?;

    Ok(UserInfo {
        quota: round2(quota_raw / QUOTA_SCALE),
        used_quota: round2(used_raw / QUOTA_SCALE),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_info_scales_and_rounds() {
        let body = r#"{"success": true, "data": {"quota": 5000000, "used_quota": 1234567}}"#;
        let info = parse_user_info(body).unwrap();
        assert_eq!(info.quota, 10.0);
        assert_eq!(info.used_quota, 2.47);
    }

    #[test]
    fn test_parse_user_info_success_false() {
        let body = r#"{"success": false, "message": "not logged in"}"#;
        let err = parse_user_info(body).unwrap_err();
        assert!(err.to_string().contains("not logged in"));
    }

    #[test]
    fn test_parse_user_info_non_json() {
        let err = parse_user_info("<html>challenge</html>").unwrap_err();
        assert!(err.to_string().contains("not JSON"));
    }

    #[test]
    fn test_parse_user_info_missing_quota_field() {
        let body = r#"{"success": true, "data": {}}"#;
        assert!(parse_user_info(body).is_err());
    }
}
