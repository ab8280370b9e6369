use anyhow::Result;
use reqwest::header;
use std::collections::HashMap;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

/// Raw quota units per display dollar.
pub(super) const QUOTA_SCALE: f64 = 500_000.0;

/// Round to two decimals for display and comparison.
pub(super) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Browser-like header set shared by every API call, plus the per-account
/// identity header the service authorizes by.
pub(super) fn browser_headers(
    origin: &str,
    api_user_key: &str,
    api_user: &str,
) -> Result<header::HeaderMap> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
    );
    headers.insert(
        header::REFERER,
        header::HeaderValue::from_str(&format!("{}/console", origin))?,
    );
    headers.insert(header::ORIGIN, header::HeaderValue::from_str(origin)?);
    headers.insert(
        header::CONNECTION,
        header::HeaderValue::from_static("keep-alive"),
    );
    headers.insert(
        header::HeaderName::from_static("sec-fetch-dest"),
        header::HeaderValue::from_static("empty"),
    );
    headers.insert(
        header::HeaderName::from_static("sec-fetch-mode"),
        header::HeaderValue::from_static("cors"),
    );
    headers.insert(
        header::HeaderName::from_static("sec-fetch-site"),
        header::HeaderValue::from_static("same-origin"),
    );

    if !api_user.is_empty() {
        headers.insert(
            header::HeaderName::from_bytes(api_user_key.as_bytes())?,
            header::HeaderValue::from_str(api_user)?,
        );
    }

    Ok(headers)
}

/// Serialize a cookie jar into a `Cookie` header value.
pub(super) fn cookie_header(cookies: &HashMap<String, String>) -> String {
    cookies
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("; ")
}

/// First `max` bytes of `text`, backed off to a char boundary.
pub(super) fn preview(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
