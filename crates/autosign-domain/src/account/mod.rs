use serde::Deserialize;
use std::collections::HashMap;

use crate::shared::DomainError;

/// One entry of the configured account list.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    pub cookies: CookieInput,
    pub api_user: String,
}

/// Cookie material as configured: either a ready mapping or a raw
/// `"k=v; k2=v2"` cookie string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CookieInput {
    Map(HashMap<String, String>),
    Raw(String),
}

impl CookieInput {
    /// Normalize to a single cookie mapping.
    pub fn resolve(&self) -> HashMap<String, String> {
        match self {
            CookieInput::Map(map) => map.clone(),
            CookieInput::Raw(raw) => parse_cookie_string(raw),
        }
    }
}

impl AccountConfig {
    /// Validate the entry and normalize it into session credentials.
    ///
    /// A failure here means the account must not produce any network
    /// activity.
    pub fn credentials(&self) -> Result<Credentials, DomainError> {
        if self.api_user.trim().is_empty() {
            return Err(DomainError::Validation(
                "API user identifier not found".to_string(),
            ));
        }

        let cookies = self.cookies.resolve();
        if cookies.is_empty() {
            return Err(DomainError::Validation(
                "Cookie configuration resolves to an empty mapping".to_string(),
            ));
        }

        Ok(Credentials::new(cookies, self.api_user.trim().to_string()))
    }
}

/// Normalized per-account credentials: user cookies plus the identity header
/// value the service authorizes by.
#[derive(Debug, Clone)]
pub struct Credentials {
    cookies: HashMap<String, String>,
    api_user: String,
}

impl Credentials {
    pub fn new(cookies: HashMap<String, String>, api_user: String) -> Self {
        Self { cookies, api_user }
    }

    pub fn cookies(&self) -> &HashMap<String, String> {
        &self.cookies
    }

    pub fn api_user(&self) -> &str {
        &self.api_user
    }
}

/// Parse a raw cookie string: fragments split on `;`, key from value on the
/// first `=` only, both trimmed of surrounding whitespace. Fragments without
/// `=` are skipped.
pub fn parse_cookie_string(raw: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for fragment in raw.split(';') {
        if let Some((key, value)) = fragment.split_once('=') {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            cookies.insert(key.to_string(), value.trim().to_string());
        }
    }
    cookies
}
