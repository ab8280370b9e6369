use async_trait::async_trait;
use std::collections::HashMap;

use crate::shared::DomainError;

/// Cookie names the WAF challenge must issue before the origin accepts any
/// authenticated API call.
pub const REQUIRED_WAF_COOKIES: [&str; 3] = ["acw_tc", "cdn_sec_tc", "acw_sc__v2"];

/// Capability for obtaining WAF cookies from an origin's login page.
///
/// Implementations drive a real browser session: navigate, wait for ready
/// (bounded), read cookies, close. A successful harvest always contains
/// every name in [`REQUIRED_WAF_COOKIES`]; partial sets are reported as
/// failure, never returned.
#[async_trait]
pub trait WafCookieHarvester: Send + Sync {
    async fn harvest(
        &self,
        login_url: &str,
        account_name: &str,
    ) -> Result<HashMap<String, String>, DomainError>;
}

/// Names from the required set that are absent or empty in `cookies`.
pub fn missing_waf_cookies(cookies: &HashMap<String, String>) -> Vec<&'static str> {
    REQUIRED_WAF_COOKIES
        .iter()
        .copied()
        .filter(|name| cookies.get(*name).map_or(true, |value| value.is_empty()))
        .collect()
}
