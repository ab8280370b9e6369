mod browser_setup;
mod cleanup;
mod navigation;

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use std::collections::HashMap;

use autosign_domain::check_in::{missing_waf_cookies, WafCookieHarvester, REQUIRED_WAF_COOKIES};
use autosign_domain::shared::DomainError;

use browser_setup::BrowserSession;
use cleanup::cleanup_browser;

/// Harvests WAF cookies by driving a real Chromium session against the
/// origin's login page.
///
/// Every call uses a fresh, non-persistent browser profile, so no cookie
/// state leaks between accounts. A headed session is preferred; when the
/// headed launch fails (no display, sandbox restrictions) the service
/// degrades once to headless and does not retry beyond that.
pub struct WafBypassService {
    headless_only: bool,
}

impl WafBypassService {
    pub fn new(headless_only: bool) -> Self {
        Self { headless_only }
    }

    async fn launch_session(&self, account_name: &str) -> Result<BrowserSession> {
        if self.headless_only {
            return browser_setup::launch_browser(account_name, true).await;
        }

        match browser_setup::launch_browser(account_name, false).await {
            Ok(session) => Ok(session),
            Err(e) => {
                warn!(
                    "[{}] Headed browser launch failed ({}), falling back to headless",
                    account_name, e
                );
                browser_setup::launch_browser(account_name, true).await
            }
        }
    }

    async fn harvest_once(
        &self,
        login_url: &str,
        account_name: &str,
    ) -> Result<HashMap<String, String>> {
        let session = self.launch_session(account_name).await?;

        // Teardown must run on every path, so navigation hands the session back.
        let (session, cookies_result) =
            navigation::collect_waf_cookies(session, login_url, account_name).await;
        cleanup_browser(session, account_name).await;

        let waf_cookies = cookies_result?;

        let missing = missing_waf_cookies(&waf_cookies);
        if !missing.is_empty() {
            anyhow::bail!(
                "missing WAF cookies after two rounds: {:?} (expected {:?})",
                missing,
                REQUIRED_WAF_COOKIES
            );
        }

        Ok(waf_cookies)
    }
}

#[async_trait]
impl WafCookieHarvester for WafBypassService {
    async fn harvest(
        &self,
        login_url: &str,
        account_name: &str,
    ) -> Result<HashMap<String, String>, DomainError> {
        info!(
            "[{}] Starting browser to get WAF cookies...",
            account_name
        );

        match self.harvest_once(login_url, account_name).await {
            Ok(cookies) => {
                info!(
                    "[{}] Successfully got all {} WAF cookies",
                    account_name,
                    cookies.len()
                );
                Ok(cookies)
            }
            Err(e) => {
                warn!("[{}] WAF cookie harvest failed: {}", account_name, e);
                Err(DomainError::WafAcquisition(e.to_string()))
            }
        }
    }
}

/// Check which browser is available on the system
pub fn check_available_browser() -> Option<String> {
    browser_setup::find_browser().map(|path| path.to_string_lossy().to_string())
}
