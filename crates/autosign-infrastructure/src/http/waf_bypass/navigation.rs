use anyhow::{Context, Result};
use chromiumoxide::Page;
use log::{info, warn};
use std::collections::HashMap;
use std::time::Duration;

use autosign_domain::check_in::REQUIRED_WAF_COOKIES;

use super::browser_setup::BrowserSession;
use crate::config::TimeoutConfig;

/// Navigate to the login page and run the two-round cookie extraction.
///
/// The session is handed back alongside the result so the caller can tear
/// the browser down on every path.
pub(super) async fn collect_waf_cookies(
    session: BrowserSession,
    login_url: &str,
    account_name: &str,
) -> (BrowserSession, Result<HashMap<String, String>>) {
    let result = navigate_and_extract(&session, login_url, account_name).await;
    (session, result)
}

async fn navigate_and_extract(
    session: &BrowserSession,
    login_url: &str,
    account_name: &str,
) -> Result<HashMap<String, String>> {
    let timeouts = TimeoutConfig::global();

    info!(
        "[{}] Step 1: visiting login page for initial cookies...",
        account_name
    );

    let page = session
        .browser
        .new_page(login_url)
        .await
        .context("Failed to open login page")?;

    wait_for_ready(&page, account_name).await;

    let mut waf_cookies = extract_waf_cookies(&page).await?;
    info!(
        "[{}] Got {} WAF cookies after step 1",
        account_name,
        waf_cookies.len()
    );

    // The challenge sometimes issues acw_sc__v2 only after a second round
    // trip, so reload once and re-read before giving up.
    if !waf_cookies.contains_key("acw_sc__v2") {
        info!(
            "[{}] Step 2: acw_sc__v2 not present yet, reloading for a second round...",
            account_name
        );

        tokio::time::sleep(timeouts.reload_delay).await;
        page.reload().await.context("Failed to reload login page")?;
        wait_for_ready(&page, account_name).await;
        tokio::time::sleep(timeouts.reload_delay).await;

        waf_cookies = extract_waf_cookies(&page).await?;
        info!(
            "[{}] Got {} WAF cookies after step 2",
            account_name,
            waf_cookies.len()
        );
    }

    Ok(waf_cookies)
}

/// Wait for the document ready state, bounded by `page_ready`; fall back to
/// a fixed settle delay on timeout so navigation can never block
/// indefinitely.
async fn wait_for_ready(page: &Page, account_name: &str) {
    let timeouts = TimeoutConfig::global();

    let ready = tokio::time::timeout(timeouts.page_ready, async {
        let _ = page.wait_for_navigation().await;
        loop {
            match page.evaluate("document.readyState").await {
                Ok(value) => {
                    let state: Option<String> = value.into_value().ok();
                    if state.as_deref() == Some("complete") {
                        break;
                    }
                }
                // Evaluation failures here mean the page is mid-navigation;
                // keep polling until the timeout fires.
                Err(_) => {}
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
    })
    .await;

    if ready.is_err() {
        warn!(
            "[{}] Page ready wait timed out, settling for {:?} instead",
            account_name, timeouts.page_settle
        );
        tokio::time::sleep(timeouts.page_settle).await;
    }
}

async fn extract_waf_cookies(page: &Page) -> Result<HashMap<String, String>> {
    let cookies = page
        .get_cookies()
        .await
        .context("Failed to read browser cookies")?;

    let mut waf_cookies = HashMap::new();
    for cookie in cookies {
        if REQUIRED_WAF_COOKIES.contains(&cookie.name.as_str()) {
            waf_cookies.insert(cookie.name, cookie.value);
        }
    }

    Ok(waf_cookies)
}
