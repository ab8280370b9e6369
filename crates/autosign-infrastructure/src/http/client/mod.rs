mod check_in;
mod types;
mod user_info;

pub use types::USER_AGENT;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;

use autosign_domain::check_in::{CheckInGateway, CheckInOutcome, Provider, UserInfo};
use autosign_domain::shared::DomainError;

use crate::config::TimeoutConfig;

/// HTTP client pre-configured with a browser-like identity.
pub struct HttpClient {
    pub(super) client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(TimeoutConfig::global().http_request)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl CheckInGateway for HttpClient {
    async fn fetch_user_info(
        &self,
        provider: &Provider,
        cookies: &HashMap<String, String>,
        api_user: &str,
    ) -> Result<UserInfo, DomainError> {
        self.get_user_info(provider, cookies, api_user)
            .await
            .map_err(to_domain_error)
    }

    async fn check_in(
        &self,
        provider: &Provider,
        cookies: &HashMap<String, String>,
        api_user: &str,
    ) -> Result<CheckInOutcome, DomainError> {
        self.execute_check_in(provider, cookies, api_user)
            .await
            .map_err(to_domain_error)
    }
}

/// Map a transport-layer fault onto the domain taxonomy: connection and
/// timeout faults are `Network`, everything else is `Api`.
fn to_domain_error(error: anyhow::Error) -> DomainError {
    let is_network_fault = error.chain().any(|cause| {
        cause
            .downcast_ref::<reqwest::Error>()
            .map_or(false, |e| e.is_timeout() || e.is_connect() || e.is_request())
    });

    if is_network_fault {
        DomainError::Network(error.to_string())
    } else {
        DomainError::Api(error.to_string())
    }
}
