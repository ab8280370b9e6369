mod types;

pub use types::{AccountCheckInResult, BatchCheckInResult};

use log::{info, warn};
use std::sync::Arc;
use tracing::instrument;

use autosign_domain::account::AccountConfig;
use autosign_domain::check_in::{CheckInGateway, Provider, WafCookieHarvester};
use autosign_domain::shared::{truncate_message, DIAGNOSTIC_LIMIT};

/// Sequential check-in orchestrator.
///
/// Accounts are processed strictly one at a time: concurrent WAF challenges
/// against the same origin from one operator raise the block risk.
pub struct CheckInExecutor {
    harvester: Arc<dyn WafCookieHarvester>,
    gateway: Arc<dyn CheckInGateway>,
    provider: Provider,
}

impl CheckInExecutor {
    pub fn new(
        harvester: Arc<dyn WafCookieHarvester>,
        gateway: Arc<dyn CheckInGateway>,
        provider: Provider,
    ) -> Self {
        Self {
            harvester,
            gateway,
            provider,
        }
    }

    /// Run the whole batch, one account after another.
    #[instrument(skip(self, accounts), fields(batch_size = accounts.len()))]
    pub async fn execute_batch(&self, accounts: &[AccountConfig]) -> BatchCheckInResult {
        let mut results = Vec::with_capacity(accounts.len());

        for (index, account) in accounts.iter().enumerate() {
            let account_name = format!("Account {}", index + 1);
            info!("[{}] Starting check-in process", account_name);

            let result = self.execute_check_in(&account_name, account).await;
            if result.success {
                info!("[{}] Check-in successful!", account_name);
            } else {
                warn!("[{}] Check-in failed: {}", account_name, result.message);
            }
            results.push(result);
        }

        BatchCheckInResult::from_results(results)
    }

    /// Execute check-in for a single account. Every fault is converted into
    /// a result here; one account can never abort the batch.
    async fn execute_check_in(
        &self,
        account_name: &str,
        account: &AccountConfig,
    ) -> AccountCheckInResult {
        // 1. Validate before any network activity.
        let credentials = match account.credentials() {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!("[{}] Invalid account entry: {}", account_name, e);
                return AccountCheckInResult::failure(account_name, e.message());
            }
        };

        // 2. Harvest WAF cookies; failure short-circuits the account.
        let mut cookies = credentials.cookies().clone();
        if self.provider.needs_waf_bypass() {
            let waf_cookies = match self
                .harvester
                .harvest(&self.provider.login_url(), account_name)
                .await
            {
                Ok(waf_cookies) => waf_cookies,
                Err(e) => {
                    warn!("[{}] Unable to get WAF cookies", account_name);
                    return AccountCheckInResult::failure(account_name, e.message());
                }
            };
            // WAF cookies are applied after the user's and win on overlap.
            cookies.extend(waf_cookies);
        }

        // 3. The profile fetch is informational; failures are logged, never fatal.
        let user_info = match self
            .gateway
            .fetch_user_info(&self.provider, &cookies, credentials.api_user())
            .await
        {
            Ok(info) => {
                info!(
                    "[{}] Current balance: ${:.2}, Used: ${:.2}",
                    account_name, info.quota, info.used_quota
                );
                Some(info)
            }
            Err(e) => {
                warn!(
                    "[{}] Failed to get user info: {}",
                    account_name,
                    truncate_message(e.message(), DIAGNOSTIC_LIMIT)
                );
                None
            }
        };

        // 4. Perform the check-in call.
        info!("[{}] Executing check-in request", account_name);
        match self
            .gateway
            .check_in(&self.provider, &cookies, credentials.api_user())
            .await
        {
            Ok(outcome) => AccountCheckInResult {
                account_name: account_name.to_string(),
                success: outcome.success,
                message: outcome.message,
                user_info,
            },
            Err(e) => AccountCheckInResult {
                account_name: account_name.to_string(),
                success: false,
                message: truncate_message(e.message(), DIAGNOSTIC_LIMIT),
                user_info,
            },
        }
    }
}
