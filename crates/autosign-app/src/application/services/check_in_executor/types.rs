use autosign_domain::check_in::UserInfo;

/// Check-in result for a single account
#[derive(Debug, Clone)]
pub struct AccountCheckInResult {
    pub account_name: String,
    pub success: bool,
    pub message: String,
    pub user_info: Option<UserInfo>,
}

impl AccountCheckInResult {
    pub fn failure(account_name: &str, message: impl Into<String>) -> Self {
        Self {
            account_name: account_name.to_string(),
            success: false,
            message: message.into(),
            user_info: None,
        }
    }
}

/// Batch check-in result
#[derive(Debug, Clone)]
pub struct BatchCheckInResult {
    pub total: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub results: Vec<AccountCheckInResult>,
}

impl BatchCheckInResult {
    pub fn from_results(results: Vec<AccountCheckInResult>) -> Self {
        let success_count = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            success_count,
            failed_count: results.len() - success_count,
            results,
        }
    }

    /// The run as a whole is viable when at least one account succeeded.
    pub fn any_success(&self) -> bool {
        self.success_count > 0
    }
}
