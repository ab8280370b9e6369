use autosign_domain::account::AccountConfig;
use autosign_domain::shared::DomainError;

/// Environment variable holding the JSON account list.
pub const ACCOUNTS_ENV: &str = "AUTOSIGN_ACCOUNTS";

/// Environment variable holding the notification webhook URL.
pub const WEBHOOK_ENV: &str = "AUTOSIGN_FEISHU_WEBHOOK";

/// Validated startup configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub accounts: Vec<AccountConfig>,
    pub webhook_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// The account list is accepted or rejected as a whole before any
    /// network activity; a single malformed element aborts startup.
    pub fn from_env() -> Result<Self, DomainError> {
        let raw = std::env::var(ACCOUNTS_ENV).map_err(|_| {
            DomainError::Config(format!("{} environment variable not found", ACCOUNTS_ENV))
        })?;

        let accounts = Self::parse_accounts(&raw)?;

        let webhook_url = std::env::var(WEBHOOK_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty());

        Ok(Self {
            accounts,
            webhook_url,
        })
    }

    /// Parse the JSON account array.
    pub fn parse_accounts(raw: &str) -> Result<Vec<AccountConfig>, DomainError> {
        let accounts: Vec<AccountConfig> = serde_json::from_str(raw).map_err(|e| {
            DomainError::Config(format!("Account configuration format is incorrect: {}", e))
        })?;

        if accounts.is_empty() {
            return Err(DomainError::Config("Account list is empty".to_string()));
        }

        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accounts_both_cookie_shapes() {
        let raw = r#"[
            {"cookies": {"session": "abc"}, "api_user": "1001"},
            {"cookies": "session=def; token=t", "api_user": "1002"}
        ]"#;
        let accounts = AppConfig::parse_accounts(raw).unwrap();
        assert_eq!(accounts.len(), 2);
    }

    #[test]
    fn test_parse_accounts_rejects_non_array() {
        assert!(AppConfig::parse_accounts(r#"{"cookies": "a=b", "api_user": "1"}"#).is_err());
    }

    #[test]
    fn test_parse_accounts_rejects_element_missing_field() {
        let raw = r#"[{"cookies": {"session": "abc"}}]"#;
        assert!(AppConfig::parse_accounts(raw).is_err());
    }

    #[test]
    fn test_parse_accounts_rejects_empty_list() {
        assert!(AppConfig::parse_accounts("[]").is_err());
    }
}
