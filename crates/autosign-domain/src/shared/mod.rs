/// Character budget for diagnostics carried into results and reports.
pub const DIAGNOSTIC_LIMIT: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid account configuration: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("WAF cookie acquisition failed: {0}")]
    WafAcquisition(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Notification error: {0}")]
    Notification(String),
}

impl DomainError {
    /// Get the bare error message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            DomainError::Config(msg)
            | DomainError::Validation(msg)
            | DomainError::WafAcquisition(msg)
            | DomainError::Network(msg)
            | DomainError::Api(msg)
            | DomainError::Persistence(msg)
            | DomainError::Notification(msg) => msg,
        }
    }
}

/// Bound a diagnostic message to `max_chars`, marking the cut with an
/// ellipsis. Counts characters, not bytes, so multi-byte text stays intact.
pub fn truncate_message(message: &str, max_chars: usize) -> String {
    if message.chars().count() <= max_chars {
        return message.to_string();
    }
    let truncated: String = message.chars().take(max_chars).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_message_unchanged() {
        assert_eq!(truncate_message("connection refused", 50), "connection refused");
    }

    #[test]
    fn test_truncate_long_message() {
        let long = "x".repeat(80);
        let truncated = truncate_message(&long, 50);
        assert_eq!(truncated.len(), 53);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte_message() {
        let message = "错".repeat(60);
        let truncated = truncate_message(&message, 50);
        assert_eq!(truncated.chars().count(), 53);
    }

    #[test]
    fn test_error_message_accessor() {
        let err = DomainError::WafAcquisition("missing acw_sc__v2".to_string());
        assert_eq!(err.message(), "missing acw_sc__v2");
        assert!(err.to_string().contains("WAF cookie acquisition failed"));
    }
}
