use super::Provider;
use crate::shared::DomainError;

/// Pre-flight business rules checked before any network activity.
pub struct CheckInPolicy;

impl CheckInPolicy {
    /// Validate the provider description.
    pub fn validate_provider(provider: &Provider) -> Result<(), DomainError> {
        if provider.domain().is_empty() {
            return Err(DomainError::Validation(
                "Provider domain is not configured".to_string(),
            ));
        }

        if !provider.domain().starts_with("http") {
            return Err(DomainError::Validation(
                "Provider domain must be an absolute origin".to_string(),
            ));
        }

        Ok(())
    }
}
