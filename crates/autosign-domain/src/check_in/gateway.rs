use async_trait::async_trait;
use std::collections::HashMap;

use super::{CheckInOutcome, Provider, UserInfo};
use crate::shared::DomainError;

/// Authenticated API surface used by the check-in flow.
///
/// Both calls receive the merged cookie jar and the per-account `api_user`
/// identity value, sent under the provider's identity header name.
#[async_trait]
pub trait CheckInGateway: Send + Sync {
    /// Fetch quota figures for the account. Informational: callers treat a
    /// failure as missing data, never as a fatal fault.
    async fn fetch_user_info(
        &self,
        provider: &Provider,
        cookies: &HashMap<String, String>,
        api_user: &str,
    ) -> Result<UserInfo, DomainError>;

    /// Perform the check-in call and classify the response. An `Err` is
    /// reserved for transport-level faults; every readable response becomes
    /// a classified [`CheckInOutcome`].
    async fn check_in(
        &self,
        provider: &Provider,
        cookies: &HashMap<String, String>,
        api_user: &str,
    ) -> Result<CheckInOutcome, DomainError>;
}
