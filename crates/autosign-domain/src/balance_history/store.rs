use async_trait::async_trait;

use super::BalanceSnapshot;
use crate::shared::DomainError;

/// Persistence seam for the balance snapshot.
#[async_trait]
pub trait BalanceSnapshotStore: Send + Sync {
    /// Load the previous run's snapshot. A missing or unreadable backing
    /// store yields an empty snapshot; loading is never fatal.
    async fn load(&self) -> BalanceSnapshot;

    /// Replace the persisted content with `snapshot`.
    async fn save(&self, snapshot: &BalanceSnapshot) -> Result<(), DomainError>;
}
