mod store;
mod types;

pub use store::BalanceSnapshotStore;
pub use types::{BalanceSnapshot, QUOTA_EPSILON};
