use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Quota difference below which a balance is considered unchanged.
pub const QUOTA_EPSILON: f64 = 0.01;

/// Last-observed quota per account key.
///
/// Rewritten wholesale at the end of every run: accounts with no observation
/// this run drop out of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceSnapshot(BTreeMap<String, f64>);

impl BalanceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key used for the account at `index` of the configured list.
    pub fn account_key(index: usize) -> String {
        format!("account_{}", index + 1)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn record(&mut self, key: impl Into<String>, quota: f64) {
        self.0.insert(key.into(), quota);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a freshly observed quota warrants a notification against this
    /// (prior) snapshot: only when the account was seen before and moved by
    /// more than [`QUOTA_EPSILON`]. First-seen accounts are recorded
    /// silently.
    pub fn quota_changed(&self, key: &str, new_quota: f64) -> bool {
        match self.get(key) {
            Some(old_quota) => (new_quota - old_quota).abs() > QUOTA_EPSILON,
            None => false,
        }
    }
}
