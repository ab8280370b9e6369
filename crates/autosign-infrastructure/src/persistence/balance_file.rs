use async_trait::async_trait;
use log::warn;
use std::path::{Path, PathBuf};

use autosign_domain::balance_history::{BalanceSnapshot, BalanceSnapshotStore};
use autosign_domain::shared::DomainError;

/// Balance snapshot persisted as a single JSON object on disk, overwritten
/// wholesale every run.
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the platform data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("autosign")
            .join("balance_history.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BalanceSnapshotStore for JsonFileSnapshotStore {
    async fn load(&self) -> BalanceSnapshot {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(
                        "Balance history at {:?} is corrupt ({}), starting from an empty snapshot",
                        self.path, e
                    );
                    BalanceSnapshot::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BalanceSnapshot::new(),
            Err(e) => {
                warn!("Failed to read balance history at {:?}: {}", self.path, e);
                BalanceSnapshot::new()
            }
        }
    }

    async fn save(&self, snapshot: &BalanceSnapshot) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::Persistence(format!("Failed to create {:?}: {}", parent, e))
            })?;
        }

        let contents = serde_json::to_string_pretty(snapshot).map_err(|e| {
            DomainError::Persistence(format!("Failed to serialize balance snapshot: {}", e))
        })?;

        tokio::fs::write(&self.path, contents).await.map_err(|e| {
            DomainError::Persistence(format!("Failed to write {:?}: {}", self.path, e))
        })?;

        Ok(())
    }
}
