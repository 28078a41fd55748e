use async_trait::async_trait;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("external platform request failed: {0}")]
    Upstream(String),
}

/// Pulls team data from the external fantasy platform into the store.
#[async_trait]
pub trait ExternalSync: Send + Sync {
    async fn sync_team(&self, team_id: i64) -> Result<(), SyncError>;
}

/// Sleeper platform sync. Currently records the request and does nothing else.
#[derive(Debug, Clone)]
pub struct SleeperSync {
    base_url: Url,
}

impl SleeperSync {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl ExternalSync for SleeperSync {
    async fn sync_team(&self, team_id: i64) -> Result<(), SyncError> {
        tracing::info!(team_id, base_url = %self.base_url, "Syncing team from Sleeper API");
        Ok(())
    }
}
