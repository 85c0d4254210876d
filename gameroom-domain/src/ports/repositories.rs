use async_trait::async_trait;

use crate::entities::DatasetSnapshot;

#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Loads every export file available to the dashboard.
    /// Individual unreadable files are recorded in `DatasetSnapshot::failures`.
    async fn load_snapshot(&self) -> anyhow::Result<DatasetSnapshot>;
}
