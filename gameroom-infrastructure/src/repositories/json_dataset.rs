// JSON export directory loader
// Every `*.json` file in the data directory becomes one snapshot entry keyed
// by file stem. Unreadable files are skipped with a warning.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::fs;
use tracing::{info, warn};

use gameroom_domain::{DatasetRepository, DatasetSnapshot, LoadFailure};

pub struct JsonDirectoryRepository {
    data_dir: PathBuf,
}

impl JsonDirectoryRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    async fn json_files(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(&self.data_dir).await?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_json = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json && entry.file_type().await?.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

#[async_trait]
impl DatasetRepository for JsonDirectoryRepository {
    async fn load_snapshot(&self) -> anyhow::Result<DatasetSnapshot> {
        let mut snapshot = DatasetSnapshot {
            loaded_at: Some(Utc::now()),
            ..DatasetSnapshot::default()
        };

        let paths = match self.json_files().await {
            Ok(paths) => paths,
            Err(err) => {
                warn!("data directory {} unavailable: {}", self.data_dir.display(), err);
                snapshot.failures.push(LoadFailure {
                    file: self.data_dir.display().to_string(),
                    reason: err.to_string(),
                });
                return Ok(snapshot);
            }
        };

        for path in paths {
            let file = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            let Some(stem) = path.file_stem().map(|stem| stem.to_string_lossy().to_string())
            else {
                continue;
            };
            match read_json(&path).await {
                Ok(value) => {
                    snapshot.files.insert(stem, value);
                }
                Err(err) => {
                    warn!("skipping {}: {}", path.display(), err);
                    snapshot.failures.push(LoadFailure {
                        file,
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            dir = %self.data_dir.display(),
            files = snapshot.files.len(),
            failures = snapshot.failures.len(),
            "loaded dataset directory"
        );
        Ok(snapshot)
    }
}

async fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}
