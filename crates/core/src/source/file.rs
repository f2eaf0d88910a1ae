use super::SnapshotSource;
use crate::config::Settings;
use crate::domain::snapshot::Snapshot;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.snapshot_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl SnapshotSource for FileSnapshotSource {
    fn source_name(&self) -> &'static str {
        "file"
    }

    async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read snapshot {}", self.path.display()))?;
        Snapshot::from_json_str(&text)
            .with_context(|| format!("failed to parse snapshot {}", self.path.display()))
    }
}
