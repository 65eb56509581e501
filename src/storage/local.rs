//! Local filesystem storage implementation.
//!
//! Writes every artifact atomically (write to temp, then rename) so a
//! crash between pages never leaves a half-written report behind.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::ProcessStats;
use crate::pipeline::state::ReportSnapshot;
use crate::storage::{
    FREQUENCIES_FILE, LONGEST_PAGE_FILE, ReportStorage, STATS_FILE, UNIQUE_PAGES_FILE,
};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Read an artifact as a string, returning None if it doesn't exist.
    pub async fn read_artifact(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl ReportStorage for LocalStorage {
    async fn write_reports(&self, snapshot: &ReportSnapshot) -> Result<()> {
        let mut report = String::new();
        for (token, count) in &snapshot.frequencies {
            report.push_str(&format!("{token} {count}\n"));
        }
        self.write_bytes(FREQUENCIES_FILE, report.as_bytes()).await?;

        self.write_bytes(
            UNIQUE_PAGES_FILE,
            format!("{}\n", snapshot.unique_pages).as_bytes(),
        )
        .await?;

        if let Some(longest) = &snapshot.longest {
            let record = format!(
                "{} {}\n\n{}\n",
                longest.url, longest.token_count, longest.text
            );
            self.write_bytes(LONGEST_PAGE_FILE, record.as_bytes()).await?;
        }

        log::debug!(
            "persisted reports: {} tokens, {} pages",
            snapshot.frequencies.len(),
            snapshot.unique_pages
        );
        Ok(())
    }

    async fn write_stats(&self, stats: &ProcessStats) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(stats)?;
        self.write_bytes(STATS_FILE, &bytes).await
    }
}
