//! Score store backends.
//!
//! The file store keeps one JSON document per user at
//! `<dir>/<user_id>/progress.json`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use lexilearn_core::traits::ScoreStore;

/// In-process store; scores are lost when the process exits.
#[derive(Default)]
pub struct MemoryScoreStore {
    scores: Mutex<HashMap<String, u64>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn increment(&self, user_id: &str, delta: u64) -> Result<()> {
        let mut scores = self.scores.lock().await;
        let score = scores.entry(user_id.to_string()).or_insert(0);
        *score = score.saturating_add(delta);
        Ok(())
    }

    async fn read(&self, user_id: &str) -> Result<u64> {
        Ok(self.scores.lock().await.get(user_id).copied().unwrap_or(0))
    }
}

/// Per-user progress document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub score: u64,
    pub last_updated: DateTime<Utc>,
}

/// Store that persists each user's progress as JSON on disk.
pub struct JsonFileScoreStore {
    dir: PathBuf,
    // Serialises read-modify-write so concurrent increments are not lost.
    lock: Mutex<()>,
}

impl JsonFileScoreStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn progress_path(&self, user_id: &str) -> Result<PathBuf> {
        if user_id.is_empty()
            || user_id == "."
            || user_id == ".."
            || user_id.contains(['/', '\\'])
        {
            anyhow::bail!("invalid user id: {user_id:?}");
        }
        Ok(self.dir.join(user_id).join("progress.json"))
    }

    async fn load(&self, path: &Path) -> Result<Option<Progress>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let progress = serde_json::from_str(&content)
                    .with_context(|| format!("corrupt progress file: {}", path.display()))?;
                Ok(Some(progress))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("failed to read progress: {}", path.display()))
            }
        }
    }

    /// Full progress document for a user, if one exists.
    pub async fn progress(&self, user_id: &str) -> Result<Option<Progress>> {
        let path = self.progress_path(user_id)?;
        let _guard = self.lock.lock().await;
        self.load(&path).await
    }
}

#[async_trait]
impl ScoreStore for JsonFileScoreStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn increment(&self, user_id: &str, delta: u64) -> Result<()> {
        let path = self.progress_path(user_id)?;
        let _guard = self.lock.lock().await;

        let score = self
            .load(&path)
            .await?
            .map(|p| p.score)
            .unwrap_or(0)
            .saturating_add(delta);
        let progress = Progress {
            score,
            last_updated: Utc::now(),
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&progress)?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("failed to write progress: {}", path.display()))?;
        debug!(user_id, score, "progress saved");
        Ok(())
    }

    async fn read(&self, user_id: &str) -> Result<u64> {
        Ok(self.progress(user_id).await?.map(|p| p.score).unwrap_or(0))
    }
}
