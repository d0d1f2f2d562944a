//! Local JSON file store.
//!
//! The menu lives in a single JSON file. Writes go through a `.tmp` file and
//! `rename()` so a crash never leaves a half-written menu. Reorder telemetry
//! is appended as JSON lines to `<file>.track.jsonl` next to it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::core::drop::ReorderEvent;
use crate::core::tree::Tree;
use crate::persistence::{NavigationStore, StoreError};

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where reorder events are appended.
    pub fn track_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".track.jsonl");
        PathBuf::from(name)
    }
}

#[async_trait]
impl NavigationStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load_tree(&self) -> Result<Tree, StoreError> {
        if !fs::try_exists(&self.path).await? {
            info!("No menu file at {}, starting empty", self.path.display());
            return Ok(Tree::default());
        }
        let json = fs::read_to_string(&self.path).await?;
        let tree: Tree = serde_json::from_str(&json).map_err(|e| StoreError::Parse(e.to_string()))?;
        tree.validate().map_err(StoreError::Invalid)?;
        debug!("Read {} items from {}", tree.len(), self.path.display());
        Ok(tree)
    }

    async fn save_tree(&self, tree: &Tree) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(tree)
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, json).await?;
        fs::rename(&tmp_path, &self.path).await?;
        info!("Saved menu to {}", self.path.display());
        Ok(())
    }

    async fn record_reorder(&self, event: &ReorderEvent) -> Result<(), StoreError> {
        let mut line =
            serde_json::to_string(event).map_err(|e| StoreError::Parse(e.to_string()))?;
        line.push('\n');
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.track_path())
            .await?;
        file.write_all(line.as_bytes()).await?;
        Ok(())
    }
}
