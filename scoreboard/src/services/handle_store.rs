//! File-backed handle store
//!
//! Keeps the published message handles in one text file as a comma
//! separated list. Writes go through a temporary file that is renamed over
//! the target, so a crash mid-write leaves the previous list intact.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use shared::{component_debug, Component, MessageHandle};

use crate::error::{ScoreboardError, ScoreboardResult};
use crate::traits::HandleStore;

pub const DEFAULT_HANDLES_FILE: &str = "/app/data/message_ids.txt";

/// Real handle store using the local file system
pub struct FileHandleStore {
    path: PathBuf,
}

impl FileHandleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "message_ids".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn error(&self, operation: &str, e: impl std::fmt::Display) -> ScoreboardError {
        ScoreboardError::persistence(operation, self.path.display().to_string(), e.to_string())
    }
}

impl Default for FileHandleStore {
    fn default() -> Self {
        Self::new(DEFAULT_HANDLES_FILE)
    }
}

/// Parse the stored list, ignoring blanks between separators
pub fn parse_handles(content: &str) -> ScoreboardResult<Vec<MessageHandle>> {
    content
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| MessageHandle::new(id).map_err(ScoreboardError::from))
        .collect()
}

/// Render handles in the stored list format
pub fn render_handles(handles: &[MessageHandle]) -> String {
    handles
        .iter()
        .map(MessageHandle::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl HandleStore for FileHandleStore {
    async fn load_handles(&self) -> ScoreboardResult<Vec<MessageHandle>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.error("load", e)),
        };
        let handles = parse_handles(&content).map_err(|e| self.error("load", e))?;
        component_debug!(
            Component::Store,
            "Read {} handles from {}",
            handles.len(),
            self.path.display()
        );
        Ok(handles)
    }

    async fn save_handles(&self, handles: &[MessageHandle]) -> ScoreboardResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| self.error("save", e))?;
        }

        let temp = self.temp_path();
        fs::write(&temp, render_handles(handles))
            .await
            .map_err(|e| self.error("save", e))?;
        fs::rename(&temp, &self.path).await.map_err(|e| self.error("save", e))?;

        component_debug!(
            Component::Store,
            "💾 Saved {} handles to {}",
            handles.len(),
            self.path.display()
        );
        Ok(())
    }
}
