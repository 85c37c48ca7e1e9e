//! File-based snapshot source.
//!
//! Reads a complete metrics log from disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::snapshot::parse_records;
use super::{Snapshot, SnapshotSource};
use crate::error::{PipelineError, Result};

/// A source that reads newline-delimited snapshots from a file.
///
/// The whole file is read before anything is parsed, so an unreadable file
/// fails before any extraction runs.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }
}

impl SnapshotSource for FileSource {
    fn load(&mut self) -> Result<Vec<Snapshot>> {
        let content = fs::read_to_string(&self.path).map_err(|source| PipelineError::FileAccess {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = content.len(), "read metrics log");
        parse_records(&content)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
