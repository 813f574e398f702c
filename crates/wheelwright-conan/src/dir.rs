//! Build directory lifecycle.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

use crate::ToolResult;

/// Where one build operation runs.
///
/// A persistent directory is created on first use, reused across
/// invocations (the external tool performs its own incremental-build
/// detection) and never deleted by the engine. An ephemeral directory is
/// a [`TempDir`] handle: dropping it — on success, failure, or unwind —
/// removes the tree, which is the scoped-acquisition guarantee the
/// orchestrator relies on. Ephemeral directories are never reused across
/// operations.
#[derive(Debug)]
pub enum BuildDir {
    Persistent(PathBuf),
    Ephemeral(TempDir),
}

impl BuildDir {
    /// Resolve from the `build-dir` setting.
    pub fn resolve(configured: Option<&Path>) -> ToolResult<Self> {
        match configured {
            Some(path) => {
                fs::create_dir_all(path)?;
                info!(dir = %path.display(), "using persistent build directory");
                Ok(Self::Persistent(path.to_path_buf()))
            }
            None => {
                let temp = TempDir::new()?;
                debug!(dir = %temp.path().display(), "using ephemeral build directory");
                Ok(Self::Ephemeral(temp))
            }
        }
    }

    /// The directory path for this operation.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Persistent(path) => path,
            Self::Ephemeral(temp) => temp.path(),
        }
    }
}
