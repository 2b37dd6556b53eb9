use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::Result;

pub const WORKDIR_PREFIX: &str = "subtitler_";

/// Per-run scratch directory for the intermediate WAV and SRT files.
///
/// Not removed on drop: a failed run leaves it behind for inspection.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
}

impl WorkDir {
    /// Create a fresh directory under the system temp dir
    pub fn create() -> Result<Self> {
        Self::create_in(std::env::temp_dir())
    }

    pub fn create_in<P: AsRef<Path>>(parent: P) -> Result<Self> {
        let path = tempfile::Builder::new()
            .prefix(WORKDIR_PREFIX)
            .tempdir_in(parent)?
            .keep();
        debug!("Created temporary directory: {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join<P: AsRef<Path>>(&self, name: P) -> PathBuf {
        self.path.join(name)
    }

    /// Remove the directory unless `keep` is set. Removal is best-effort.
    pub fn finish(self, keep: bool) {
        if keep {
            info!("Temporary files kept at: {}", self.path.display());
            return;
        }

        info!("Cleaning up temporary files...");
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            warn!("Failed to remove temporary directory {}: {}", self.path.display(), e);
        }
    }
}
