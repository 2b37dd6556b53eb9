use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{Result, SubtitlerError};

/// Verifies that the external tools the pipeline drives are installed
pub struct SetupManager {
    required: Vec<String>,
}

impl SetupManager {
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.required_binaries())
    }

    /// Fail with every missing tool listed at once
    pub fn check_dependencies(&self) -> Result<()> {
        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|binary| match find_binary(binary) {
                Some(path) => {
                    debug!("Found {} at {}", binary, path.display());
                    false
                }
                None => true,
            })
            .cloned()
            .collect();

        if !missing.is_empty() {
            error!("Missing dependencies: {}", missing.join(", "));
            return Err(SubtitlerError::MissingDependencies(missing));
        }

        info!("All dependencies available: {}", self.required.join(", "));
        Ok(())
    }
}

/// Resolve `binary` like a shell would: paths are checked directly, bare
/// names are searched on `PATH`.
pub fn find_binary(binary: &str) -> Option<PathBuf> {
    let candidate = Path::new(binary);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var).find_map(|dir| {
        let full = dir.join(binary);
        if is_executable(&full) {
            return Some(full);
        }
        #[cfg(windows)]
        {
            let exe = dir.join(format!("{binary}.exe"));
            if is_executable(&exe) {
                return Some(exe);
            }
        }
        None
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
