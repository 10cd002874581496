//! Temp-directory sandbox implementation.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::provider::{Manifest, Sandbox, SandboxProvider};

/// Prefix for sandbox directory names.
pub const SANDBOX_PREFIX: &str = "try_sandbox__";

/// Length threshold for the destructive cleanup step: only paths strictly
/// longer than this are ever removed.
///
/// Guards against ever pointing `remove_dir_all` at something like `/` or
/// `/tmp` through a mangled path.
pub const MIN_SANDBOX_PATH_LEN: usize = 16;

/// Removes a sandbox directory tree, with safety guards.
///
/// Refuses paths of [`MIN_SANDBOX_PATH_LEN`] characters or fewer. A path
/// that does not exist is a successful no-op, which is what makes
/// teardown callers idempotent.
pub fn remove_sandbox_dir(path: &Path) -> Result<()> {
    if path.as_os_str().len() <= MIN_SANDBOX_PATH_LEN {
        return Err(Error::InvalidPath(path.to_path_buf()));
    }

    if !path.exists() {
        return Ok(());
    }

    std::fs::remove_dir_all(path).map_err(|e| Error::SandboxCleanup {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// A sandbox backed by a uniquely named directory.
pub struct TempDirSandboxInstance {
    /// Path to the sandbox directory.
    path: PathBuf,
    /// Whether the sandbox has been cleaned up.
    cleaned_up: bool,
}

impl Sandbox for TempDirSandboxInstance {
    fn path(&self) -> &PathBuf {
        &self.path
    }

    fn manifest_path(&self) -> PathBuf {
        self.path.join("composer.json")
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.cleaned_up {
            return Ok(());
        }

        remove_sandbox_dir(&self.path)?;
        self.cleaned_up = true;
        Ok(())
    }
}

impl Drop for TempDirSandboxInstance {
    fn drop(&mut self) {
        if !self.cleaned_up {
            if let Err(e) = self.cleanup() {
                tracing::error!(error = %e, path = ?self.path, "failed to cleanup sandbox on drop");
            }
        }
    }
}

/// Provider that creates sandboxes under a fixed base directory.
///
/// The sandbox path is computed once at construction; nothing touches the
/// filesystem until [`SandboxProvider::create`] is called. One provider
/// corresponds to one sandbox per run.
#[derive(Clone)]
pub struct TempDirSandbox {
    sandbox_path: PathBuf,
}

impl TempDirSandbox {
    /// Creates a new provider.
    ///
    /// If `base_dir` is provided, the sandbox is created there. Otherwise
    /// it is placed next to the running executable, falling back to the
    /// system temp directory when the executable path cannot be resolved.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        let base = base_dir.unwrap_or_else(Self::default_base_dir);
        let token = uuid::Uuid::new_v4().simple().to_string();
        let sandbox_path = base.join(format!("{SANDBOX_PREFIX}{token}"));

        Self { sandbox_path }
    }

    fn default_base_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(std::env::temp_dir)
    }
}

impl SandboxProvider for TempDirSandbox {
    type Sandbox = TempDirSandboxInstance;

    fn sandbox_path(&self) -> &PathBuf {
        &self.sandbox_path
    }

    fn create(&self) -> Result<Self::Sandbox> {
        std::fs::create_dir_all(&self.sandbox_path)
            .map_err(|e| Error::SandboxCreation(format!("mkdir failed: {}", e)))?;

        let instance = TempDirSandboxInstance {
            path: self.sandbox_path.clone(),
            cleaned_up: false,
        };

        std::fs::write(instance.manifest_path(), Manifest::default().to_json())
            .map_err(|e| Error::SandboxCreation(format!("writing composer.json failed: {}", e)))?;

        tracing::info!(path = ?self.sandbox_path, "created sandbox");

        Ok(instance)
    }
}
