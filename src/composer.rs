//! Composer binary discovery and install invocations.
//!
//! Composer is an external collaborator: it is resolved once at startup by
//! probing a fixed list of candidate directories, then invoked as
//! `composer require <package>` with the sandbox as the working directory.
//! Arguments are passed as a vector, never through a shell.

use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::error::{Error, Result};

/// Environment variable naming an explicit Composer bin directory.
///
/// When set, it takes precedence over the fallback candidate chain.
pub const COMPOSER_BIN_DIR_ENV: &str = "COMPOSER_BIN_DIR";

/// Remediation text printed when no Composer binary can be found.
pub const COMPOSER_NOT_FOUND_HELP: &str = "\
You need to set up your project's dependencies using Composer:

    composer install

You can learn more about Composer on https://getcomposer.org/.
";

/// A resolved Composer executable.
#[derive(Debug, Clone)]
pub struct ComposerBin {
    bin_path: PathBuf,
}

impl ComposerBin {
    /// Resolves the Composer binary.
    ///
    /// Probes candidate directories in order and takes the first that is
    /// readable; the binary is `<dir>/composer`. With an override
    /// directory the fallback chain is not consulted at all.
    pub fn discover(override_dir: Option<PathBuf>) -> Result<Self> {
        for dir in Self::candidate_dirs(override_dir) {
            if !dir.is_dir() {
                continue;
            }

            // Installs run with the sandbox as the working directory, so
            // the binary path must survive that cwd change: canonicalize
            // relative and dotted candidates.
            let Ok(dir) = std::fs::canonicalize(&dir) else {
                continue;
            };

            let bin_path = dir.join("composer");
            tracing::debug!(path = ?bin_path, "resolved composer binary");
            return Ok(Self { bin_path });
        }

        Err(Error::ComposerNotFound)
    }

    /// Creates a client for an explicit binary path. Used by tests with
    /// stub executables.
    pub fn with_path(bin_path: impl Into<PathBuf>) -> Self {
        Self {
            bin_path: bin_path.into(),
        }
    }

    /// Returns the resolved binary path.
    pub fn path(&self) -> &Path {
        &self.bin_path
    }

    fn candidate_dirs(override_dir: Option<PathBuf>) -> Vec<PathBuf> {
        if let Some(dir) = override_dir {
            return vec![dir];
        }

        let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        else {
            return vec![];
        };

        vec![
            exe_dir.join("../../bin"),
            exe_dir.join("../bin"),
            exe_dir.join("../vendor/bin"),
            exe_dir.join("vendor/bin"),
        ]
    }

    /// Runs `composer require <package>` inside the sandbox.
    ///
    /// Blocks until the subprocess exits; one attempt, no retry. Composer's
    /// own output is captured rather than inherited so the per-package
    /// progress line stays intact.
    pub async fn require(&self, sandbox: &Path, package: &str) -> Result<()> {
        tracing::info!(package = %package, sandbox = ?sandbox, "installing package");

        let output = Command::new(&self.bin_path)
            .arg("require")
            .arg(package)
            .current_dir(sandbox)
            .stdin(std::process::Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Error::PackageInstall {
                package: package.to_string(),
                reason: format!("failed to spawn composer: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::PackageInstall {
                package: package.to_string(),
                reason: format!("composer exited with {}: {}", output.status, stderr.trim()),
            });
        }

        Ok(())
    }
}
