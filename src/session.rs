//! Sandbox session orchestration.
//!
//! This module drives the whole run: version banner, sandbox creation,
//! ordered fail-fast package installs, then handing the terminal to the
//! REPL.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::composer::ComposerBin;
use crate::config::{SessionConfig, Validate};
use crate::error::Result;
use crate::repl::ReplRunner;
use crate::sandbox::{Sandbox, SandboxProvider};

/// Status of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// All packages installed and the REPL exited normally.
    Completed,
    /// A package install failed; the REPL was never launched.
    InstallFailed,
}

/// Result of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    /// Status of the session.
    pub status: SessionStatus,
    /// Path of the sandbox directory used for the run.
    pub sandbox_path: PathBuf,
    /// Packages that were installed successfully, in install order.
    pub installed: Vec<String>,
    /// The package whose install failed, if any.
    pub failed_package: Option<String>,
    /// Duration of the session.
    pub duration: Duration,
}

/// Orchestrator that runs one sandbox session.
pub struct Session<P: SandboxProvider> {
    provider: P,
    composer: ComposerBin,
}

impl<P: SandboxProvider> Session<P> {
    /// Creates a new session with the given sandbox provider and a
    /// resolved Composer binary.
    pub fn new(provider: P, composer: ComposerBin) -> Self {
        Self { provider, composer }
    }

    /// Runs the session: create the sandbox, install every package in
    /// order, then block in the REPL until the user exits.
    ///
    /// Install failure is reported through [`SessionStatus::InstallFailed`]
    /// rather than an error: the run is over, but teardown and exit-code
    /// mapping still have work to do. Errors are reserved for the
    /// infrastructure itself (sandbox creation, REPL launch).
    pub async fn run(
        &self,
        config: &SessionConfig,
        repl: Box<dyn ReplRunner>,
    ) -> Result<SessionResult> {
        for warning in config.validate().into_result()? {
            tracing::warn!(%warning, "configuration warning");
        }

        if let Some(version) = php_version(&config.php_bin).await {
            println!("==> Use PHP \x1b[1m{}\x1b[0m", version);
        }

        let start_time = std::time::Instant::now();
        let mut sandbox = self.provider.create()?;

        tracing::info!(
            sandbox_path = ?sandbox.path(),
            packages = config.packages.len(),
            "initialized sandbox"
        );

        let mut installed = Vec::with_capacity(config.packages.len());

        for package in &config.packages {
            print!("[ ] Download \x1b[1m{}\x1b[0m from Composer", package);
            std::io::stdout().flush().ok();

            match self.composer.require(sandbox.path(), package).await {
                Ok(()) => {
                    println!("\r[*] Download \x1b[1m{}\x1b[0m from Composer", package);
                    installed.push(package.clone());
                }
                Err(e) => {
                    println!("\n\x1b[0;31mERROR: failed to download \x1b[1m{}\x1b[0m", package);
                    tracing::error!(error = %e, package = %package, "package install failed");

                    let result = SessionResult {
                        status: SessionStatus::InstallFailed,
                        sandbox_path: sandbox.path().clone(),
                        installed,
                        failed_package: Some(package.clone()),
                        duration: start_time.elapsed(),
                    };
                    finish(&mut sandbox);
                    return Ok(result);
                }
            }
        }

        let status = repl.run(sandbox.path()).await?;
        tracing::info!(repl = %repl.name(), exit = ?status.code(), "REPL exited");

        let result = SessionResult {
            status: SessionStatus::Completed,
            sandbox_path: sandbox.path().clone(),
            installed,
            failed_package: None,
            duration: start_time.elapsed(),
        };
        finish(&mut sandbox);
        Ok(result)
    }
}

/// Best-effort cleanup at the end of the normal control flow. The
/// lifecycle teardown handle covers the signal path and is a no-op once
/// this has run.
fn finish(sandbox: &mut impl Sandbox) {
    if let Err(e) = sandbox.cleanup() {
        tracing::warn!(error = %e, "sandbox cleanup failed, leaving directory behind");
    }
}

/// Returns the first line of `<php_bin> -v`, if PHP is available at all.
async fn php_version(php_bin: &str) -> Option<String> {
    let output = tokio::process::Command::new(php_bin)
        .arg("-v")
        .stdin(std::process::Stdio::null())
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
}
