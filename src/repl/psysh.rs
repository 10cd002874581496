//! Psysh REPL runner.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};

use super::ReplRunner;

/// Runner for the psysh interactive PHP shell.
///
/// Psysh picks up `vendor/autoload.php` from its working directory, so the
/// sandbox's installed packages are available inside the shell.
pub struct PsyshRepl {
    /// Path to the psysh binary.
    cli_path: String,
}

impl Default for PsyshRepl {
    fn default() -> Self {
        Self::new()
    }
}

impl PsyshRepl {
    /// Creates a new runner using the default `psysh` command.
    pub fn new() -> Self {
        Self {
            cli_path: "psysh".to_string(),
        }
    }

    /// Creates a new runner with a custom binary path.
    pub fn with_cli_path(cli_path: impl Into<String>) -> Self {
        Self {
            cli_path: cli_path.into(),
        }
    }
}

#[async_trait]
impl ReplRunner for PsyshRepl {
    async fn run(&self, working_dir: &Path) -> Result<ExitStatus> {
        tracing::info!(cli = %self.cli_path, working_dir = ?working_dir, "launching psysh");

        // The shell is interactive: it owns the terminal until the user
        // exits, so stdio is inherited rather than piped.
        let mut child = Command::new(&self.cli_path)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::ReplLaunch(format!("failed to spawn psysh: {}", e)))?;

        let status = child
            .wait()
            .await
            .map_err(|e| Error::ReplLaunch(format!("failed to wait for psysh: {}", e)))?;

        Ok(status)
    }

    fn name(&self) -> &str {
        "psysh"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psysh_repl_has_correct_name() {
        let repl = PsyshRepl::new();
        assert_eq!(repl.name(), "psysh");
    }

    #[test]
    fn psysh_repl_with_custom_path() {
        let repl = PsyshRepl::with_cli_path("/usr/local/bin/psysh");
        assert_eq!(repl.cli_path, "/usr/local/bin/psysh");
    }

    #[tokio::test]
    async fn psysh_repl_reports_spawn_failure() {
        let repl = PsyshRepl::with_cli_path("/no/such/psysh");
        let result = repl.run(Path::new("/tmp")).await;
        assert!(matches!(result, Err(Error::ReplLaunch(_))));
    }
}
