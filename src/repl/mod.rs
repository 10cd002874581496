//! Interactive REPL runners.
//!
//! The REPL is an external collaborator launched inside the sandbox once
//! all packages are installed.

mod psysh;

pub use psysh::PsyshRepl;

use std::path::Path;
use std::process::ExitStatus;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for interactive REPL runners.
#[async_trait]
pub trait ReplRunner: Send + Sync {
    /// Launches the REPL with `working_dir` as its current directory and
    /// blocks until the user exits it.
    async fn run(&self, working_dir: &Path) -> Result<ExitStatus>;

    /// Returns the name of this runner.
    fn name(&self) -> &str;
}
