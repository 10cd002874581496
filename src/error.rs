//! Error types for the composer-try tool.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for sandbox sessions.
#[derive(Error, Debug)]
pub enum Error {
    /// No Composer binary could be found in any candidate directory.
    #[error("composer binary not found")]
    ComposerNotFound,

    /// Failed to create the sandbox directory or its manifest.
    #[error("failed to create sandbox: {0}")]
    SandboxCreation(String),

    /// Failed to clean up the sandbox.
    #[error("failed to clean up sandbox at {path}: {reason}")]
    SandboxCleanup { path: PathBuf, reason: String },

    /// A package install returned non-zero or could not be spawned.
    #[error("failed to install package '{package}': {reason}")]
    PackageInstall { package: String, reason: String },

    /// The interactive shell could not be launched.
    #[error("failed to launch REPL: {0}")]
    ReplLaunch(String),

    /// The sandbox path is not safe to delete.
    #[error("invalid sandbox path: {0}")]
    InvalidPath(PathBuf),

    /// Session configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error during sandbox operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for sandbox sessions.
pub type Result<T> = std::result::Result<T, Error>;
