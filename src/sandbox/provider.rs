//! Sandbox provider trait and types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;

/// The minimal `composer.json` written at the sandbox root before any
/// install runs.
///
/// Composer only needs the file to exist; an empty object is a valid
/// project descriptor, and `composer require` fills it in as packages
/// are added.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Manifest {}

impl Manifest {
    /// Renders the manifest as the JSON written to disk.
    pub fn to_json(&self) -> String {
        // An empty struct serializes to "{}".
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Represents an active sandbox directory.
pub trait Sandbox: Send + Sync {
    /// Returns the root directory path of the sandbox.
    fn path(&self) -> &PathBuf;

    /// Returns the path of the `composer.json` manifest inside the sandbox.
    fn manifest_path(&self) -> PathBuf;

    /// Cleans up the sandbox, removing the directory tree.
    ///
    /// Must be idempotent: a second call is a no-op.
    fn cleanup(&mut self) -> Result<()>;
}

/// Provider for creating sandbox directories.
pub trait SandboxProvider: Send + Sync {
    /// The type of sandbox this provider creates.
    type Sandbox: Sandbox;

    /// Computes the path the next sandbox would be created at, without
    /// touching the filesystem.
    fn sandbox_path(&self) -> &PathBuf;

    /// Materializes the sandbox on disk: creates the directory and writes
    /// the manifest.
    fn create(&self) -> Result<Self::Sandbox>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_serializes_to_empty_object() {
        assert_eq!(Manifest::default().to_json(), "{}");
    }

    #[test]
    fn manifest_roundtrips() {
        let manifest: Manifest = serde_json::from_str("{}").unwrap();
        assert_eq!(manifest.to_json(), "{}");
    }
}
