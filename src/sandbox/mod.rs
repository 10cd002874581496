//! Sandbox module for throwaway Composer install roots.
//!
//! This module provides the [`SandboxProvider`] trait for creating isolated
//! install directories and the [`TempDirSandbox`] implementation backed by
//! uniquely named temp directories.

mod provider;
mod tempdir;

pub use provider::{Manifest, Sandbox, SandboxProvider};
pub use tempdir::{remove_sandbox_dir, TempDirSandbox, TempDirSandboxInstance};
pub use tempdir::{MIN_SANDBOX_PATH_LEN, SANDBOX_PREFIX};
