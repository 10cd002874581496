//! composer-try - try Composer packages in a disposable sandbox
//!
//! This library provides the core functionality for provisioning a
//! throwaway Composer install root, installing a list of packages into it,
//! launching an interactive psysh shell there, and guaranteeing the
//! sandbox is removed on every termination path.

pub mod composer;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod repl;
pub mod sandbox;
pub mod session;

pub use composer::{ComposerBin, COMPOSER_BIN_DIR_ENV, COMPOSER_NOT_FOUND_HELP};
pub use config::{SessionConfig, Validate, ValidationResult};
pub use error::Error;
pub use lifecycle::TeardownHandle;
pub use repl::{PsyshRepl, ReplRunner};
pub use sandbox::{Manifest, Sandbox, SandboxProvider, TempDirSandbox};
pub use session::{Session, SessionResult, SessionStatus};
