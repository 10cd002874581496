//! composer-try CLI
//!
//! Installs the given Composer packages into a throwaway sandbox and opens
//! a psysh shell there. The sandbox is removed when the shell exits, when
//! an install fails, or when the process is interrupted.

use std::path::PathBuf;

use clap::Parser;

use composer_try::lifecycle::{wait_for_termination_signal, TeardownHandle};
use composer_try::repl::{PsyshRepl, ReplRunner};
use composer_try::sandbox::{SandboxProvider, TempDirSandbox};
use composer_try::session::{Session, SessionStatus};
use composer_try::{ComposerBin, SessionConfig, COMPOSER_BIN_DIR_ENV, COMPOSER_NOT_FOUND_HELP};

/// Try Composer packages in a disposable sandbox with a psysh shell.
#[derive(Parser, Debug)]
#[command(name = "composer-try", version, about)]
struct Cli {
    /// Packages to install, in order (e.g. `monolog/monolog`).
    #[arg(required = true)]
    packages: Vec<String>,

    /// Directory containing the `composer` binary, overriding discovery.
    #[arg(long, env = COMPOSER_BIN_DIR_ENV)]
    composer_bin_dir: Option<PathBuf>,

    /// PHP binary used for the version banner.
    #[arg(long, default_value = "php")]
    php_bin: String,

    /// Psysh binary to launch as the interactive shell.
    #[arg(long, default_value = "psysh")]
    psysh_bin: String,

    /// Base directory for the sandbox (default: next to this executable).
    #[arg(long)]
    sandbox_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    // Resolve Composer before any filesystem mutation: the tool cannot
    // function without it.
    let composer = match ComposerBin::discover(cli.composer_bin_dir) {
        Ok(composer) => composer,
        Err(_) => {
            eprintln!("{}", COMPOSER_NOT_FOUND_HELP);
            std::process::exit(1);
        }
    };

    let provider = TempDirSandbox::new(cli.sandbox_dir);

    // The teardown handle is created before the sandbox exists on disk;
    // removing an absent directory is a no-op, so any termination from
    // here on is safe.
    let teardown = TeardownHandle::new(provider.sandbox_path().clone());

    let config = SessionConfig::new(cli.packages).with_php_bin(cli.php_bin);
    let repl: Box<dyn ReplRunner> = Box::new(PsyshRepl::with_cli_path(cli.psysh_bin));

    let session = Session::new(provider, composer);

    // A signal cancels the session: dropping its future kills any
    // in-flight install or REPL subprocess (spawned with kill_on_drop)
    // before the sandbox is removed.
    let outcome = tokio::select! {
        outcome = session.run(&config, repl) => Some(outcome),
        _ = wait_for_termination_signal() => {
            tracing::info!("termination signal received, cleaning up sandbox");
            None
        }
    };

    teardown.teardown();

    let Some(outcome) = outcome else {
        std::process::exit(0);
    };

    match outcome {
        Ok(result) => {
            tracing::info!(
                status = ?result.status,
                installed = result.installed.len(),
                duration = ?result.duration,
                "session finished"
            );

            if result.status != SessionStatus::Completed {
                std::process::exit(2);
            }
        }
        Err(e) => {
            eprintln!("composer-try: {}", e);
            std::process::exit(2);
        }
    }
}
