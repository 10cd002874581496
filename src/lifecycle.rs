//! Process-exit lifecycle: guaranteed, idempotent sandbox teardown.
//!
//! One [`TeardownHandle`] guards the run's sandbox path; `main` races the
//! session against [`wait_for_termination_signal`] so that a signal
//! cancels the session (dropping and killing any in-flight subprocess)
//! before the shared teardown runs. The removal runs effectively once on
//! every termination path.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::sandbox::remove_sandbox_dir;

struct Inner {
    path: PathBuf,
    done: AtomicBool,
}

/// Shared, idempotent teardown routine for the run's sandbox directory.
#[derive(Clone)]
pub struct TeardownHandle {
    inner: Arc<Inner>,
}

impl TeardownHandle {
    /// Creates a handle for the given sandbox path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            inner: Arc::new(Inner {
                path,
                done: AtomicBool::new(false),
            }),
        }
    }

    /// Returns the sandbox path this handle guards.
    pub fn path(&self) -> &PathBuf {
        &self.inner.path
    }

    /// Returns true once teardown has been attempted.
    pub fn has_run(&self) -> bool {
        self.inner.done.load(Ordering::SeqCst)
    }

    /// Removes the sandbox directory, best-effort.
    ///
    /// The first caller wins; later calls are no-ops. Removal failure is
    /// logged and never escalated, so this is safe on every exit path.
    pub fn teardown(&self) {
        if self.inner.done.swap(true, Ordering::SeqCst) {
            return;
        }

        match remove_sandbox_dir(&self.inner.path) {
            Ok(()) => tracing::debug!(path = ?self.inner.path, "sandbox removed"),
            Err(e) => tracing::warn!(error = %e, path = ?self.inner.path, "sandbox teardown failed"),
        }
    }

}

/// Resolves when SIGINT or SIGTERM is delivered.
///
/// Intended as a `tokio::select!` arm racing the session: when it wins,
/// the session future is dropped, which kills any in-flight subprocess
/// spawned with `kill_on_drop`, and the caller tears down and exits 0.
#[cfg(unix)]
pub async fn wait_for_termination_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to register SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

/// Resolves when ctrl-c is delivered.
#[cfg(not(unix))]
pub async fn wait_for_termination_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
