//! The namespace joiner: lookup, resolve, join

use std::ffi::OsStr;

use nsjoin_core::{Error, Result, TargetPid};

use crate::backend::{NamespaceBackend, ProcfsBackend};
use crate::config::JoinConfig;
use crate::inspect::NetNamespace;

/// What a joiner run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No join was requested; nothing was touched
    Skipped,
    /// The process now lives in the network namespace of this pid
    Joined(TargetPid),
}

/// Rebinds the calling process's network-namespace membership
#[derive(Debug, Clone)]
pub struct Joiner<B = ProcfsBackend> {
    config: JoinConfig,
    backend: B,
}

impl Joiner {
    /// Create a joiner operating on the real process filesystem
    #[must_use]
    pub fn new(config: JoinConfig) -> Self {
        Self::with_backend(config, ProcfsBackend)
    }

    /// Create a joiner with the default configuration
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(JoinConfig::default())
    }
}

impl<B: NamespaceBackend> Joiner<B> {
    /// Create a joiner with a custom backend
    #[must_use]
    pub fn with_backend(config: JoinConfig, backend: B) -> Self {
        Self { config, backend }
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &JoinConfig {
        &self.config
    }

    /// Join the namespace requested by the process environment, if any
    ///
    /// # Errors
    /// Returns the first fatal error; see [`nsjoin_core::ErrorKind`]
    pub fn run(&self) -> Result<Outcome> {
        let target = self.config.lookup_process_env()?;
        self.run_for(target)
    }

    /// Join the namespace requested by a raw variable value, if any
    ///
    /// # Errors
    /// Returns the first fatal error; see [`nsjoin_core::ErrorKind`]
    pub fn run_with_value(&self, value: Option<&OsStr>) -> Result<Outcome> {
        let target = self.config.lookup(value)?;
        self.run_for(target)
    }

    fn run_for(&self, target: Option<TargetPid>) -> Result<Outcome> {
        let Some(pid) = target else {
            tracing::debug!(variable = %self.config.variable, "No network namespace requested");
            return Ok(Outcome::Skipped);
        };

        self.join(pid)?;
        Ok(Outcome::Joined(pid))
    }

    /// Join the network namespace of `pid`
    ///
    /// Opens exactly one handle and makes exactly one join attempt. The
    /// handle is closed before this returns, whatever the outcome.
    ///
    /// # Errors
    /// Returns [`Error::HandleUnavailable`] if the handle cannot be opened
    /// (no join is attempted then) or [`Error::JoinFailed`] if the kernel
    /// rejects the join.
    pub fn join(&self, pid: TargetPid) -> Result<()> {
        let path = self.config.ns_path(pid);

        tracing::debug!(pid = %pid, path = %path.display(), "Opening network namespace");

        let handle = self.backend.open(&path).map_err(|e| {
            tracing::error!(
                pid = %pid,
                path = %path.display(),
                error = %e,
                "Failed to open network namespace"
            );
            Error::HandleUnavailable {
                path: path.clone(),
                source: e,
            }
        })?;

        if let Err(e) = self.backend.join_network(&handle) {
            tracing::error!(
                pid = %pid,
                path = %path.display(),
                error = %e,
                "Failed to join network namespace"
            );
            return Err(Error::JoinFailed { path, source: e });
        }
        drop(handle);

        tracing::info!(
            pid = %pid,
            namespace = ?NetNamespace::current_thread().ok(),
            "Joined network namespace"
        );

        Ok(())
    }
}
