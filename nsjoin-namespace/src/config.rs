//! Join configuration: where the target pid comes from and where its
//! namespace handle lives.

use std::ffi::OsStr;
use std::path::PathBuf;

use nsjoin_core::{Error, ParsePidError, Result, TargetPid};
use serde::{Deserialize, Serialize};

/// Environment variable an orchestrator sets to request a join
pub const DEFAULT_VARIABLE: &str = "_NSLISTENERPID";

/// Mount point of the process filesystem
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Join configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinConfig {
    /// Name of the environment variable holding the target pid
    pub variable: String,

    /// Root of the process filesystem
    pub proc_root: PathBuf,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            variable: DEFAULT_VARIABLE.to_string(),
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
        }
    }
}

impl JoinConfig {
    /// Create a new join configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the target pid from a different variable
    #[must_use]
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    /// Resolve namespace handles under a different process filesystem root
    #[must_use]
    pub fn with_proc_root(mut self, proc_root: impl Into<PathBuf>) -> Self {
        self.proc_root = proc_root.into();
        self
    }

    /// Interpret a raw variable value.
    ///
    /// `None` or an empty value means no join was requested. Anything else
    /// must be a positive decimal pid with nothing around it.
    ///
    /// # Errors
    /// Returns [`Error::ConfigMalformed`] if the value is set but unusable
    pub fn lookup(&self, value: Option<&OsStr>) -> Result<Option<TargetPid>> {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return Ok(None);
        };

        let parsed = value
            .to_str()
            .ok_or(ParsePidError::NotUnicode)
            .and_then(str::parse::<TargetPid>);

        parsed.map(Some).map_err(|source| Error::ConfigMalformed {
            variable: self.variable.clone(),
            source,
        })
    }

    /// Read and interpret the configured variable from the process environment
    ///
    /// # Errors
    /// Returns [`Error::ConfigMalformed`] if the variable is set but unusable
    pub fn lookup_process_env(&self) -> Result<Option<TargetPid>> {
        let value = std::env::var_os(&self.variable);
        self.lookup(value.as_deref())
    }

    /// Path of the network namespace handle of `pid`
    #[must_use]
    pub fn ns_path(&self, pid: TargetPid) -> PathBuf {
        self.proc_root.join(pid.to_string()).join("ns").join("net")
    }

    /// The `(name, value)` pair to put in a child's environment so that its
    /// startup hook joins the network namespace of `pid`.
    #[must_use]
    pub fn export(&self, pid: TargetPid) -> (String, String) {
        (self.variable.clone(), pid.to_string())
    }
}
