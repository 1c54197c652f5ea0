//! Error types for nsjoin

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ParsePidError;

/// Fatal error kinds, each with a stable process exit status.
///
/// The discriminant *is* the exit status written by the startup hook, so the
/// numbering must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorKind {
    /// The join variable is set but is not a positive decimal pid
    ConfigMalformed = 1,
    /// The namespace handle of the target process could not be opened
    HandleUnavailable = 2,
    /// The kernel refused to move the process into the namespace
    JoinFailed = 3,
}

impl ErrorKind {
    /// Exit status used when terminating the process for this kind
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        self as i32
    }
}

/// nsjoin error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The join variable is present but malformed
    #[error("unable to parse {variable}: {source}")]
    ConfigMalformed {
        /// Name of the environment variable
        variable: String,
        /// Why the value was rejected
        #[source]
        source: ParsePidError,
    },

    /// Opening `/proc/<pid>/ns/net` failed
    #[error("unable to open {}: {source}", path.display())]
    HandleUnavailable {
        /// Namespace path that was opened
        path: PathBuf,
        /// Underlying open(2) error
        #[source]
        source: std::io::Error,
    },

    /// setns(2) failed
    #[error("unable to join network namespace {}: {source}", path.display())]
    JoinFailed {
        /// Namespace path the handle was opened from
        path: PathBuf,
        /// Underlying setns(2) error
        #[source]
        source: nix::Error,
    },
}

impl Error {
    /// The kind of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigMalformed { .. } => ErrorKind::ConfigMalformed,
            Self::HandleUnavailable { .. } => ErrorKind::HandleUnavailable,
            Self::JoinFailed { .. } => ErrorKind::JoinFailed,
        }
    }

    /// Exit status the startup hook terminates with for this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

/// Result type alias for nsjoin operations
pub type Result<T> = std::result::Result<T, Error>;
