//! Core type definitions with strong typing and validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Reasons a join variable value is not a usable pid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePidError {
    /// Not a base-10 integer (non-digits, trailing garbage, whitespace, overflow)
    #[error("{0}")]
    Invalid(#[from] ParseIntError),

    /// Parsed, but zero or negative
    #[error("process id must be positive, got {0}")]
    NotPositive(i32),

    /// The raw value is not valid UTF-8
    #[error("value is not valid unicode")]
    NotUnicode,
}

/// Identifier of the process whose network namespace is joined
///
/// Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(try_from = "i32", into = "i32")]
pub struct TargetPid(i32);

impl TargetPid {
    /// Create from a raw pid, rejecting zero and negative values
    ///
    /// # Errors
    /// Returns [`ParsePidError::NotPositive`] if `pid <= 0`
    pub fn new(pid: i32) -> Result<Self, ParsePidError> {
        if pid <= 0 {
            return Err(ParsePidError::NotPositive(pid));
        }
        Ok(Self(pid))
    }

    /// The current process
    #[must_use]
    pub fn current() -> Self {
        Self(nix::unistd::getpid().as_raw())
    }

    /// Convert to `nix::unistd::Pid`
    #[must_use]
    pub const fn as_nix_pid(self) -> nix::unistd::Pid {
        nix::unistd::Pid::from_raw(self.0)
    }

    /// Get raw PID value
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TargetPid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TargetPid {
    type Err = ParsePidError;

    /// Parse a whole string as a positive base-10 pid.
    ///
    /// Matches `strtol` with an end-of-string check, except that surrounding
    /// whitespace is rejected rather than skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pid: i32 = s.parse()?;
        Self::new(pid)
    }
}

impl TryFrom<i32> for TargetPid {
    type Error = ParsePidError;

    fn try_from(pid: i32) -> Result<Self, Self::Error> {
        Self::new(pid)
    }
}

impl From<TargetPid> for i32 {
    fn from(pid: TargetPid) -> Self {
        pid.0
    }
}

impl From<TargetPid> for nix::unistd::Pid {
    fn from(pid: TargetPid) -> Self {
        pid.as_nix_pid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!("7".parse::<TargetPid>().unwrap().as_raw(), 7);
        assert_eq!("999999".parse::<TargetPid>().unwrap().as_raw(), 999_999);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for value in ["abc", "12x", "notanumber", " 7", "7 ", "7\n", "0x10", "1.5"] {
            assert!(
                matches!(value.parse::<TargetPid>(), Err(ParsePidError::Invalid(_))),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        assert_eq!(
            "0".parse::<TargetPid>(),
            Err(ParsePidError::NotPositive(0))
        );
        assert_eq!(
            "-5".parse::<TargetPid>(),
            Err(ParsePidError::NotPositive(-5))
        );
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(matches!(
            "99999999999".parse::<TargetPid>(),
            Err(ParsePidError::Invalid(_))
        ));
    }

    #[test]
    fn test_target_pid_serde() {
        let pid = TargetPid::new(42).unwrap();
        let json = serde_json::to_string(&pid).unwrap();
        assert_eq!(json, "42");

        let back: TargetPid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pid);
        assert!(serde_json::from_str::<TargetPid>("0").is_err());
    }

    #[test]
    fn test_current_is_positive() {
        let pid = TargetPid::current();
        assert!(pid.as_raw() > 0);
        assert_eq!(pid.as_nix_pid(), nix::unistd::getpid());
    }
}
