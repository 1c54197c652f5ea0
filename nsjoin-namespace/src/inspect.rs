//! Read-only view of a process's network namespace identity

use std::fmt;
use std::path::Path;

use nsjoin_core::TargetPid;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PROC_ROOT;

/// Identity of a network namespace as exposed by `/proc/<pid>/ns/net`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetNamespace {
    /// Raw link target, e.g. `net:[4026531840]`
    pub link: String,

    /// Namespace inode number, if the link has the usual shape
    pub inode: Option<u64>,
}

impl NetNamespace {
    /// Network namespace of the calling process
    ///
    /// # Errors
    /// Returns error if the link cannot be read
    pub fn current() -> std::io::Result<Self> {
        Self::read(&Path::new(DEFAULT_PROC_ROOT).join("self/ns/net"))
    }

    /// Network namespace of the calling thread
    ///
    /// Differs from [`NetNamespace::current`] only if threads were moved
    /// individually.
    ///
    /// # Errors
    /// Returns error if the link cannot be read
    pub fn current_thread() -> std::io::Result<Self> {
        Self::read(&Path::new(DEFAULT_PROC_ROOT).join("thread-self/ns/net"))
    }

    /// Network namespace of `pid` under `proc_root`
    ///
    /// # Errors
    /// Returns error if the link cannot be read (missing process, permissions)
    pub fn of(proc_root: &Path, pid: TargetPid) -> std::io::Result<Self> {
        Self::read(&proc_root.join(pid.to_string()).join("ns").join("net"))
    }

    fn read(path: &Path) -> std::io::Result<Self> {
        let link = std::fs::read_link(path)?.to_string_lossy().into_owned();
        Ok(Self::from_link(link))
    }

    /// Build from a link target string
    #[must_use]
    pub fn from_link(link: impl Into<String>) -> Self {
        let link = link.into();
        let inode = link
            .strip_prefix("net:[")
            .and_then(|rest| rest.strip_suffix(']'))
            .and_then(|n| n.parse().ok());
        Self { link, inode }
    }

    /// Whether this is the namespace of the init process (pid 1)
    ///
    /// # Errors
    /// Returns error if pid 1's namespace cannot be read, typically when not root
    pub fn is_host(&self, proc_root: &Path) -> std::io::Result<bool> {
        let init = Self::read(&proc_root.join("1/ns/net"))?;
        Ok(init.link == self.link)
    }
}

impl fmt::Display for NetNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.link)
    }
}
