//! Network namespace join hook
//!
//! Moves the current process into the network namespace of another process,
//! named by the `_NSLISTENERPID` environment variable, before the program
//! opens any socket:
//! - Configuration lookup - read and validate the target pid
//! - Namespace resolution - `/proc/<pid>/ns/net`
//! - Namespace join - open the handle, `setns(2)`, close the handle
//!
//! ```no_run
//! fn main() {
//!     nsjoin_namespace::init();
//!     // sockets opened from here on live in the requested namespace
//! }
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod backend;
pub mod config;
pub mod hook;
pub mod inspect;
pub mod joiner;

pub use backend::{MockBackend, MockEvent, MockHandle, NamespaceBackend, ProcfsBackend};
pub use config::{JoinConfig, DEFAULT_PROC_ROOT, DEFAULT_VARIABLE};
pub use hook::{diagnostic, enter, init};
pub use inspect::NetNamespace;
pub use joiner::{Joiner, Outcome};
