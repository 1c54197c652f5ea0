//! nsjoin Core - Foundation types and errors
//!
//! This crate provides the error taxonomy and the validated target pid shared
//! by the namespace joiner and the CLI.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use types::{ParsePidError, TargetPid};
