//! Process startup hook
//!
//! `setns(2)` with `CLONE_NEWNET` only moves the calling thread; threads
//! created afterwards inherit its namespace. Call [`init`] first thing in
//! `main`, before any thread (async runtimes included) is spawned and before
//! any socket is opened.

use std::io::Write;
use std::sync::Once;

use nsjoin_core::Error;

use crate::backend::NamespaceBackend;
use crate::joiner::{Joiner, Outcome};

/// Prefix of the single diagnostic line written on fatal errors
pub const DIAGNOSTIC_PREFIX: &str = "nsenter";

static HOOK: Once = Once::new();

/// Join the network namespace named by `_NSLISTENERPID`, at most once per
/// process.
///
/// Returns normally when the variable is unset or empty, or after a
/// successful join. On any error, writes one line to stderr and exits with
/// the error's status. Later calls do nothing.
pub fn init() {
    HOOK.call_once(|| {
        enter(&Joiner::with_defaults());
    });
}

/// Run `joiner` against the process environment, terminating the process on
/// error.
///
/// Unlike [`init`], this is not guarded and runs every time it is called.
///
/// The hook itself writes exactly one line to stderr on error. If a
/// `tracing` subscriber is already installed, the joiner's own error events
/// reach it as well, so a subscriber writing to stderr adds its lines there.
pub fn enter<B: NamespaceBackend>(joiner: &Joiner<B>) -> Outcome {
    match joiner.run() {
        Ok(outcome) => outcome,
        Err(err) => fail(&err),
    }
}

/// The stderr line for a fatal error
#[must_use]
pub fn diagnostic(err: &Error) -> String {
    format!("{DIAGNOSTIC_PREFIX}: {err}")
}

fn report(err: &Error, out: &mut impl Write) {
    // Nothing left to tell if stderr itself is gone
    let _ = writeln!(out, "{}", diagnostic(err));
}

fn fail(err: &Error) -> ! {
    report(err, &mut std::io::stderr().lock());
    std::process::exit(err.exit_code());
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsjoin_core::ParsePidError;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_diagnostic_malformed() {
        let err = Error::ConfigMalformed {
            variable: "_NSLISTENERPID".to_string(),
            source: "notanumber".parse::<nsjoin_core::TargetPid>().unwrap_err(),
        };

        assert_eq!(
            diagnostic(&err),
            "nsenter: unable to parse _NSLISTENERPID: invalid digit found in string"
        );
    }

    #[test]
    fn test_diagnostic_not_positive() {
        let err = Error::ConfigMalformed {
            variable: "_NSLISTENERPID".to_string(),
            source: ParsePidError::NotPositive(-5),
        };

        assert_eq!(
            diagnostic(&err),
            "nsenter: unable to parse _NSLISTENERPID: process id must be positive, got -5"
        );
    }

    #[test]
    fn test_diagnostic_is_single_line() {
        let err = Error::HandleUnavailable {
            path: PathBuf::from("/proc/999999/ns/net"),
            source: std::io::Error::from_raw_os_error(nix::errno::Errno::ENOENT as i32),
        };

        let line = diagnostic(&err);
        assert!(line.starts_with("nsenter: unable to open /proc/999999/ns/net: "));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_report_writes_one_line_with_subscriber_installed() {
        let stderr = SharedBuf::default();
        let writer = stderr.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();

        let err = Error::HandleUnavailable {
            path: PathBuf::from("/proc/999999999/ns/net"),
            source: std::io::Error::from_raw_os_error(nix::errno::Errno::ENOENT as i32),
        };

        tracing::subscriber::with_default(subscriber, || {
            let mut out = stderr.clone();
            report(&err, &mut out);
        });

        let written = stderr.contents();
        assert_eq!(written.lines().count(), 1, "got: {written:?}");
        assert!(written.starts_with("nsenter: unable to open /proc/999999999/ns/net: "));
    }
}
