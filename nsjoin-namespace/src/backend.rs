//! Namespace backend trait for pluggable implementations

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nix::errno::Errno;
use nix::sched::{setns, CloneFlags};

/// The two kernel-facing primitives the joiner needs
///
/// This allows for different implementations:
/// - [`ProcfsBackend`] - Production, `open(2)` + `setns(2)`
/// - [`MockBackend`] - Testing without touching process state
///
/// The handle is released by dropping it.
pub trait NamespaceBackend {
    /// Open namespace handle
    type Handle;

    /// Open a namespace handle read-only
    ///
    /// # Errors
    /// Returns the underlying open error
    fn open(&self, path: &Path) -> std::io::Result<Self::Handle>;

    /// Move the calling thread into the network namespace behind `handle`
    ///
    /// # Errors
    /// Returns the errno reported by the kernel
    fn join_network(&self, handle: &Self::Handle) -> nix::Result<()>;
}

/// Backend operating on the real process filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcfsBackend;

impl NamespaceBackend for ProcfsBackend {
    type Handle = File;

    fn open(&self, path: &Path) -> std::io::Result<File> {
        // O_RDONLY | O_CLOEXEC
        File::open(path)
    }

    fn join_network(&self, handle: &File) -> nix::Result<()> {
        setns(handle, CloneFlags::CLONE_NEWNET)
    }
}

/// Something the mock backend observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEvent {
    /// A handle was opened
    Open(PathBuf),
    /// A join was attempted through the handle opened from this path
    Join(PathBuf),
    /// The handle opened from this path was dropped
    Close(PathBuf),
}

/// Mock backend for testing (records calls, never touches the kernel)
///
/// # Example
/// ```
/// use nsjoin_namespace::{JoinConfig, Joiner, MockBackend, MockEvent, Outcome};
/// use std::ffi::OsStr;
/// use std::path::PathBuf;
///
/// let backend = MockBackend::new();
/// let joiner = Joiner::with_backend(JoinConfig::default(), backend.clone());
///
/// let outcome = joiner.run_with_value(Some(OsStr::new("7"))).unwrap();
/// assert!(matches!(outcome, Outcome::Joined(_)));
///
/// let path = PathBuf::from("/proc/7/ns/net");
/// assert_eq!(
///     backend.events(),
///     vec![
///         MockEvent::Open(path.clone()),
///         MockEvent::Join(path.clone()),
///         MockEvent::Close(path),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    events: Vec<MockEvent>,
    open_error: Option<Errno>,
    join_error: Option<Errno>,
}

/// Handle produced by [`MockBackend`]; records its own release
#[derive(Debug)]
pub struct MockHandle {
    path: PathBuf,
    state: Arc<Mutex<MockState>>,
}

impl Drop for MockHandle {
    fn drop(&mut self) {
        lock(&self.state)
            .events
            .push(MockEvent::Close(self.path.clone()));
    }
}

fn lock(state: &Mutex<MockState>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockBackend {
    /// Create a new mock backend where every call succeeds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent open fail with `errno`
    #[must_use]
    pub fn failing_open(self, errno: Errno) -> Self {
        lock(&self.state).open_error = Some(errno);
        self
    }

    /// Make every subsequent join fail with `errno`
    #[must_use]
    pub fn failing_join(self, errno: Errno) -> Self {
        lock(&self.state).join_error = Some(errno);
        self
    }

    /// Everything observed so far, in order
    #[must_use]
    pub fn events(&self) -> Vec<MockEvent> {
        lock(&self.state).events.clone()
    }

    /// Number of handles opened
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.count(|e| matches!(e, MockEvent::Open(_)))
    }

    /// Number of join attempts
    #[must_use]
    pub fn join_count(&self) -> usize {
        self.count(|e| matches!(e, MockEvent::Join(_)))
    }

    /// Number of handles released
    #[must_use]
    pub fn close_count(&self) -> usize {
        self.count(|e| matches!(e, MockEvent::Close(_)))
    }

    fn count(&self, pred: impl Fn(&MockEvent) -> bool) -> usize {
        lock(&self.state).events.iter().filter(|e| pred(e)).count()
    }
}

impl NamespaceBackend for MockBackend {
    type Handle = MockHandle;

    fn open(&self, path: &Path) -> std::io::Result<MockHandle> {
        let mut state = lock(&self.state);
        if let Some(errno) = state.open_error {
            return Err(std::io::Error::from_raw_os_error(errno as i32));
        }

        state.events.push(MockEvent::Open(path.to_path_buf()));
        Ok(MockHandle {
            path: path.to_path_buf(),
            state: Arc::clone(&self.state),
        })
    }

    fn join_network(&self, handle: &MockHandle) -> nix::Result<()> {
        let mut state = lock(&self.state);
        state.events.push(MockEvent::Join(handle.path.clone()));

        match state.join_error {
            Some(errno) => Err(errno),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_open_and_close() {
        let backend = MockBackend::new();
        let path = Path::new("/proc/7/ns/net");

        let handle = backend.open(path).unwrap();
        assert_eq!(backend.open_count(), 1);
        assert_eq!(backend.close_count(), 0);

        drop(handle);
        assert_eq!(backend.close_count(), 1);
    }

    #[test]
    fn test_mock_open_failure_records_nothing() {
        let backend = MockBackend::new().failing_open(Errno::ENOENT);

        let err = backend.open(Path::new("/proc/7/ns/net")).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(Errno::ENOENT as i32));
        assert!(backend.events().is_empty());
    }

    #[test]
    fn test_mock_join_failure() {
        let backend = MockBackend::new().failing_join(Errno::EPERM);
        let handle = backend.open(Path::new("/proc/7/ns/net")).unwrap();

        assert_eq!(backend.join_network(&handle), Err(Errno::EPERM));
        assert_eq!(backend.join_count(), 1);
    }

    #[test]
    fn test_procfs_open_missing_path() {
        let err = ProcfsBackend
            .open(Path::new("/proc/nonexistent/ns/net"))
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_procfs_join_rejects_non_namespace_fd() {
        // A regular file is not a namespace handle
        let file = File::open("/proc/self/status").unwrap();
        assert!(ProcfsBackend.join_network(&file).is_err());
    }
}
