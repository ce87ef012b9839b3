//! The singleton guard: at most one persistent daemon per user.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockError {
    /// The advisory lock is held by a live process.
    #[error("another instance is already running")]
    AlreadyRunning,
    /// The lock file could not be opened or locked for any other reason.
    #[error("failed to lock {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An exclusive advisory lock on the per-user lock file.
///
/// Held for the whole daemon run. The kernel drops the lock with the file
/// descriptor when the process exits, however it exits, so there is no
/// explicit unlock path.
#[derive(Debug)]
pub struct InstanceLock {
    _file: File,
}

impl InstanceLock {
    /// Opens `path` (creating it with mode 0600 if absent) and takes an
    /// exclusive lock without blocking. [`LockError::AlreadyRunning`]
    /// means another instance holds the lock right now; that is a policy
    /// violation, not a transient condition, so callers must not retry.
    pub fn acquire(path: &Path) -> Result<Self, LockError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .mode(0o600)
            .open(path)
            .map_err(|source| io_err(path, source))?;

        // flock(2): exclusive, non-blocking. EWOULDBLOCK is the one
        // expected failure and means a second instance.
        let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
        if rc == -1 {
            let err = io::Error::last_os_error();
            return Err(if err.kind() == io::ErrorKind::WouldBlock {
                LockError::AlreadyRunning
            } else {
                io_err(path, err)
            });
        }

        Ok(Self { _file: file })
    }
}

fn io_err(path: &Path, source: io::Error) -> LockError {
    LockError::Io {
        path: path.to_path_buf(),
        source,
    }
}
