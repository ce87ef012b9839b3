//! Detaches the process from its terminal and points its output at the
//! log file.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use anyhow::{Context, Result};

/// Forks twice, with each parent exiting immediately, so the surviving
/// process is reparented and can no longer reacquire a controlling
/// terminal. stdout and stderr are then redirected to the log file at
/// `log_path` (created or truncated).
///
/// Returns in the final background process. The log file is the only
/// diagnostic channel after this call, so failing to open it is fatal.
pub fn daemonize(log_path: &Path) -> Result<()> {
    // SAFETY: the daemon is single-threaded here; nothing holds locks
    // across the forks.
    unsafe {
        fork_detach()?;
        fork_detach()?;
    }

    // Still attached to the invoking terminal: tell the user where the
    // output goes before cutting the cord.
    println!("daemonizing, log output stored in {}", log_path.display());

    let log = open_log_file(log_path)?;
    redirect_stdio(&log)
}

/// Forks once; the parent exits immediately and the child returns.
unsafe fn fork_detach() -> Result<()> {
    match libc::fork() {
        -1 => Err(io::Error::last_os_error()).context("fork failed"),
        0 => Ok(()),
        _ => libc::_exit(0),
    }
}

/// Opens (creating or truncating) the daemon log file.
pub(crate) fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Replaces stdout and stderr with `log`. The terminal-attached streams
/// are gone after this.
fn redirect_stdio(log: &File) -> Result<()> {
    let fd = log.as_raw_fd();
    // SAFETY: duplicating an owned, open descriptor over our own stdio.
    let rc = unsafe {
        if libc::dup2(fd, libc::STDOUT_FILENO) == -1 {
            -1
        } else {
            libc::dup2(fd, libc::STDERR_FILENO)
        }
    };
    if rc == -1 {
        return Err(io::Error::last_os_error()).context("failed to redirect stdio to the log file");
    }
    Ok(())
}
