//! Advisory locking of the state file through a sibling `.lock` file.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;

use crate::error::ErrorCode;

/// Interval between lock attempts while another process holds the lock.
const RETRY_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("{}: {} still locked after {waited:?}", ErrorCode::LockContention, .path.display())]
    Timeout { path: PathBuf, waited: Duration },

    #[error("{}: cannot open lock file {} ({source})", ErrorCode::StateWriteFailed, .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl LockError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Timeout { .. } => ErrorCode::LockContention,
            Self::Open { .. } => ErrorCode::StateWriteFailed,
        }
    }
}

/// How the state file is being accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Readers share the lock.
    Read,
    /// A writer excludes everyone else.
    Write,
}

/// Held for the duration of one read or one replace of the state file.
/// Dropping it releases the lock.
#[derive(Debug)]
pub struct StateLock {
    file: File,
    mode: LockMode,
}

impl StateLock {
    /// Lock `path` in `mode`, retrying until `timeout` has elapsed.
    ///
    /// # Errors
    ///
    /// [`LockError::Open`] if the lock file cannot be created and
    /// [`LockError::Timeout`] if another process keeps a conflicting lock.
    pub fn acquire(path: &Path, mode: LockMode, timeout: Duration) -> Result<Self, LockError> {
        let open_error = |source| LockError::Open {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(open_error)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(open_error)?;

        let deadline = Instant::now() + timeout;
        loop {
            let attempt = match mode {
                LockMode::Read => FileExt::try_lock_shared(&file),
                LockMode::Write => FileExt::try_lock_exclusive(&file),
            };
            if attempt.is_ok() {
                return Ok(Self { file, mode });
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(LockError::Timeout {
                    path: path.to_path_buf(),
                    waited: timeout,
                });
            }
            std::thread::sleep(RETRY_INTERVAL.min(deadline - now));
        }
    }

    #[must_use]
    pub const fn mode(&self) -> LockMode {
        self.mode
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
