//! File-based locking so only one hyperglide run touches a manifest at a time.
//!
//! Two concurrent runs on the same manifest would interleave their renames
//! and could leave the generated manifest in place of the user's. The lock
//! lives next to the manifest as `<manifest>.hyperglide.lock`.
//!
//! The lock file is never deleted. A waiter may already hold an open handle
//! on it, and unlinking would let a later run lock a fresh file at the same
//! path while the waiter locks the old one.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Suffix appended to the manifest path to form the lock path.
pub const RUN_LOCK_SUFFIX: &str = ".hyperglide.lock";

#[derive(Debug, Serialize, Deserialize)]
pub struct RunLockMetadata {
  pub version: u32,
  pub pid: u32,
  pub started_at_unix: u64,
  pub command: String,
  pub manifest: PathBuf,
}

#[derive(Debug, Error)]
pub enum RunLockError {
  #[error(
    "{manifest} is locked by another hyperglide process: {command} (PID {pid}, started {started_at})\n\
             If you're sure no hyperglide process is running, remove the lock file:\n  {lock_path}"
  )]
  Contention {
    manifest: PathBuf,
    command: String,
    pid: u32,
    started_at: String,
    lock_path: PathBuf,
  },

  #[error(
    "{manifest} is locked (could not read lock metadata)\n\
             If you're sure no hyperglide process is running, remove the lock file:\n  {lock_path}"
  )]
  ContentionUnknown { manifest: PathBuf, lock_path: PathBuf },

  #[error("Failed to open lock file: {0}")]
  OpenFile(#[source] io::Error),

  #[error("Failed to write lock metadata: {0}")]
  WriteMetadata(#[source] io::Error),

  #[error("Failed to acquire lock: {0}")]
  LockFailed(#[source] io::Error),
}

/// Returns the lock path for a manifest path.
pub fn run_lock_path(manifest: &Path) -> PathBuf {
  let mut name = OsString::from(manifest.as_os_str());
  name.push(RUN_LOCK_SUFFIX);
  PathBuf::from(name)
}

/// An exclusive lock on a manifest, released on drop.
#[derive(Debug)]
pub struct RunLock {
  file: File,
  lock_path: PathBuf,
}

impl RunLock {
  /// Reads the lock metadata from the held file handle.
  pub fn read_metadata(&self) -> io::Result<RunLockMetadata> {
    use std::io::{Seek, SeekFrom};

    let mut file = &self.file;
    file.seek(SeekFrom::Start(0))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    serde_json::from_str(&contents).map_err(io::Error::other)
  }

  /// Take the lock for `manifest` without blocking.
  pub fn acquire(manifest: &Path, command: &str) -> Result<Self, RunLockError> {
    let lock_path = run_lock_path(manifest);

    let file = OpenOptions::new()
      .read(true)
      .write(true)
      .create(true)
      .truncate(false)
      .open(&lock_path)
      .map_err(RunLockError::OpenFile)?;

    if let Err(err) = try_lock(&file) {
      if err.kind() == io::ErrorKind::WouldBlock {
        return Err(Self::read_contention_error(manifest, &lock_path));
      }
      return Err(RunLockError::LockFailed(err));
    }

    Self::write_metadata(&file, command, manifest)?;
    debug!(lock = %lock_path.display(), "run lock acquired");

    Ok(RunLock { file, lock_path })
  }

  fn write_metadata(file: &File, command: &str, manifest: &Path) -> Result<(), RunLockError> {
    let metadata = RunLockMetadata {
      version: 1,
      pid: std::process::id(),
      started_at_unix: SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs(),
      command: command.to_string(),
      manifest: dunce::canonicalize(manifest).unwrap_or_else(|_| manifest.to_path_buf()),
    };

    file.set_len(0).map_err(RunLockError::WriteMetadata)?;
    let mut writer = io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &metadata)
      .map_err(|e| RunLockError::WriteMetadata(io::Error::other(e)))?;
    writer.flush().map_err(RunLockError::WriteMetadata)?;

    Ok(())
  }

  fn read_contention_error(manifest: &Path, lock_path: &Path) -> RunLockError {
    if let Ok(mut file) = File::open(lock_path) {
      let mut contents = String::new();
      if file.read_to_string(&mut contents).is_ok()
        && let Ok(metadata) = serde_json::from_str::<RunLockMetadata>(&contents)
      {
        let started_at = format!("Unix timestamp {}", metadata.started_at_unix);

        return RunLockError::Contention {
          manifest: manifest.to_path_buf(),
          command: metadata.command,
          pid: metadata.pid,
          started_at,
          lock_path: lock_path.to_path_buf(),
        };
      }
    }

    RunLockError::ContentionUnknown {
      manifest: manifest.to_path_buf(),
      lock_path: lock_path.to_path_buf(),
    }
  }

}

impl Drop for RunLock {
  fn drop(&mut self) {
    debug!(lock = %self.lock_path.display(), "run lock released");
  }
}

#[cfg(unix)]
fn try_lock(file: &File) -> io::Result<()> {
  use rustix::fs::{FlockOperation, flock};
  use std::os::unix::io::AsFd;

  flock(file.as_fd(), FlockOperation::NonBlockingLockExclusive)
    .map_err(|e| io::Error::from_raw_os_error(e.raw_os_error()))
}

#[cfg(windows)]
fn try_lock(file: &File) -> io::Result<()> {
  use std::os::windows::io::AsRawHandle;
  use windows_sys::Win32::Foundation::{ERROR_LOCK_VIOLATION, HANDLE};
  use windows_sys::Win32::Storage::FileSystem::{LOCKFILE_EXCLUSIVE_LOCK, LOCKFILE_FAIL_IMMEDIATELY, LockFileEx};

  let handle = file.as_raw_handle() as HANDLE;

  // SAFETY: OVERLAPPED is a plain data struct that is valid when zero-initialized.
  // LockFileEx is safe to call with a valid file handle and zeroed OVERLAPPED.
  let result = unsafe {
    let mut overlapped = std::mem::zeroed();
    LockFileEx(
      handle,
      LOCKFILE_FAIL_IMMEDIATELY | LOCKFILE_EXCLUSIVE_LOCK,
      0,
      1,
      0,
      &mut overlapped,
    )
  };

  if result == 0 {
    let err = io::Error::last_os_error();
    if err.raw_os_error() == Some(ERROR_LOCK_VIOLATION as i32) {
      return Err(io::Error::from(io::ErrorKind::WouldBlock));
    }
    Err(err)
  } else {
    Ok(())
  }
}
