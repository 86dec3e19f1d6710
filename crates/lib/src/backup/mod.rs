//! Manifest backup and restore.
//!
//! While `glide` runs, the user's manifest is moved aside to
//! `<manifest>.hyperglide.hgbak` and a generated manifest takes its place.
//! [`ManifestBackup`] owns that window: it is created by moving the manifest
//! aside and is consumed by moving it back.
//!
//! If the process dies inside the window the backup stays on disk. The next
//! [`ManifestBackup::create`] refuses to run over it, and [`recover`] puts it
//! back.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info};

/// Suffix appended to the manifest path to form the backup path.
pub const BACKUP_SUFFIX: &str = ".hyperglide.hgbak";

/// Errors that can occur while backing up or restoring a manifest.
#[derive(Debug, Error)]
pub enum BackupError {
  /// A backup from an interrupted run is still present.
  #[error(
    "a backup from an interrupted run exists: {backup}\n\
     Run `hyperglide restore` to put it back, or remove it if {manifest} is correct"
  )]
  StaleBackup { manifest: PathBuf, backup: PathBuf },

  /// Failed to move the manifest aside.
  #[error("failed to back up {manifest}: {source}")]
  Create {
    manifest: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to move the backup back into place.
  #[error("failed to restore {manifest} from {backup}: {source}")]
  Restore {
    manifest: PathBuf,
    backup: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Returns the backup path for a manifest path.
pub fn backup_path(manifest: &Path) -> PathBuf {
  let mut name = OsString::from(manifest.as_os_str());
  name.push(BACKUP_SUFFIX);
  PathBuf::from(name)
}

/// A manifest that has been moved to its backup path.
///
/// Dropping the guard without calling [`ManifestBackup::restore`] still moves
/// the backup back, logging any failure.
#[derive(Debug)]
pub struct ManifestBackup {
  manifest: PathBuf,
  backup: PathBuf,
  restored: bool,
}

impl ManifestBackup {
  /// Move `manifest` to its backup path.
  pub fn create(manifest: &Path) -> Result<Self, BackupError> {
    let backup = backup_path(manifest);

    if backup.exists() {
      return Err(BackupError::StaleBackup {
        manifest: manifest.to_path_buf(),
        backup,
      });
    }

    fs::rename(manifest, &backup).map_err(|source| BackupError::Create {
      manifest: manifest.to_path_buf(),
      source,
    })?;

    debug!(manifest = %manifest.display(), backup = %backup.display(), "manifest backed up");

    Ok(Self {
      manifest: manifest.to_path_buf(),
      backup,
      restored: false,
    })
  }

  /// Move the backup back over the manifest path.
  pub fn restore(mut self) -> Result<(), BackupError> {
    self.restored = true;
    self.rename_back()
  }

  fn rename_back(&self) -> Result<(), BackupError> {
    fs::rename(&self.backup, &self.manifest).map_err(|source| BackupError::Restore {
      manifest: self.manifest.clone(),
      backup: self.backup.clone(),
      source,
    })?;

    debug!(manifest = %self.manifest.display(), "manifest restored");
    Ok(())
  }
}

impl Drop for ManifestBackup {
  fn drop(&mut self) {
    if self.restored {
      return;
    }
    if let Err(e) = self.rename_back() {
      error!(error = %e, "error restoring manifest");
    }
  }
}

/// Put back a backup left behind by an interrupted run.
///
/// Whatever is at the manifest path is replaced. Returns `false` when there
/// was no backup.
pub fn recover(manifest: &Path) -> Result<bool, BackupError> {
  let backup = backup_path(manifest);

  if !backup.exists() {
    return Ok(false);
  }

  fs::rename(&backup, manifest).map_err(|source| BackupError::Restore {
    manifest: manifest.to_path_buf(),
    backup: backup.clone(),
    source,
  })?;

  info!(manifest = %manifest.display(), backup = %backup.display(), "recovered manifest from backup");
  Ok(true)
}
