//! Update orchestration.
//!
//! This module provides the core logic behind `hyperglide update` and
//! `hyperglide newdep`: merge the lock file into the manifest, swap the merged
//! manifest in for the duration of an install, then put the user's manifest
//! back.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::backup::{BackupError, ManifestBackup};
use crate::consts::{LOCK_FILENAME, MANIFEST_FILENAME};
use crate::installer::{InstallError, InstallRequest, Installer};
use crate::lock::{LockError, LockFile};
use crate::manifest::{Manifest, ManifestError};
use crate::merge::{LockMapper, MergeSummary, merge_imports, summarize};
use crate::platform::paths::glide_home;
use crate::run_lock::{RunLock, RunLockError};

/// Options for the update operation.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
  /// Manifest to merge into and restore afterwards.
  pub manifest: PathBuf,
  /// Lock file to merge from.
  pub lock: PathBuf,
  /// Glide home passed to the installer.
  pub home: PathBuf,
  /// If true, only compute the merged manifest.
  pub dry_run: bool,
  /// Ask the installer for debug output.
  pub debug: bool,
  /// Command name recorded in the run lock.
  pub command: String,
}

impl Default for UpdateOptions {
  fn default() -> Self {
    Self {
      manifest: PathBuf::from(MANIFEST_FILENAME),
      lock: PathBuf::from(LOCK_FILENAME),
      home: glide_home(),
      dry_run: false,
      debug: false,
      command: "update".to_string(),
    }
  }
}

/// Result of a successful update operation.
#[derive(Debug, Serialize)]
pub struct UpdateResult {
  /// The manifest handed to the installer.
  pub merged: Manifest,
  /// How the runtime imports were merged.
  pub imports: MergeSummary,
  /// How the test imports were merged.
  pub test_imports: MergeSummary,
  /// Whether the installer ran.
  pub installed: bool,
}

/// Errors that can occur during update.
#[derive(Debug, Error)]
pub enum UpdateError {
  #[error(transparent)]
  Manifest(#[from] ManifestError),

  #[error(transparent)]
  Lock(#[from] LockError),

  #[error(transparent)]
  RunLock(#[from] RunLockError),

  #[error(transparent)]
  Backup(#[from] BackupError),

  #[error("installer failed: {0}")]
  Install(#[from] InstallError),
}

/// Build the manifest that is handed to the installer.
///
/// The project name and scan settings come from `manifest`; both import
/// lists are merged with their lock file counterparts.
pub fn merge_manifest<M>(manifest: &Manifest, lock: &LockFile, mapper: &M) -> Manifest
where
  M: LockMapper + ?Sized,
{
  Manifest {
    name: manifest.name.clone(),
    ignore: manifest.ignore.clone(),
    exclude_dirs: manifest.exclude_dirs.clone(),
    imports: merge_imports(&manifest.imports, &lock.imports, mapper),
    dev_imports: merge_imports(&manifest.dev_imports, &lock.dev_imports, mapper),
  }
}

/// Merge, install, restore.
///
/// The user's manifest is moved aside while the merged manifest is installed
/// and moved back afterwards, whether the installer succeeded or not. When the
/// move back fails that error wins, since the manifest then only exists as
/// the backup.
///
/// # Errors
///
/// Returns an error if:
/// - The manifest or lock file cannot be read or parsed
/// - Another run holds the manifest, or a stale backup exists
/// - The merged manifest cannot be written
/// - The installer fails
/// - The manifest cannot be restored
pub fn run_update<M, I>(options: &UpdateOptions, mapper: &M, installer: &I) -> Result<UpdateResult, UpdateError>
where
  M: LockMapper + ?Sized,
  I: Installer + ?Sized,
{
  info!(manifest = %options.manifest.display(), lock = %options.lock.display(), "loading manifest and lock file");

  let manifest = Manifest::load(&options.manifest)?;
  let lock = match LockFile::load(&options.lock)? {
    Some(lock) => lock,
    None => {
      warn!(lock = %options.lock.display(), "lock file not found, treating every import as new");
      LockFile::default()
    }
  };

  let merged = merge_manifest(&manifest, &lock, mapper);
  let imports = summarize(&manifest.imports, &lock.imports, mapper);
  let test_imports = summarize(&manifest.dev_imports, &lock.dev_imports, mapper);

  info!(
    imports = merged.imports.len(),
    test_imports = merged.dev_imports.len(),
    added = imports.added.len() + test_imports.added.len(),
    "merged lock file into manifest"
  );

  if options.dry_run {
    return Ok(UpdateResult {
      merged,
      imports,
      test_imports,
      installed: false,
    });
  }

  let _run_lock = RunLock::acquire(&options.manifest, &options.command)?;
  let backup = ManifestBackup::create(&options.manifest)?;

  let outcome = install_merged(&merged, options, installer);
  let restored = backup.restore();

  if let Err(restore_err) = restored {
    if let Err(install_err) = &outcome {
      error!(error = %install_err, "update failed before the manifest could be restored");
    }
    return Err(restore_err.into());
  }
  outcome?;

  Ok(UpdateResult {
    merged,
    imports,
    test_imports,
    installed: true,
  })
}

fn install_merged<I>(merged: &Manifest, options: &UpdateOptions, installer: &I) -> Result<(), UpdateError>
where
  I: Installer + ?Sized,
{
  merged.save(&options.manifest)?;

  installer.install(&InstallRequest {
    manifest: options.manifest.clone(),
    home: options.home.clone(),
    debug: options.debug,
  })?;

  Ok(())
}
