//! Lock file (`glide.lock`) loading.
//!
//! The lock file is written by `glide` after a resolution pass and pins every
//! dependency to an exact commit. hyperglide never writes it; it only reads
//! the previously resolved state to merge it back into the manifest.
//!
//! # Lock File Format
//!
//! ```yaml
//! hash: 3e0e0a9c1e4b5d2f...
//! updated: 2017-06-12T09:41:27.052437127-04:00
//! imports:
//! - name: github.com/pkg/errors
//!   version: 645ef00459ed84a119197bfb8d8205042c6df63d
//! - name: golang.org/x/net
//!   version: f2499483f923065a842d38eb4c7f1927e6fc6e6d
//!   subpackages:
//!   - context
//! testImports:
//! - name: github.com/stretchr/testify
//!   version: 69483b4bd14f5845b5a1e55bca19e954e827f1d0
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A lock file containing pinned dependency revisions.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockFile {
  /// Hash of the manifest the lock was generated from.
  #[serde(default)]
  pub hash: String,

  /// Timestamp of the resolution pass, as written by glide.
  #[serde(default)]
  pub updated: String,

  /// Locked runtime dependencies.
  #[serde(default)]
  pub imports: Vec<LockedDependency>,

  /// Locked test dependencies.
  #[serde(rename = "testImports", default)]
  pub dev_imports: Vec<LockedDependency>,
}

/// A locked dependency entry.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedDependency {
  /// Import path; same identity key as the manifest's `package`.
  pub name: String,

  /// Exact resolved revision (commit hash).
  #[serde(default)]
  pub version: String,

  #[serde(rename = "repo", default, skip_serializing_if = "Option::is_none")]
  pub repository: Option<String>,

  #[serde(rename = "vcs", default, skip_serializing_if = "Option::is_none")]
  pub vcs_type: Option<String>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub subpackages: Vec<String>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub os: Vec<String>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub arch: Vec<String>,
}

/// Errors that can occur when working with lock files.
#[derive(Debug, Error)]
pub enum LockError {
  /// Failed to read the lock file.
  #[error("failed to read lock file {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to parse the lock file YAML.
  #[error("failed to parse lock file {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },
}

impl LockFile {
  /// Load a lock file from the given path.
  ///
  /// Returns `Ok(None)` if the file doesn't exist.
  /// Returns `Ok(Some(lock))` if the file exists and was parsed successfully.
  /// Returns `Err` if the file exists but couldn't be read or parsed.
  pub fn load(path: &Path) -> Result<Option<Self>, LockError> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(source) => {
        return Err(LockError::Read {
          path: path.to_path_buf(),
          source,
        });
      }
    };

    let lock: LockFile = serde_yaml::from_str(&content).map_err(|source| LockError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

    Ok(Some(lock))
  }
}

impl LockedDependency {
  /// Create a new locked dependency entry.
  pub fn new(name: &str, version: &str) -> Self {
    Self {
      name: name.to_string(),
      version: version.to_string(),
      ..Default::default()
    }
  }

  /// Set the repository location.
  pub fn with_repository(mut self, repository: &str) -> Self {
    self.repository = Some(repository.to_string());
    self
  }

  /// Set the VCS type.
  pub fn with_vcs(mut self, vcs_type: &str) -> Self {
    self.vcs_type = Some(vcs_type.to_string());
    self
  }
}
