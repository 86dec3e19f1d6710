//! Manifest types for hyperglide.
//!
//! The manifest (`glide.yaml`) is the human-edited file declaring the
//! dependencies a project wants. hyperglide only ever reads and rewrites the
//! subset of fields that influence resolution; unknown keys are ignored on
//! load.
//!
//! # Format
//!
//! ```yaml
//! package: github.com/acme/widget
//! ignore:
//! - github.com/acme/widget/internal
//! import:
//! - package: github.com/pkg/errors
//!   version: v0.8.0
//! - package: github.com/acme/fork
//!   repo: git@github.com:acme/fork.git
//!   vcs: git
//! testImport:
//! - package: github.com/stretchr/testify
//!   subpackages:
//!   - assert
//! ```

use serde::{Deserialize, Serialize};

use crate::lock::LockedDependency;

/// A declared dependency.
///
/// The `package` name is the identity key. `version`, `vcs` and `repo` are the
/// three fields a manifest pin overrides during a merge; the remaining fields
/// are resolved state carried over from the lock file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
  /// Import path, e.g. `github.com/pkg/errors`.
  #[serde(rename = "package")]
  pub name: String,

  /// Branch, tag, commit or semver constraint.
  #[serde(rename = "version", default, skip_serializing_if = "Option::is_none")]
  pub reference: Option<String>,

  /// Alternate source location.
  #[serde(rename = "repo", default, skip_serializing_if = "Option::is_none")]
  pub repository: Option<String>,

  /// Version control system: git, hg, bzr or svn.
  #[serde(rename = "vcs", default, skip_serializing_if = "Option::is_none")]
  pub vcs_type: Option<String>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub subpackages: Vec<String>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub os: Vec<String>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub arch: Vec<String>,
}

impl Dependency {
  /// Create a dependency with only a name.
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      ..Default::default()
    }
  }

  /// Set the version reference.
  pub fn with_reference(mut self, reference: &str) -> Self {
    self.reference = Some(reference.to_string());
    self
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

  /// Build a dependency from a lock entry, pinned to the locked commit.
  pub fn from_lock(lock: &LockedDependency) -> Self {
    Self {
      name: lock.name.clone(),
      reference: Some(lock.version.clone()).filter(|v| !v.is_empty()),
      repository: lock.repository.clone(),
      vcs_type: lock.vcs_type.clone(),
      subpackages: lock.subpackages.clone(),
      os: lock.os.clone(),
      arch: lock.arch.clone(),
    }
  }

  /// Copy the pinnable fields (reference, VCS type, repository) from `pin`.
  ///
  /// Everything else is resolved state and stays as it is.
  pub fn apply_pin(&mut self, pin: &Dependency) {
    self.reference = pin.reference.clone();
    self.vcs_type = pin.vcs_type.clone();
    self.repository = pin.repository.clone();
  }
}

/// The subset of `glide.yaml` that hyperglide reads and writes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
  /// Import path of the project itself.
  #[serde(rename = "package", default)]
  pub name: String,

  /// Packages the resolver should skip.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub ignore: Vec<String>,

  /// Directories excluded from import scanning.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub exclude_dirs: Vec<String>,

  /// Runtime dependencies.
  #[serde(rename = "import", default, skip_serializing_if = "Vec::is_empty")]
  pub imports: Vec<Dependency>,

  /// Dependencies only needed by tests.
  #[serde(rename = "testImport", default, skip_serializing_if = "Vec::is_empty")]
  pub dev_imports: Vec<Dependency>,
}
