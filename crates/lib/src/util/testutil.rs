//! Test utilities for hyperglide-lib.
//!
//! Fixtures for manifests and lock files, and an in-process [`Installer`]
//! that records what it was asked to install instead of running glide.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::installer::{InstallError, InstallRequest, Installer};

pub const GLIDE_YAML: &str = r#"package: github.com/acme/widget
ignore:
- github.com/acme/widget/internal
import:
- package: github.com/pkg/errors
  version: v0.8.0
- package: github.com/acme/newdep
testImport:
- package: github.com/stretchr/testify
  version: v1.1.4
"#;

pub const GLIDE_LOCK: &str = r#"hash: 3e0e0a9c1e4b5d2f7a0c1d9b8e7f6a5b4c3d2e1f0a9b8c7d6e5f4a3b2c1d0e9f
updated: 2017-06-12T09:41:27.052437127-04:00
imports:
- name: github.com/pkg/errors
  version: 645ef00459ed84a119197bfb8d8205042c6df63d
- name: golang.org/x/net
  version: f2499483f923065a842d38eb4c7f1927e6fc6e6d
  subpackages:
  - context
testImports:
- name: github.com/stretchr/testify
  version: 69483b4bd14f5845b5a1e55bca19e954e827f1d0
  subpackages:
  - assert
- name: github.com/davecgh/go-spew
  version: 04cdfd42973bb9c8589fd6a731800cf222fde1a9
"#;

/// Write `glide.yaml` and, if given, `glide.lock` into `dir`.
pub fn write_project(dir: &Path, manifest: &str, lock: Option<&str>) -> (PathBuf, PathBuf) {
  let manifest_path = dir.join("glide.yaml");
  let lock_path = dir.join("glide.lock");
  fs::write(&manifest_path, manifest).unwrap();
  if let Some(lock) = lock {
    fs::write(&lock_path, lock).unwrap();
  }
  (manifest_path, lock_path)
}

/// What the installer should do after recording the manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Behavior {
  #[default]
  Succeed,
  Fail,
  /// Delete the backup before failing, so the restore cannot succeed.
  DeleteBackupAndFail,
}

/// Records the manifest content present when `install` is called.
#[derive(Debug, Default)]
pub struct RecordingInstaller {
  pub behavior: Behavior,
  pub seen: RefCell<Vec<String>>,
  pub requests: RefCell<Vec<InstallRequest>>,
}

impl RecordingInstaller {
  pub fn new(behavior: Behavior) -> Self {
    Self {
      behavior,
      ..Default::default()
    }
  }

  pub fn calls(&self) -> usize {
    self.seen.borrow().len()
  }
}

impl Installer for RecordingInstaller {
  fn install(&self, request: &InstallRequest) -> Result<(), InstallError> {
    let content = fs::read_to_string(&request.manifest).unwrap();
    self.seen.borrow_mut().push(content);
    self.requests.borrow_mut().push(request.clone());

    match self.behavior {
      Behavior::Succeed => Ok(()),
      Behavior::Fail => Err(InstallError::Failed {
        program: "glide".to_string(),
        code: Some(1),
      }),
      Behavior::DeleteBackupAndFail => {
        fs::remove_file(crate::backup::backup_path(&request.manifest)).unwrap();
        Err(InstallError::Failed {
          program: "glide".to_string(),
          code: Some(1),
        })
      }
    }
  }
}
