//! Manifest (`glide.yaml`) loading and saving.

mod types;

pub use types::*;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur when working with manifests.
#[derive(Debug, Error)]
pub enum ManifestError {
  /// Failed to read the manifest.
  #[error("failed to read manifest {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to write the manifest.
  #[error("failed to write manifest {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to parse the manifest YAML.
  #[error("failed to parse manifest {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },

  /// Failed to serialize the manifest.
  #[error("failed to serialize manifest: {0}")]
  Serialize(#[source] serde_yaml::Error),
}

impl Manifest {
  /// Load a manifest from the given path.
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let manifest: Manifest = serde_yaml::from_str(&content).map_err(|source| ManifestError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

    debug!(
      path = %path.display(),
      imports = manifest.imports.len(),
      test_imports = manifest.dev_imports.len(),
      "loaded manifest"
    );

    Ok(manifest)
  }

  /// Render the manifest as YAML.
  pub fn to_yaml(&self) -> Result<String, ManifestError> {
    serde_yaml::to_string(self).map_err(ManifestError::Serialize)
  }

  /// Save the manifest to the given path.
  pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
    let content = self.to_yaml()?;
    fs::write(path, content).map_err(|source| ManifestError::Write {
      path: path.to_path_buf(),
      source,
    })
  }
}
