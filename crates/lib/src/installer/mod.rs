//! Invoking the external installer.
//!
//! Resolution, fetching and vendoring are done by `glide` itself. This module
//! only knows how to ask it to install from a manifest. The [`Installer`] trait
//! is the seam the update workflow calls through.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info};

/// Default name of the glide executable, looked up on `PATH`.
pub const GLIDE_PROGRAM: &str = "glide";

/// What to install.
#[derive(Debug, Clone)]
pub struct InstallRequest {
  /// Manifest the installer should read.
  pub manifest: PathBuf,
  /// Glide home (cache and global config).
  pub home: PathBuf,
  /// Ask the installer for debug output.
  pub debug: bool,
}

/// Errors raised by an installer.
#[derive(Debug, Error)]
pub enum InstallError {
  /// The installer could not be started.
  #[error("failed to run {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  /// The installer ran and reported failure.
  #[error("{program} exited with {}", .code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}")))]
  Failed { program: String, code: Option<i32> },
}

/// Something that can resolve and vendor the dependencies of a manifest.
pub trait Installer {
  fn install(&self, request: &InstallRequest) -> Result<(), InstallError>;
}

/// Runs `glide update` as a child process.
#[derive(Debug, Clone)]
pub struct GlideInstaller {
  program: PathBuf,
}

impl Default for GlideInstaller {
  fn default() -> Self {
    Self::new(GLIDE_PROGRAM)
  }
}

impl GlideInstaller {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
    }
  }

  pub fn program(&self) -> &Path {
    &self.program
  }

  /// Arguments passed to glide for a request.
  ///
  /// Test imports are resolved, only imported packages are scanned, and
  /// nested vendor directories are stripped.
  pub fn args(request: &InstallRequest) -> Vec<String> {
    let mut args = Vec::new();
    if request.debug {
      args.push("--debug".to_string());
    }
    args.push("--yaml".to_string());
    args.push(request.manifest.to_string_lossy().into_owned());
    args.push("--home".to_string());
    args.push(request.home.to_string_lossy().into_owned());
    args.push("update".to_string());
    args.push("--strip-vendor".to_string());
    args
  }
}

impl Installer for GlideInstaller {
  fn install(&self, request: &InstallRequest) -> Result<(), InstallError> {
    let program = self.program.to_string_lossy().into_owned();
    let args = Self::args(request);

    info!(program = %program, manifest = %request.manifest.display(), "running installer");
    debug!(args = ?args, "installer arguments");

    let status = Command::new(&self.program)
      .args(&args)
      .status()
      .map_err(|source| InstallError::Spawn {
        program: program.clone(),
        source,
      })?;

    if !status.success() {
      return Err(InstallError::Failed {
        program,
        code: status.code(),
      });
    }

    Ok(())
  }
}
