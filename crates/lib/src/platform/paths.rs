use std::path::PathBuf;

use crate::consts::{GLIDE_HOME_DIR, GLIDE_HOME_ENV};

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("USERPROFILE").map(PathBuf::from)
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("HOME").map(PathBuf::from)
}

/// Returns the Glide home directory.
///
/// `GLIDE_HOME` wins; otherwise `.glide` under the user's home directory,
/// falling back to `.glide` in the working directory when there is no home.
pub fn glide_home() -> PathBuf {
  if let Some(home) = std::env::var_os(GLIDE_HOME_ENV).filter(|v| !v.is_empty()) {
    return PathBuf::from(home);
  }
  home_dir()
    .map(|home| home.join(GLIDE_HOME_DIR))
    .unwrap_or_else(|| PathBuf::from(GLIDE_HOME_DIR))
}
