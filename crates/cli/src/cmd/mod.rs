mod newdep;
mod restore;
mod update;

use std::path::PathBuf;

use hyperglide_lib::update::UpdateOptions;

use crate::output::OutputFormat;

pub use newdep::cmd_newdep;
pub use restore::cmd_restore;
pub use update::cmd_update;

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Globals {
  pub manifest: PathBuf,
  pub lock: PathBuf,
  pub home: PathBuf,
  pub glide: PathBuf,
  pub verbose: bool,
  pub output: OutputFormat,
}

impl Globals {
  pub fn update_options(&self, command: &str, dry_run: bool) -> UpdateOptions {
    UpdateOptions {
      manifest: self.manifest.clone(),
      lock: self.lock.clone(),
      home: self.home.clone(),
      dry_run,
      debug: self.verbose,
      command: command.to_string(),
    }
  }
}
