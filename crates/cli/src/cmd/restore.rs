//! Implementation of the `hyperglide restore` command.
//!
//! Recovers glide.yaml after a run was killed between backing it up and
//! putting it back.

use anyhow::{Context, Result};
use serde::Serialize;

use hyperglide_lib::backup::{backup_path, recover};
use hyperglide_lib::run_lock::RunLock;

use super::Globals;
use crate::output::{print_info, print_json, print_success};

#[derive(Debug, Serialize)]
struct RestoreResult {
  manifest: String,
  backup: String,
  restored: bool,
}

pub fn cmd_restore(globals: &Globals) -> Result<()> {
  let _lock = RunLock::acquire(&globals.manifest, "restore").context("Failed to acquire run lock")?;

  let backup = backup_path(&globals.manifest);
  let restored = recover(&globals.manifest).context("Failed to restore manifest")?;

  if globals.output.is_json() {
    return print_json(&RestoreResult {
      manifest: globals.manifest.display().to_string(),
      backup: backup.display().to_string(),
      restored,
    });
  }

  if restored {
    print_success(&format!(
      "Restored {} from {}",
      globals.manifest.display(),
      backup.display()
    ));
  } else {
    print_info(&format!("No backup found at {}, nothing to restore", backup.display()));
  }

  Ok(())
}
