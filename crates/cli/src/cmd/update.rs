//! Implementation of the `hyperglide update` command.
//!
//! This command floats every dependency that glide.yaml does not pin to the
//! head of a branch and lets glide re-resolve and vendor everything.

use std::time::Instant;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::debug;

use hyperglide_lib::installer::GlideInstaller;
use hyperglide_lib::merge::{Floating, LockMapper};
use hyperglide_lib::update::{UpdateResult, run_update};

use super::Globals;
use crate::output::{format_duration, print_json, print_merge_summary, print_stat, print_success};

/// Execute the update command.
///
/// # Arguments
///
/// * `globals` - Manifest, lock file, Glide home and output settings.
/// * `branch` - Branch that locked dependencies float to unless pinned.
/// * `dry_run` - If true, print the merged manifest instead of running glide.
///
/// # Errors
///
/// Returns an error if the manifest or lock file cannot be loaded, glide
/// fails, or the manifest cannot be restored.
pub fn cmd_update(globals: &Globals, branch: &str, dry_run: bool) -> Result<()> {
  run_workflow(globals, "update", dry_run, &Floating::new(branch))
}

/// Run the merge-install-restore workflow with the given lock policy and
/// report the outcome.
pub(super) fn run_workflow(globals: &Globals, command: &str, dry_run: bool, mapper: &dyn LockMapper) -> Result<()> {
  let start = Instant::now();
  let options = globals.update_options(command, dry_run);
  let installer = GlideInstaller::new(&globals.glide);
  debug!(command, dry_run, glide = %installer.program().display(), "starting workflow");

  let result = run_update(&options, mapper, &installer)
    .with_context(|| format!("hyperglide {} failed for {}", command, globals.manifest.display()))?;

  if globals.output.is_json() {
    return print_json(&result);
  }

  if dry_run {
    print_dry_run(&result)?;
    return Ok(());
  }

  println!();
  print_merge_summary("import", &result.imports);
  print_merge_summary("testImport", &result.test_imports);
  println!();
  print_success(&format!("Dependencies vendored, {} restored", globals.manifest.display()));
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}

fn print_dry_run(result: &UpdateResult) -> Result<()> {
  let yaml = result.merged.to_yaml().context("Failed to render merged manifest")?;

  println!("{}", "Dry run - glide was not run".yellow());
  println!();
  print!("{}", yaml);
  println!();
  print_merge_summary("import", &result.imports);
  print_merge_summary("testImport", &result.test_imports);

  Ok(())
}
