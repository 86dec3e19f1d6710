//! Implementation of the `hyperglide newdep` command.
//!
//! This command vendors dependencies that were added to glide.yaml while
//! keeping every other dependency at its locked commit.

use anyhow::Result;

use hyperglide_lib::merge::Pinned;

use super::Globals;
use super::update::run_workflow;

/// Execute the newdep command.
///
/// Locked dependencies keep their exact commit unless glide.yaml pins them
/// to something else; dependencies missing from glide.lock are resolved fresh.
pub fn cmd_newdep(globals: &Globals, dry_run: bool) -> Result<()> {
  run_workflow(globals, "newdep", dry_run, &Pinned)
}
