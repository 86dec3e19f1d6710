//! hyperglide-lib: Core types and logic for hyperglide
//!
//! hyperglide wraps `glide` to support a workflow where every dependency is
//! updated often and single dependencies can be added without touching the
//! rest. This crate provides:
//! - `Manifest` / `LockFile`: the `glide.yaml` and `glide.lock` models
//! - `merge`: folding locked versions back into the declared imports
//! - `backup` / `run_lock`: keeping the user's manifest safe while glide runs
//! - `installer`: invoking glide
//! - `update`: the end-to-end workflow

pub mod backup;
pub mod consts;
pub mod installer;
pub mod lock;
pub mod manifest;
pub mod merge;
pub mod platform;
pub mod run_lock;
pub mod update;
pub mod util;
