//! Import merging.
//!
//! Combines a manifest's declared dependencies ("pins") with a lock file's
//! resolved dependencies into one list that is written back as the manifest
//! before `glide` runs. Every locked dependency survives the merge; the
//! manifest only decides the reference, VCS type and repository of the
//! entries it names.
//!
//! How a lock entry becomes a dependency is a policy supplied by the caller
//! through [`LockMapper`]: [`Pinned`] keeps the exact locked commit,
//! [`Floating`] moves it to the head of a branch.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::lock::LockedDependency;
use crate::manifest::Dependency;

/// Branch that `update` floats every unpinned dependency to.
pub const DEFAULT_BRANCH: &str = "master";

/// Converts a lock entry into the dependency it seeds the merge with.
///
/// Any `Fn(&L) -> Dependency` closure is a mapper.
pub trait LockMapper<L = LockedDependency> {
  fn map(&self, lock: &L) -> Dependency;
}

impl<L, F> LockMapper<L> for F
where
  F: Fn(&L) -> Dependency,
{
  fn map(&self, lock: &L) -> Dependency {
    self(lock)
  }
}

/// Keep every dependency at its locked commit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pinned;

impl LockMapper for Pinned {
  fn map(&self, lock: &LockedDependency) -> Dependency {
    Dependency::from_lock(lock)
  }
}

/// Float every dependency to the head of a branch.
#[derive(Debug, Clone)]
pub struct Floating {
  pub branch: String,
}

impl Floating {
  pub fn new(branch: &str) -> Self {
    Self {
      branch: branch.to_string(),
    }
  }
}

impl Default for Floating {
  fn default() -> Self {
    Self::new(DEFAULT_BRANCH)
  }
}

impl LockMapper for Floating {
  fn map(&self, lock: &LockedDependency) -> Dependency {
    let mut dep = Dependency::from_lock(lock);
    dep.reference = Some(self.branch.clone());
    dep
  }
}

/// Merge declared pins into the converted lock entries.
///
/// Lock entries come first in their original order, followed by pins that
/// had no lock entry. A pin whose name is already present overwrites that
/// entry's reference, VCS type and repository and nothing else. Names are
/// unique in the result.
pub fn merge_imports<L, M>(pins: &[Dependency], locks: &[L], mapper: &M) -> Vec<Dependency>
where
  M: LockMapper<L> + ?Sized,
{
  let mut index: HashMap<String, usize> = HashMap::with_capacity(locks.len() + pins.len());
  let mut merged: Vec<Dependency> = Vec::with_capacity(locks.len() + pins.len());

  for lock in locks {
    let dep = mapper.map(lock);
    match index.get(&dep.name) {
      Some(&i) => merged[i] = dep,
      None => {
        index.insert(dep.name.clone(), merged.len());
        merged.push(dep);
      }
    }
  }

  for pin in pins {
    match index.get(&pin.name) {
      Some(&i) => merged[i].apply_pin(pin),
      None => {
        index.insert(pin.name.clone(), merged.len());
        merged.push(pin.clone());
      }
    }
  }

  merged
}

/// How each name of a merge was sourced.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
  /// Locked but no longer declared.
  pub retained: Vec<String>,
  /// Locked and declared; the declaration decided the reference.
  pub overridden: Vec<String>,
  /// Declared but never locked.
  pub added: Vec<String>,
}

impl MergeSummary {
  pub fn total(&self) -> usize {
    self.retained.len() + self.overridden.len() + self.added.len()
  }
}

/// Classify the names of `merge_imports(pins, locks, mapper)`, in merge order.
///
/// Lock entries are classified under the name `mapper` gives them, so a
/// mapper that renames entries is summarized the same way it is merged.
pub fn summarize<L, M>(pins: &[Dependency], locks: &[L], mapper: &M) -> MergeSummary
where
  M: LockMapper<L> + ?Sized,
{
  let declared: HashSet<&str> = pins.iter().map(|pin| pin.name.as_str()).collect();
  let mut reported: HashSet<String> = HashSet::new();
  let mut summary = MergeSummary::default();

  for lock in locks {
    let name = mapper.map(lock).name;
    if !reported.insert(name.clone()) {
      continue;
    }
    if declared.contains(name.as_str()) {
      summary.overridden.push(name);
    } else {
      summary.retained.push(name);
    }
  }

  for pin in pins {
    if reported.insert(pin.name.clone()) {
      summary.added.push(pin.name.clone());
    }
  }

  summary
}
