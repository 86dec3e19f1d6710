use std::fs;

use predicates::prelude::*;

use super::common::{TestEnv, fixture_content};

#[test]
fn dry_run_keeps_locked_commits() {
  let env = TestEnv::project();

  env
    .hyperglide_cmd()
    .args(["newdep", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains(
      "- package: golang.org/x/net\n  version: f2499483f923065a842d38eb4c7f1927e6fc6e6d",
    ))
    .stdout(predicate::str::contains("- package: github.com/pkg/errors\n  version: v0.8.0"))
    .stdout(predicate::str::contains("- package: github.com/acme/newdep\n"));
}

#[test]
fn without_lock_file_everything_is_new() {
  let env = TestEnv::project();
  fs::remove_file(&env.lock).unwrap();

  env
    .hyperglide_cmd()
    .args(["newdep", "--dry-run", "-o", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"retained\": []"));
}

#[cfg(unix)]
#[test]
fn glide_sees_pinned_manifest() {
  let env = TestEnv::project();

  env
    .hyperglide_cmd()
    .arg("--glide")
    .arg(env.fake_glide())
    .arg("newdep")
    .assert()
    .success();

  let seen = env.seen_manifest();
  assert!(seen.contains("version: 04cdfd42973bb9c8589fd6a731800cf222fde1a9"));
  assert!(!seen.contains("version: master"));
  assert_eq!(fs::read_to_string(&env.manifest).unwrap(), fixture_content("glide.yaml"));
}
