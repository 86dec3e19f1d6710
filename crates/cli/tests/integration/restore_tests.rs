use std::fs;

use predicates::prelude::*;

use super::common::{TestEnv, fixture_content};

#[test]
fn restore_recovers_leftover_backup() {
  let env = TestEnv::project();
  fs::write(env.backup_path(), fixture_content("glide.yaml")).unwrap();
  fs::write(&env.manifest, "package: generated\n").unwrap();

  env
    .hyperglide_cmd()
    .arg("restore")
    .assert()
    .success()
    .stdout(predicate::str::contains("Restored"));

  assert_eq!(fs::read_to_string(&env.manifest).unwrap(), fixture_content("glide.yaml"));
  assert!(!env.backup_path().exists());
}

#[test]
fn restore_without_backup_is_a_no_op() {
  let env = TestEnv::project();

  env
    .hyperglide_cmd()
    .arg("restore")
    .assert()
    .success()
    .stdout(predicate::str::contains("nothing to restore"));

  assert_eq!(fs::read_to_string(&env.manifest).unwrap(), fixture_content("glide.yaml"));
}

#[cfg(unix)]
#[test]
fn update_works_again_after_restore() {
  let env = TestEnv::project();
  fs::write(env.backup_path(), fixture_content("glide.yaml")).unwrap();
  let glide = env.fake_glide();

  env
    .hyperglide_cmd()
    .arg("--glide")
    .arg(&glide)
    .arg("update")
    .assert()
    .failure();

  env.hyperglide_cmd().arg("restore").assert().success();

  env
    .hyperglide_cmd()
    .arg("--glide")
    .arg(&glide)
    .arg("update")
    .assert()
    .success();

  assert_eq!(fs::read_to_string(&env.manifest).unwrap(), fixture_content("glide.yaml"));
}
