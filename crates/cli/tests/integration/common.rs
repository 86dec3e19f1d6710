//! Shared test helpers for CLI integration tests.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated project directory with glide.yaml, glide.lock and a fake glide.
pub struct TestEnv {
  pub temp: TempDir,
  pub manifest: PathBuf,
  pub lock: PathBuf,
}

impl TestEnv {
  /// Project with both fixture files.
  pub fn project() -> Self {
    let env = Self::empty();
    fs::write(&env.manifest, fixture_content("glide.yaml")).unwrap();
    fs::write(&env.lock, fixture_content("glide.lock")).unwrap();
    env
  }

  /// Empty directory; paths point at files that don't exist yet.
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    let manifest = temp.path().join("glide.yaml");
    let lock = temp.path().join("glide.lock");
    Self { temp, manifest, lock }
  }

  /// Glide home (isolated per test).
  pub fn home_path(&self) -> PathBuf {
    let p = self.temp.path().join("glide-home");
    fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Copy the fake glide script into the temp dir and make it executable.
  #[cfg(unix)]
  pub fn fake_glide(&self) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = self.temp.path().join("fake-glide.sh");
    fs::copy(fixture_path("fake-glide.sh"), &path).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  /// Manifest content the fake glide was handed.
  pub fn seen_manifest(&self) -> String {
    fs::read_to_string(self.temp.path().join("glide-seen.yaml")).unwrap()
  }

  /// Arguments the fake glide was called with.
  pub fn seen_args(&self) -> String {
    fs::read_to_string(self.temp.path().join("glide-args.txt")).unwrap()
  }

  pub fn backup_path(&self) -> PathBuf {
    self.temp.path().join("glide.yaml.hyperglide.hgbak")
  }

  /// Get a pre-configured Command for the hyperglide binary.
  ///
  /// Points `--yaml`, `--lock` and `--home` into the temp dir and clears
  /// `HYPERGLIDE_GLIDE` so only `--glide` selects the installer.
  pub fn hyperglide_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("hyperglide");
    cmd.env_remove("HYPERGLIDE_GLIDE");
    cmd.env_remove("RUST_LOG");
    cmd.arg("--yaml").arg(&self.manifest);
    cmd.arg("--lock").arg(&self.lock);
    cmd.arg("--home").arg(self.home_path());
    cmd
  }
}
