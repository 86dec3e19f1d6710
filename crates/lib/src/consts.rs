/// Default manifest file name.
pub const MANIFEST_FILENAME: &str = "glide.yaml";

/// Default lock file name.
pub const LOCK_FILENAME: &str = "glide.lock";

/// Environment variable overriding the Glide home directory.
pub const GLIDE_HOME_ENV: &str = "GLIDE_HOME";

/// Glide home directory name under the user's home.
pub const GLIDE_HOME_DIR: &str = ".glide";
