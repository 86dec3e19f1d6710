mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hyperglide_lib::consts::{GLIDE_HOME_ENV, LOCK_FILENAME, MANIFEST_FILENAME};
use hyperglide_lib::installer::GLIDE_PROGRAM;
use hyperglide_lib::merge::DEFAULT_BRANCH;
use hyperglide_lib::platform::paths::glide_home;

use crate::cmd::{Globals, cmd_newdep, cmd_restore, cmd_update};
use crate::output::{OutputFormat, print_error};

/// A wrapper around glide to enable a workflow where:
///
///  - every dependency is frequently updated
///  - individual dependencies can be easily added
#[derive(Parser)]
#[command(name = "hyperglide")]
#[command(author, version, about)]
struct Cli {
  /// Path to a glide.yaml configuration
  #[arg(short = 'y', long, global = true, default_value = MANIFEST_FILENAME)]
  yaml: PathBuf,

  /// Path to the Glide lock file
  #[arg(short = 'l', long, global = true, default_value = LOCK_FILENAME)]
  lock: PathBuf,

  /// The location of Glide files [default: ~/.glide]
  #[arg(long, global = true, env = GLIDE_HOME_ENV)]
  home: Option<PathBuf>,

  /// The glide executable to run
  #[arg(long, global = true, env = "HYPERGLIDE_GLIDE", default_value = GLIDE_PROGRAM)]
  glide: PathBuf,

  /// Enable verbose output (also passes --debug to glide)
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short = 'o', long, global = true, value_enum, default_value = "text")]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Update everything
  #[command(visible_alias = "up")]
  Update {
    /// Branch that unpinned dependencies float to
    #[arg(short, long, default_value = DEFAULT_BRANCH)]
    branch: String,

    /// Print the merged glide.yaml instead of running glide
    #[arg(long)]
    dry_run: bool,
  },

  /// Vendor new dependencies, don't update the others
  Newdep {
    /// Print the merged glide.yaml instead of running glide
    #[arg(long)]
    dry_run: bool,
  },

  /// Put back a glide.yaml left behind by an interrupted run
  Restore,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&err);
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  let globals = Globals {
    manifest: cli.yaml,
    lock: cli.lock,
    home: cli.home.unwrap_or_else(glide_home),
    glide: cli.glide,
    verbose: cli.verbose,
    output: cli.output,
  };

  match cli.command {
    Commands::Update { branch, dry_run } => cmd_update(&globals, &branch, dry_run),
    Commands::Newdep { dry_run } => cmd_newdep(&globals, dry_run),
    Commands::Restore => cmd_restore(&globals),
  }
}
