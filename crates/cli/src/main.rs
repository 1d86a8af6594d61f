mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crossplat_lib::{EnvSnapshot, Platform, PlatformTag};

use crate::output::OutputFormat;

/// crossplat - one interface over Windows, macOS and Linux host differences
#[derive(Parser)]
#[command(name = "crossplat")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t)]
  output: OutputFormat,

  /// Map paths and commands as this platform would (windows, macos, linux)
  #[arg(long, global = true)]
  platform: Option<PlatformTag>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show the resolved platform and its conventions
  Info,

  /// Show the directories the platform layer resolves
  Paths {
    /// Application name for the log directory
    #[arg(long, default_value = crossplat_lib::consts::DEFAULT_APP_NAME)]
    app: String,

    /// Projects directory override
    #[arg(long)]
    projects: Option<String>,
  },

  /// Show the shell profile for this platform
  Shell,

  /// Show the audio player and volume scale
  Audio,

  /// Play an audio file with the platform player
  Play {
    file: PathBuf,

    /// Volume from 0.0 to 1.0
    #[arg(long, default_value_t = 0.8)]
    volume: f64,

    /// Keep the file after playing (it is deleted by default)
    #[arg(long)]
    keep: bool,
  },

  /// Print platform-specific troubleshooting tips
  Troubleshoot,

  /// Translate a Unix command verb and its arguments for this platform
  Translate {
    verb: String,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
  },

  /// List processes bound to a TCP port
  Port {
    port: u16,

    /// Terminate every process found
    #[arg(long)]
    kill: bool,
  },

  /// Forcefully terminate a process
  Kill { pid: u32 },

  /// Mark a file executable
  MakeExecutable { path: PathBuf },

  /// Open a directory to the current user recursively
  FixPermissions { path: PathBuf },

  /// Add a directory to PATH and print the resulting value
  PathAdd { dir: String },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let tag = cli.platform.unwrap_or_else(PlatformTag::current);
  let mut platform = Platform::new(tag, EnvSnapshot::capture());
  debug!(platform = %tag, host = std::env::consts::OS, "platform context ready");
  let output = cli.output;

  match cli.command {
    Commands::Info => cmd::cmd_info(&platform, output),
    Commands::Paths { app, projects } => cmd::cmd_paths(&platform, &app, projects.as_deref(), output),
    Commands::Shell => cmd::cmd_shell(&platform, output),
    Commands::Audio => cmd::cmd_audio(&platform, output),
    Commands::Play { file, volume, keep } => cmd::cmd_play(&platform, &file, volume, !keep, output),
    Commands::Troubleshoot => cmd::cmd_troubleshoot(&platform, output),
    Commands::Translate { verb, args } => cmd::cmd_translate(&platform, &verb, &args, output),
    Commands::Port { port, kill } => cmd::cmd_port(&platform, port, kill, output),
    Commands::Kill { pid } => cmd::cmd_kill(&platform, pid, output),
    Commands::MakeExecutable { path } => cmd::cmd_make_executable(&platform, &path, output),
    Commands::FixPermissions { path } => cmd::cmd_fix_permissions(&platform, &path, output),
    Commands::PathAdd { dir } => cmd::cmd_path_add(&mut platform, &dir, output),
  }
}
