//! Shell profile discovery and profile-line generation

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use super::Platform;
use super::paths::join;
use super::tag::PlatformTag;

/// Shells whose profiles the platform layer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
  Bash,
  Zsh,
  PowerShell,
}

impl Shell {
  /// Get the shell name as a string
  pub fn as_str(&self) -> &'static str {
    match self {
      Shell::Bash => "bash",
      Shell::Zsh => "zsh",
      Shell::PowerShell => "powershell",
    }
  }

  /// Executable used to run or reload the profile
  pub fn config_cmd(&self) -> &'static str {
    match self {
      Shell::Bash => "bash",
      Shell::Zsh => "zsh",
      Shell::PowerShell => "pwsh",
    }
  }

  /// Profile path relative to the home directory, as path segments
  fn profile_segments(&self) -> &'static [&'static str] {
    match self {
      Shell::Bash => &[".bashrc"],
      Shell::Zsh => &[".zshrc"],
      Shell::PowerShell => &["Documents", "PowerShell", "Microsoft.PowerShell_profile.ps1"],
    }
  }

  /// Generate an export statement for this shell
  pub fn export_var(&self, name: &str, value: &str) -> String {
    match self {
      Shell::PowerShell => format!("$env:{} = {}", name, powershell_quote(value)),
      Shell::Bash | Shell::Zsh => format!("export {}={}", name, posix_quote(value)),
    }
  }

  /// Generate a prepend statement for a PATH-like variable
  pub fn prepend_path(&self, name: &str, value: &str) -> String {
    match self {
      Shell::PowerShell => format!(
        "$env:{} = {} + [IO.Path]::PathSeparator + $env:{}",
        name,
        powershell_quote(value),
        name
      ),
      Shell::Bash | Shell::Zsh => format!("export {}={}:\"${}\"", name, posix_quote(value), name),
    }
  }
}

/// PowerShell single-quoted literal: no escapes apart from a doubled `'`.
pub(crate) fn powershell_quote(value: &str) -> String {
  format!("'{}'", value.replace('\'', "''"))
}

/// POSIX single-quoted literal; an embedded `'` is closed, escaped and reopened.
pub(crate) fn posix_quote(value: &str) -> String {
  format!("'{}'", value.replace('\'', "'\\''"))
}

impl std::fmt::Display for Shell {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// The shell a platform configures and where its profile lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellProfile {
  pub shell: Shell,
  pub profile: PathBuf,
  pub config_cmd: String,
}

impl ShellProfile {
  fn new(tag: PlatformTag, home: &str, shell: Shell) -> Self {
    let segments = std::iter::once(home).chain(shell.profile_segments().iter().copied());
    Self {
      shell,
      profile: PathBuf::from(join(tag, segments)),
      config_cmd: shell.config_cmd().to_string(),
    }
  }
}

impl Platform {
  /// Shell profile for this platform.
  ///
  /// Windows uses PowerShell and macOS zsh. Linux uses zsh when `~/.zshrc`
  /// exists and bash otherwise; this is the one lookup that depends on the
  /// filesystem rather than the tag alone.
  pub fn shell_config(&self) -> ShellProfile {
    let home = self.home_string();
    let shell = match self.tag {
      PlatformTag::Windows => Shell::PowerShell,
      PlatformTag::MacOs => Shell::Zsh,
      PlatformTag::Linux => {
        let zshrc = ShellProfile::new(self.tag, &home, Shell::Zsh);
        if self.fs.exists(&zshrc.profile) {
          return zshrc;
        }
        debug!(profile = ?zshrc.profile, "no zsh profile, using bash");
        Shell::Bash
      }
    };
    ShellProfile::new(self.tag, &home, shell)
  }
}
