use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Host family selecting which branch every platform-dependent operation takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformTag {
  Windows,
  MacOs,
  Linux,
}

static CURRENT: OnceLock<PlatformTag> = OnceLock::new();

impl PlatformTag {
  /// Map a host-reported identifier (as in `std::env::consts::OS`) to a tag.
  ///
  /// Anything that is neither Windows nor macOS takes the Unix-like branch,
  /// so the BSDs and other Unix hosts behave like Linux.
  pub fn resolve(host_id: &str) -> Self {
    match host_id {
      "windows" | "win32" => Self::Windows,
      "macos" | "darwin" => Self::MacOs,
      "linux" => Self::Linux,
      other => {
        debug!(host = %other, "unrecognized host, using the unix-like branch");
        Self::Linux
      }
    }
  }

  /// The tag of the running host, resolved on first use.
  pub fn current() -> Self {
    *CURRENT.get_or_init(|| Self::resolve(std::env::consts::OS))
  }

  pub fn is_windows(&self) -> bool {
    *self == Self::Windows
  }

  pub fn is_mac(&self) -> bool {
    *self == Self::MacOs
  }

  pub fn is_linux(&self) -> bool {
    *self == Self::Linux
  }

  /// Everything but Windows shares the Unix permission and process model.
  pub fn is_unix(&self) -> bool {
    !self.is_windows()
  }

  /// Returns the lowercase string identifier for this tag
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Windows => "windows",
      Self::MacOs => "macos",
      Self::Linux => "linux",
    }
  }
}

impl fmt::Display for PlatformTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown platform '{0}' (expected windows, macos or linux)")]
pub struct ParseTagError(String);

impl FromStr for PlatformTag {
  type Err = ParseTagError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "windows" | "win32" => Ok(Self::Windows),
      "macos" | "darwin" | "mac" => Ok(Self::MacOs),
      "linux" => Ok(Self::Linux),
      _ => Err(ParseTagError(s.to_string())),
    }
  }
}
