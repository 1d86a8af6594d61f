//! Permission changes.
//!
//! ## Platform Behavior
//!
//! - **Unix**: `chmod +x` for executables; `chmod -R 755` then `chown -R uid:gid`
//!   for directories
//! - **Windows**: no executable bit; directories get a recursive full-control
//!   grant for the current user through `icacls`
//!
//! Both operations are best-effort and report an [`Attempt`].

use std::path::Path;

use tracing::{info, warn};

use crate::platform::Platform;
use crate::process::{ActionError, Attempt};

impl Platform {
  /// Mark `path` executable. Skipped on Windows.
  pub fn set_executable(&self, path: &Path) -> Attempt {
    if self.tag.is_windows() {
      return Attempt::Skipped("windows has no executable permission bit");
    }

    let target = path.to_string_lossy();
    let attempt = Attempt::from(self.execute("chmod", ["+x", &*target]).map(|_| ()));
    log_attempt("set executable", path, &attempt);
    attempt
  }

  /// Open `path` to the current user recursively.
  pub fn set_directory_permissions(&self, path: &Path) -> Attempt {
    let result = if self.tag.is_windows() {
      self.grant_full_control(path)
    } else {
      self.chmod_and_chown(path)
    };
    let attempt = Attempt::from(result);
    log_attempt("set directory permissions", path, &attempt);
    attempt
  }

  fn grant_full_control(&self, path: &Path) -> Result<(), ActionError> {
    let grant = format!("{}:(OI)(CI)F", self.env.identity().username);
    let target = path.to_string_lossy();
    self.execute("icacls", [&*target, "/grant", grant.as_str(), "/T"])?;
    Ok(())
  }

  fn chmod_and_chown(&self, path: &Path) -> Result<(), ActionError> {
    let target = path.to_string_lossy();
    self.execute("chmod", ["-R", "755", &*target])?;

    let owner = self.env.identity().chown_owner();
    self.execute("chown", ["-R", owner.as_str(), &*target])?;
    Ok(())
  }
}

fn log_attempt(action: &str, path: &Path, attempt: &Attempt) {
  match attempt {
    Attempt::Completed => info!(action, path = ?path, "permissions updated"),
    Attempt::Skipped(reason) => info!(action, path = ?path, reason, "skipped"),
    Attempt::Failed(err) => warn!(action, path = ?path, error = %err, "permission change failed, continuing"),
  }
}
