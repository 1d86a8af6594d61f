//! Host environment captured once when a [`Platform`](super::Platform) is built.
//!
//! Operations read from the snapshot instead of the live process environment,
//! so a context can be constructed for any platform with any variables.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::consts::CONFIG_DIR_ENV;

/// Variables the path mapper consults.
pub const CAPTURED_VARS: &[&str] = &["HOME", "USERPROFILE", CONFIG_DIR_ENV, "TEMP", "TMP", "XDG_DATA_HOME", "PATH"];

/// The account operations act on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
  pub username: String,
  pub uid: Option<u32>,
  pub gid: Option<u32>,
}

impl Identity {
  /// The user running this process.
  pub fn current() -> Self {
    Self {
      username: whoami::username(),
      uid: current_uid(),
      gid: current_gid(),
    }
  }

  /// An identity with a name only, as on hosts without numeric ids.
  pub fn named(username: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      uid: None,
      gid: None,
    }
  }

  /// Owner argument for `chown`: numeric `uid:gid` when both are known, the name otherwise.
  pub fn chown_owner(&self) -> String {
    match (self.uid, self.gid) {
      (Some(uid), Some(gid)) => format!("{}:{}", uid, gid),
      _ => self.username.clone(),
    }
  }
}

#[cfg(unix)]
fn current_uid() -> Option<u32> {
  Some(rustix::process::getuid().as_raw())
}

#[cfg(not(unix))]
fn current_uid() -> Option<u32> {
  None
}

#[cfg(unix)]
fn current_gid() -> Option<u32> {
  Some(rustix::process::getgid().as_raw())
}

#[cfg(not(unix))]
fn current_gid() -> Option<u32> {
  None
}

/// Environment variables plus the host's own directory primitives.
#[derive(Debug, Clone)]
pub struct EnvSnapshot {
  vars: BTreeMap<String, String>,
  host_home: Option<PathBuf>,
  host_temp: Option<PathBuf>,
  identity: Identity,
}

impl EnvSnapshot {
  /// Capture the live process environment.
  pub fn capture() -> Self {
    let vars = CAPTURED_VARS
      .iter()
      .filter_map(|name| std::env::var(name).ok().map(|value| (name.to_string(), value)))
      .collect();

    Self {
      vars,
      host_home: dirs::home_dir(),
      host_temp: Some(dunce::simplified(&std::env::temp_dir()).to_path_buf()),
      identity: Identity::current(),
    }
  }

  /// A snapshot holding exactly `vars`, with no host primitives to fall back on.
  pub fn from_vars<I, K, V>(vars: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    Self {
      vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
      host_home: None,
      host_temp: None,
      identity: Identity::named("user"),
    }
  }

  pub fn with_host_home(mut self, home: impl Into<PathBuf>) -> Self {
    self.host_home = Some(home.into());
    self
  }

  pub fn with_host_temp(mut self, temp: impl Into<PathBuf>) -> Self {
    self.host_temp = Some(temp.into());
    self
  }

  pub fn with_identity(mut self, identity: Identity) -> Self {
    self.identity = identity;
    self
  }

  /// Value of `name`; empty values count as unset.
  pub fn get(&self, name: &str) -> Option<&str> {
    self.vars.get(name).map(String::as_str).filter(|value| !value.is_empty())
  }

  pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.vars.insert(name.into(), value.into());
  }

  pub fn host_home(&self) -> Option<&Path> {
    self.host_home.as_deref()
  }

  pub fn host_temp(&self) -> Option<&Path> {
    self.host_temp.as_deref()
  }

  pub fn identity(&self) -> &Identity {
    &self.identity
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn capture_reads_live_variables() {
    temp_env::with_vars(
      [
        ("HOME", Some("/home/captured")),
        ("XDG_DATA_HOME", Some("/data/captured")),
        (CONFIG_DIR_ENV, None::<&str>),
      ],
      || {
        let snapshot = EnvSnapshot::capture();
        assert_eq!(snapshot.get("HOME"), Some("/home/captured"));
        assert_eq!(snapshot.get("XDG_DATA_HOME"), Some("/data/captured"));
        assert_eq!(snapshot.get(CONFIG_DIR_ENV), None);
      },
    );
  }

  #[test]
  #[serial]
  fn capture_ignores_unlisted_variables() {
    temp_env::with_var("CROSSPLAT_UNRELATED", Some("x"), || {
      let snapshot = EnvSnapshot::capture();
      assert_eq!(snapshot.get("CROSSPLAT_UNRELATED"), None);
      assert!(snapshot.host_temp().is_some());
    });
  }

  #[test]
  fn empty_values_read_as_unset() {
    let snapshot = EnvSnapshot::from_vars([("TEMP", ""), ("TMP", "/t")]);
    assert_eq!(snapshot.get("TEMP"), None);
    assert_eq!(snapshot.get("TMP"), Some("/t"));
  }

  #[test]
  fn chown_owner_prefers_numeric_ids() {
    let identity = Identity {
      username: "alice".to_string(),
      uid: Some(1000),
      gid: Some(100),
    };
    assert_eq!(identity.chown_owner(), "1000:100");
    assert_eq!(Identity::named("alice").chown_owner(), "alice");
  }

  #[test]
  fn current_identity_has_a_name() {
    assert!(!Identity::current().username.is_empty());
  }
}
