//! Platform detection and dispatch.
//!
//! [`Platform`] is the explicit context every operation runs against: the
//! resolved [`PlatformTag`], an [`EnvSnapshot`] of the host environment, and
//! the process and filesystem collaborators. Operations are grouped by
//! concern in the submodules and in [`crate::process`], [`crate::permissions`],
//! [`crate::audio`] and [`crate::troubleshoot`].

pub mod commands;
pub mod env;
pub mod fs;
pub mod paths;
pub mod shell;
pub mod tag;

use std::fmt;

use env::EnvSnapshot;
use fs::{FileSystem, HostFs};
use tag::PlatformTag;

use crate::process::{CommandRunner, HostRunner};

/// Platform context constructed once at startup and passed to callers by reference.
pub struct Platform {
  pub(crate) tag: PlatformTag,
  pub(crate) env: EnvSnapshot,
  pub(crate) runner: Box<dyn CommandRunner>,
  pub(crate) fs: Box<dyn FileSystem>,
}

impl Platform {
  /// Context for the running host with its live environment.
  pub fn detect() -> Self {
    Self::new(PlatformTag::current(), EnvSnapshot::capture())
  }

  /// Context for `tag` backed by the host's process and filesystem collaborators.
  pub fn new(tag: PlatformTag, env: EnvSnapshot) -> Self {
    Self {
      tag,
      env,
      runner: Box::new(HostRunner),
      fs: Box::new(HostFs),
    }
  }

  pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
    self.runner = Box::new(runner);
    self
  }

  pub fn with_file_system(mut self, fs: impl FileSystem + 'static) -> Self {
    self.fs = Box::new(fs);
    self
  }

  pub fn tag(&self) -> PlatformTag {
    self.tag
  }

  pub fn is_windows(&self) -> bool {
    self.tag.is_windows()
  }

  pub fn is_mac(&self) -> bool {
    self.tag.is_mac()
  }

  pub fn is_linux(&self) -> bool {
    self.tag.is_linux()
  }

  pub fn env(&self) -> &EnvSnapshot {
    &self.env
  }
}

impl fmt::Debug for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Platform")
      .field("tag", &self.tag)
      .field("env", &self.env)
      .finish_non_exhaustive()
  }
}
