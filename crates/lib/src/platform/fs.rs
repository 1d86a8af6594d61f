//! Filesystem collaborator.

use std::io;
use std::path::Path;

/// The filesystem queries the platform layer needs.
pub trait FileSystem: Send + Sync {
  fn exists(&self, path: &Path) -> bool;

  fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl FileSystem for HostFs {
  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }

  fn remove_file(&self, path: &Path) -> io::Result<()> {
    std::fs::remove_file(path)
  }
}
