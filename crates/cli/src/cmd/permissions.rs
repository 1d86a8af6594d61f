use std::path::Path;

use anyhow::Result;

use crossplat_lib::Platform;

use crate::output::{OutputFormat, print_attempt, print_json};

pub fn cmd_make_executable(platform: &Platform, path: &Path, output: OutputFormat) -> Result<()> {
  let attempt = platform.set_executable(path);

  if output.is_json() {
    return print_json(&attempt);
  }

  print_attempt(&format!("Make {} executable", path.display()), &attempt);
  Ok(())
}

pub fn cmd_fix_permissions(platform: &Platform, path: &Path, output: OutputFormat) -> Result<()> {
  let attempt = platform.set_directory_permissions(path);

  if output.is_json() {
    return print_json(&attempt);
  }

  print_attempt(&format!("Fix permissions on {}", path.display()), &attempt);
  Ok(())
}
