//! Path-add command implementation.
//!
//! A child process cannot change its parent's environment, so this prints the
//! resulting `PATH` and the profile line that makes the change persistent.

use anyhow::Result;

use crossplat_lib::Platform;

use crate::output::{OutputFormat, print_info, print_json, print_stat, print_success};

pub fn cmd_path_add(platform: &mut Platform, dir: &str, output: OutputFormat) -> Result<()> {
  let changed = platform.add_to_path(dir);
  let profile = platform.shell_config();
  let line = profile.shell.prepend_path("PATH", dir);

  if output.is_json() {
    return print_json(&serde_json::json!({
      "changed": changed,
      "path": platform.search_path(),
      "profile": profile.profile.display().to_string(),
      "profile_line": line,
    }));
  }

  if changed {
    print_success(&format!("Added {} to PATH", dir));
  } else {
    print_info(&format!("{} is already on PATH", dir));
  }
  print_stat("PATH", platform.search_path());
  println!();
  println!("To keep it, add this line to {}:", profile.profile.display());
  println!("  {}", line);
  Ok(())
}
