//! Paths command implementation.
//!
//! Prints every directory the platform layer resolves, without creating any.

use anyhow::Result;

use crossplat_lib::Platform;

use crate::output::{OutputFormat, print_json, print_stat};

pub fn cmd_paths(platform: &Platform, app: &str, projects: Option<&str>, output: OutputFormat) -> Result<()> {
  let entries = [
    ("home", platform.home_directory()),
    ("config", platform.config_directory()),
    ("temp", platform.temp_directory()),
    ("logs", platform.log_directory(app)),
    ("projects", platform.projects_directory(projects)),
    ("session_start_file", platform.session_start_file()),
  ];

  if output.is_json() {
    let map: serde_json::Map<String, serde_json::Value> = entries
      .iter()
      .map(|(name, path)| (name.to_string(), path.display().to_string().into()))
      .collect();
    return print_json(&map);
  }

  println!("Paths ({}):", platform.tag());
  for (name, path) in &entries {
    print_stat(name, &path.display().to_string());
  }
  Ok(())
}
