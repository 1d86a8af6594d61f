use anyhow::Result;

use crossplat_lib::Platform;

use crate::output::{OutputFormat, print_json, print_stat};

pub fn cmd_shell(platform: &Platform, output: OutputFormat) -> Result<()> {
  let profile = platform.shell_config();

  if output.is_json() {
    return print_json(&profile);
  }

  println!("Shell:");
  print_stat("Shell", profile.shell.as_str());
  print_stat("Profile", &profile.profile.display().to_string());
  print_stat("Command", &profile.config_cmd);
  Ok(())
}
