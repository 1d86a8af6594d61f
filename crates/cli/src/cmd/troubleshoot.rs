use anyhow::Result;

use crossplat_lib::Platform;

use crate::output::{OutputFormat, print_json};

pub fn cmd_troubleshoot(platform: &Platform, output: OutputFormat) -> Result<()> {
  let text = platform.troubleshooting_info();

  if output.is_json() {
    return print_json(&serde_json::json!({ "platform": platform.tag(), "text": text }));
  }

  print!("{}", text);
  Ok(())
}
