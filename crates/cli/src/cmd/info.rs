use anyhow::Result;

use crossplat_lib::Platform;

use crate::output::{OutputFormat, print_json, print_stat};

pub fn cmd_info(platform: &Platform, output: OutputFormat) -> Result<()> {
  let tag = platform.tag();
  let host = std::env::consts::OS;

  if output.is_json() {
    let json = serde_json::json!({
      "platform": tag,
      "host": host,
      "is_windows": platform.is_windows(),
      "is_mac": platform.is_mac(),
      "is_linux": platform.is_linux(),
      "path_separator": platform.path_separator().to_string(),
      "path_delimiter": platform.path_delimiter().to_string(),
      "user": platform.env().identity().username,
    });
    return print_json(&json);
  }

  println!("System:");
  print_stat("Platform", tag.as_str());
  print_stat("Host", host);
  print_stat("User", &platform.env().identity().username);
  print_stat("Path separator", &platform.path_separator().to_string());
  print_stat("PATH delimiter", &platform.path_delimiter().to_string());
  Ok(())
}
