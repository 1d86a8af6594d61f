//! Audio commands: backend inspection and playback.

use std::path::Path;

use anyhow::Result;

use crossplat_lib::Platform;

use crate::output::{OutputFormat, print_attempt, print_json, print_stat};

pub fn cmd_audio(platform: &Platform, output: OutputFormat) -> Result<()> {
  let backend = platform.audio_config();

  if output.is_json() {
    return print_json(&backend);
  }

  println!("Audio:");
  print_stat("Platform", backend.platform.as_str());
  print_stat("Player", backend.player);
  print_stat("Volume scale", &format!("0 to {}", backend.volume_scale));
  Ok(())
}

pub fn cmd_play(platform: &Platform, file: &Path, volume: f64, delete_after: bool, output: OutputFormat) -> Result<()> {
  let attempt = platform.play_audio(file, volume, delete_after);

  if output.is_json() {
    return print_json(&attempt);
  }

  print_attempt(&format!("Play {}", file.display()), &attempt);
  Ok(())
}
