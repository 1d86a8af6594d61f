//! Audio backend selection and playback.
//!
//! Volume scales differ per backend: PowerShell's SoundPlayer and `afplay`
//! take 0.0 to 1.0, PulseAudio's `paplay` takes 0 to 65536. Callers pass a
//! 0.0 to 1.0 volume and [`AudioBackend::scaled_volume`] converts it.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::platform::Platform;
use crate::platform::shell::powershell_quote;
use crate::platform::tag::PlatformTag;
use crate::process::{ActionError, Attempt};

/// ALSA player tried when `paplay` is unavailable. It has no volume control.
const LINUX_FALLBACK_PLAYER: &str = "aplay";

/// Player executable and volume convention for a platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioBackend {
  pub platform: PlatformTag,
  pub player: &'static str,
  pub volume_scale: f64,
}

impl AudioBackend {
  pub fn for_tag(tag: PlatformTag) -> Self {
    let (player, volume_scale) = match tag {
      PlatformTag::Windows => ("powershell", 1.0),
      PlatformTag::MacOs => ("afplay", 1.0),
      PlatformTag::Linux => ("paplay", 65536.0),
    };
    Self {
      platform: tag,
      player,
      volume_scale,
    }
  }

  /// `volume` clamped to 0.0..=1.0 and expressed in this backend's scale.
  pub fn scaled_volume(&self, volume: f64) -> f64 {
    let volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
    volume * self.volume_scale
  }
}

impl Platform {
  pub fn audio_config(&self) -> AudioBackend {
    AudioBackend::for_tag(self.tag)
  }

  /// Play `path` and wait for the player to exit.
  ///
  /// Linux tries `paplay` and then `aplay`; the first player that succeeds
  /// wins. With `delete_after` the file is removed afterwards whatever the
  /// outcome.
  pub fn play_audio(&self, path: &Path, volume: f64, delete_after: bool) -> Attempt {
    if !self.fs.exists(path) {
      warn!(path = ?path, "audio file not found");
      return Attempt::Failed(ActionError::MissingFile {
        path: path.to_path_buf(),
      });
    }

    let backend = self.audio_config();
    let result = match self.tag {
      PlatformTag::Windows => self.play_windows(path),
      PlatformTag::MacOs => self.play_macos(path, backend.scaled_volume(volume)),
      PlatformTag::Linux => self.play_linux(path, backend.scaled_volume(volume)),
    };

    match &result {
      Ok(()) => info!(path = ?path, "played audio"),
      Err(err) => warn!(path = ?path, error = %err, "audio playback failed"),
    }

    if delete_after && self.fs.exists(path) {
      match self.fs.remove_file(path) {
        Ok(()) => debug!(path = ?path, "deleted played audio"),
        Err(err) => warn!(path = ?path, error = %err, "failed to delete played audio"),
      }
    }

    Attempt::from(result)
  }

  fn play_windows(&self, path: &Path) -> Result<(), ActionError> {
    // SoundPlayer has no volume control.
    let script = format!(
      "(New-Object Media.SoundPlayer {}).PlaySync()",
      powershell_quote(&path.to_string_lossy())
    );
    self.execute("powershell", ["-Command", script.as_str()])?;
    Ok(())
  }

  fn play_macos(&self, path: &Path, volume: f64) -> Result<(), ActionError> {
    let volume = volume.to_string();
    let target = path.to_string_lossy();
    self.execute("afplay", ["-v", volume.as_str(), &*target])?;
    Ok(())
  }

  fn play_linux(&self, path: &Path, volume: f64) -> Result<(), ActionError> {
    let target = path.to_string_lossy();
    let volume = (volume as u32).to_string();

    match self.execute("paplay", [&*target, "--volume", volume.as_str()]) {
      Ok(_) => return Ok(()),
      Err(err) => debug!(error = %err, "paplay failed, trying {}", LINUX_FALLBACK_PLAYER),
    }

    self.execute(LINUX_FALLBACK_PLAYER, [&*target])?;
    Ok(())
  }
}
