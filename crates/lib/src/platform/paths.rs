//! Path and environment mapping.
//!
//! Paths are composed as strings with the separator of the context's tag rather
//! than the host's, so a Windows context produces `C:\Users\...` even when the
//! code runs elsewhere.

use std::path::PathBuf;

use tracing::debug;

use super::Platform;
use super::tag::PlatformTag;
use crate::consts::{CONFIG_DIR_ENV, CONFIG_DIR_NAME, PROJECTS_DIR_NAME, SESSION_START_FILE};

/// Component separator inside a single path.
pub fn separator(tag: PlatformTag) -> char {
  if tag.is_windows() { '\\' } else { '/' }
}

/// Separator between entries of a search-path variable such as `PATH`.
pub fn delimiter(tag: PlatformTag) -> char {
  if tag.is_windows() { ';' } else { ':' }
}

/// Whether `path` is absolute under `tag`'s rules.
///
/// Windows accepts a drive letter followed by a separator, or a leading
/// separator (rooted and UNC paths).
pub fn is_absolute(tag: PlatformTag, path: &str) -> bool {
  if !tag.is_windows() {
    return path.starts_with('/');
  }

  if path.starts_with(['\\', '/']) {
    return true;
  }

  let bytes = path.as_bytes();
  bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && matches!(bytes[2], b'\\' | b'/')
}

/// Normalize `path` lexically: unify separators, drop `.` and empty
/// components, and resolve `..` against preceding components.
///
/// On Windows forward slashes become backslashes first. A `..` at the root of
/// an absolute path is discarded; in a relative path it is kept.
pub fn normalize(tag: PlatformTag, path: &str) -> String {
  let sep = separator(tag);
  let unified = if tag.is_windows() {
    path.replace('/', "\\")
  } else {
    path.to_string()
  };

  let (prefix, rest) = split_prefix(tag, &unified);
  let rooted = rest.starts_with(sep);

  let mut parts: Vec<&str> = Vec::new();
  for part in rest.split(sep) {
    match part {
      "" | "." => {}
      ".." => {
        if parts.last().is_some_and(|last| *last != "..") {
          parts.pop();
        } else if !rooted {
          parts.push("..");
        }
      }
      other => parts.push(other),
    }
  }

  let mut out = String::from(prefix);
  if rooted {
    out.push(sep);
  }
  out.push_str(&parts.join(&sep.to_string()));

  if out.is_empty() || (out == prefix && !prefix.is_empty()) {
    out.push('.');
  }
  out
}

/// Split a Windows drive (`C:`) or the first backslash of a UNC path off the front.
fn split_prefix(tag: PlatformTag, path: &str) -> (&str, &str) {
  if !tag.is_windows() {
    return ("", path);
  }

  if path.starts_with("\\\\") {
    return path.split_at(1);
  }

  let bytes = path.as_bytes();
  if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
    return path.split_at(2);
  }

  ("", path)
}

/// Join `segments` with `tag`'s separator and normalize the result.
///
/// Empty segments are skipped. Unlike [`std::path::Path::join`], a later
/// absolute segment does not replace what came before it.
pub fn join<I, S>(tag: PlatformTag, segments: I) -> String
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let sep = separator(tag).to_string();
  let joined = segments
    .into_iter()
    .filter(|segment| !segment.as_ref().is_empty())
    .map(|segment| segment.as_ref().to_string())
    .collect::<Vec<_>>()
    .join(&sep);
  normalize(tag, &joined)
}

fn default_home(tag: PlatformTag) -> &'static str {
  if tag.is_windows() { "C:\\Users\\Default" } else { "/" }
}

impl Platform {
  /// The user's home directory.
  ///
  /// `USERPROFILE` on Windows or `HOME` elsewhere, then the host's own home
  /// lookup, then a fixed default. Values that are not absolute are skipped.
  pub fn home_directory(&self) -> PathBuf {
    PathBuf::from(self.home_string())
  }

  pub(crate) fn home_string(&self) -> String {
    let var = if self.tag.is_windows() { "USERPROFILE" } else { "HOME" };

    if let Some(home) = self.env.get(var).filter(|home| is_absolute(self.tag, home)) {
      return normalize(self.tag, home);
    }

    let host_home = self
      .env
      .host_home()
      .and_then(|home| home.to_str())
      .filter(|home| is_absolute(self.tag, home));
    if let Some(home) = host_home {
      debug!(var, "home override unset, using host home directory");
      return normalize(self.tag, home);
    }

    debug!(var, "no home directory available, using default");
    default_home(self.tag).to_string()
  }

  /// Root for all persisted state: `PAI_DIR` if set, else `<home>/.claude`.
  ///
  /// A relative override is taken relative to the home directory.
  pub fn config_directory(&self) -> PathBuf {
    let home = self.home_string();
    let dir = match self.env.get(CONFIG_DIR_ENV) {
      Some(dir) if is_absolute(self.tag, dir) => normalize(self.tag, dir),
      Some(dir) => join(self.tag, [home.as_str(), dir]),
      None => join(self.tag, [home.as_str(), CONFIG_DIR_NAME]),
    };
    PathBuf::from(dir)
  }

  /// Directory for temporary files.
  ///
  /// Windows consults `TEMP` then `TMP` before the host's temp directory;
  /// other platforms use the host's temp directory directly.
  pub fn temp_directory(&self) -> PathBuf {
    PathBuf::from(self.temp_string())
  }

  fn temp_string(&self) -> String {
    if self.tag.is_windows() {
      for var in ["TEMP", "TMP"] {
        match self.env.get(var) {
          Some(temp) if is_absolute(self.tag, temp) => return normalize(self.tag, temp),
          Some(temp) => debug!(var, value = temp, "ignoring relative temp directory"),
          None => {}
        }
      }
      return match self.env.host_temp().and_then(|temp| temp.to_str()) {
        Some(temp) if is_absolute(self.tag, temp) => normalize(self.tag, temp),
        _ => join(self.tag, [self.home_string().as_str(), "AppData", "Local", "Temp"]),
      };
    }

    match self.env.host_temp().and_then(|temp| temp.to_str()) {
      Some(temp) if is_absolute(self.tag, temp) => normalize(self.tag, temp),
      _ => "/tmp".to_string(),
    }
  }

  /// Where `app_name` writes logs. The directory is not created.
  ///
  /// - Windows: `<home>\AppData\Local\<app>\logs`
  /// - macOS: `<home>/Library/Logs/<app>`
  /// - Linux: `<XDG_DATA_HOME or home/.local/share>/<app>/logs`
  pub fn log_directory(&self, app_name: &str) -> PathBuf {
    let home = self.home_string();
    let dir = match self.tag {
      PlatformTag::Windows => join(self.tag, [home.as_str(), "AppData", "Local", app_name, "logs"]),
      PlatformTag::MacOs => join(self.tag, [home.as_str(), "Library", "Logs", app_name]),
      PlatformTag::Linux => {
        let data_home = match self.env.get("XDG_DATA_HOME") {
          Some(data_home) if is_absolute(self.tag, data_home) => data_home.to_string(),
          _ => join(self.tag, [home.as_str(), ".local", "share"]),
        };
        join(self.tag, [data_home.as_str(), app_name, "logs"])
      }
    };
    PathBuf::from(dir)
  }

  /// The caller's projects directory if given, else `<home>/Projects`.
  pub fn projects_directory(&self, override_dir: Option<&str>) -> PathBuf {
    match override_dir.filter(|dir| !dir.is_empty()) {
      Some(dir) => PathBuf::from(normalize(self.tag, dir)),
      None => PathBuf::from(join(self.tag, [self.home_string().as_str(), PROJECTS_DIR_NAME])),
    }
  }

  /// File recording the session start time.
  pub fn session_start_file(&self) -> PathBuf {
    let file = if self.tag.is_windows() {
      join(self.tag, [self.temp_string().as_str(), SESSION_START_FILE])
    } else {
      join(self.tag, ["/tmp", SESSION_START_FILE])
    };
    PathBuf::from(file)
  }

  pub fn path_delimiter(&self) -> char {
    delimiter(self.tag)
  }

  pub fn path_separator(&self) -> char {
    separator(self.tag)
  }

  pub fn join_path<I, S>(&self, segments: I) -> PathBuf
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    PathBuf::from(join(self.tag, segments))
  }

  pub fn normalize_path(&self, path: &str) -> PathBuf {
    PathBuf::from(normalize(self.tag, path))
  }

  pub fn is_absolute(&self, path: &str) -> bool {
    is_absolute(self.tag, path)
  }

  /// The context's `PATH`, empty when unset.
  pub fn search_path(&self) -> &str {
    self.env.get("PATH").unwrap_or("")
  }

  /// Put `dir` at the front of the context's `PATH` unless the value already
  /// contains it. Returns whether `PATH` changed.
  ///
  /// Subprocesses spawned through this context see the updated value.
  pub fn add_to_path(&mut self, dir: &str) -> bool {
    if dir.is_empty() {
      return false;
    }

    let current = self.search_path();
    if current.contains(dir) {
      debug!(dir, "already on PATH");
      return false;
    }

    let updated = if current.is_empty() {
      dir.to_string()
    } else {
      format!("{}{}{}", dir, self.path_delimiter(), current)
    };
    debug!(dir, "prepending to PATH");
    self.env.set("PATH", updated);
    true
  }
}
