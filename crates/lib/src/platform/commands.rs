//! Unix command verbs mapped to their platform-correct executables.

use super::Platform;
use super::tag::PlatformTag;

/// Verbs whose Windows executable differs from the Unix name.
const WINDOWS_ALIASES: &[(&str, &str)] = &[
  ("ls", "dir"),
  ("cat", "type"),
  ("rm", "del"),
  ("cp", "copy"),
  ("mv", "move"),
  ("ps", "tasklist"),
  ("kill", "taskkill"),
  ("pwd", "cd"),
  ("clear", "cls"),
];

/// The executable to run for `verb` on `tag`. Unmapped verbs are returned unchanged.
pub fn translate_command(tag: PlatformTag, verb: &str) -> &str {
  if !tag.is_windows() {
    return verb;
  }

  WINDOWS_ALIASES
    .iter()
    .find(|(unix, _)| *unix == verb)
    .map(|(_, windows)| *windows)
    .unwrap_or(verb)
}

/// Rewrite `args` for `verb` on `tag`.
///
/// The only rule: Windows `mkdir` creates intermediate directories on its own,
/// so `-p` is dropped unless the caller already passed the native `/p`.
pub fn adjust_args<S: AsRef<str>>(tag: PlatformTag, verb: &str, args: &[S]) -> Vec<String> {
  let args = args.iter().map(|arg| arg.as_ref());

  if tag.is_windows() && verb == "mkdir" {
    let native = args.clone().any(|arg| arg == "/p");
    if !native {
      return args.filter(|arg| *arg != "-p").map(str::to_string).collect();
    }
  }

  args.map(str::to_string).collect()
}

impl Platform {
  pub fn translate_command<'a>(&self, verb: &'a str) -> &'a str {
    translate_command(self.tag, verb)
  }

  pub fn adjust_args<S: AsRef<str>>(&self, verb: &str, args: &[S]) -> Vec<String> {
    adjust_args(self.tag, verb, args)
  }
}
