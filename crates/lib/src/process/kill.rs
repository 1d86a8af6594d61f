//! Forced process termination.

use tracing::{info, warn};

use super::Attempt;
use crate::platform::Platform;

impl Platform {
  /// Terminate `pid` unconditionally: `taskkill /F` on Windows, `kill -9` elsewhere.
  ///
  /// [`Attempt::succeeded`] is the success flag; a missing tool or a non-zero
  /// exit is reported as [`Attempt::Failed`].
  /// Pid 0 is never signalled: `kill -9 0` would hit the caller's whole
  /// process group, and on Windows it is the idle process.
  pub fn kill_process(&self, pid: u32) -> Attempt {
    if pid == 0 {
      warn!(pid, "refusing to terminate pid 0");
      return Attempt::Skipped("pid 0 is not a single process");
    }

    let pid_arg = pid.to_string();
    let result = if self.tag.is_windows() {
      self.execute("taskkill", ["/F", "/PID", pid_arg.as_str()])
    } else {
      self.execute("kill", ["-9", pid_arg.as_str()])
    };

    match result {
      Ok(_) => {
        info!(pid, "process terminated");
        Attempt::Completed
      }
      Err(err) => {
        warn!(pid, error = %err, "failed to terminate process");
        Attempt::Failed(err)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::env::EnvSnapshot;
  use crate::platform::tag::PlatformTag;
  use crate::process::ActionError;
  use crate::util::testutil::FakeRunner;

  fn platform(tag: PlatformTag, runner: &FakeRunner) -> Platform {
    Platform::new(tag, EnvSnapshot::from_vars([("HOME", "/h")])).with_runner(runner.clone())
  }

  #[test]
  fn windows_uses_taskkill() {
    let runner = FakeRunner::new().respond("taskkill", 0, "SUCCESS");
    assert!(platform(PlatformTag::Windows, &runner).kill_process(4242).succeeded());
    assert_eq!(runner.command_lines(), vec!["taskkill /F /PID 4242"]);
  }

  #[test]
  fn unix_sends_sigkill() {
    let runner = FakeRunner::new().respond("kill", 0, "");
    assert!(platform(PlatformTag::Linux, &runner).kill_process(77).succeeded());
    assert_eq!(runner.command_lines(), vec!["kill -9 77"]);
  }

  #[test]
  fn failure_is_false_not_a_fault() {
    let runner = FakeRunner::new().respond_with("kill", 1, "", "kill: (99999) - No such process");
    let attempt = platform(PlatformTag::MacOs, &runner).kill_process(99999);
    assert!(!attempt.succeeded());
    assert!(matches!(attempt.error(), Some(ActionError::Exit { code: Some(1), .. })));

    let attempt = platform(PlatformTag::Windows, &FakeRunner::new()).kill_process(1);
    assert!(!attempt.succeeded());
  }

  #[test]
  fn pid_zero_is_skipped_without_running_anything() {
    for tag in [PlatformTag::Linux, PlatformTag::MacOs, PlatformTag::Windows] {
      let runner = FakeRunner::new();
      let attempt = platform(tag, &runner).kill_process(0);
      assert!(attempt.is_skipped());
      assert!(!attempt.succeeded());
      assert!(runner.command_lines().is_empty());
    }
  }
}
