//! Which processes own a TCP port.
//!
//! Windows reads `netstat -ano` and keeps the lines mentioning the port; Unix
//! asks `lsof` for the pids bound to the port directly.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use super::ActionError;
use crate::platform::Platform;

/// Pids bound to a port, plus the reason the lookup failed if it did.
///
/// A failed lookup always has an empty pid set.
#[derive(Debug, Default)]
pub struct PortLookup {
  pids: BTreeSet<u32>,
  failure: Option<ActionError>,
}

impl PortLookup {
  fn found(pids: BTreeSet<u32>) -> Self {
    Self { pids, failure: None }
  }

  fn failed(err: ActionError) -> Self {
    Self {
      pids: BTreeSet::new(),
      failure: Some(err),
    }
  }

  /// Deduplicated pids, ascending.
  pub fn pids(&self) -> &BTreeSet<u32> {
    &self.pids
  }

  pub fn into_pids(self) -> BTreeSet<u32> {
    self.pids
  }

  pub fn is_empty(&self) -> bool {
    self.pids.is_empty()
  }

  pub fn failure(&self) -> Option<&ActionError> {
    self.failure.as_ref()
  }
}

impl Serialize for PortLookup {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeStruct;

    let mut state = serializer.serialize_struct("PortLookup", 2)?;
    state.serialize_field("pids", &self.pids)?;
    state.serialize_field("error", &self.failure.as_ref().map(ToString::to_string))?;
    state.end()
  }
}

/// Pids from `netstat -ano` lines that mention `:<port>` as an address.
///
/// The pid is the last column. Lines whose last column is not a number, and
/// the idle pid 0 that netstat reports for `TIME_WAIT` sockets, are skipped.
pub fn parse_netstat(output: &str, port: u16) -> BTreeSet<u32> {
  let suffix = format!(":{}", port);
  output
    .lines()
    .filter(|line| line.split_whitespace().any(|column| column.ends_with(&suffix)))
    .filter_map(|line| line.split_whitespace().last())
    .filter_map(|pid| pid.parse::<u32>().ok())
    .filter(|pid| *pid != 0)
    .collect()
}

/// Pids from `lsof -t` output, one per line.
pub fn parse_lsof(output: &str) -> Result<BTreeSet<u32>, String> {
  let mut pids = BTreeSet::new();
  for line in output.lines().map(str::trim).filter(|line| !line.is_empty()) {
    match line.parse::<u32>() {
      Ok(pid) => {
        pids.insert(pid);
      }
      Err(_) => return Err(format!("not a pid: {:?}", line)),
    }
  }
  Ok(pids)
}

impl Platform {
  /// Processes currently bound to TCP `port`.
  ///
  /// Never fails outright: a missing tool, a non-zero exit or unreadable output
  /// yields an empty set with [`PortLookup::failure`] describing why. `lsof`
  /// exiting 1 with no output means nothing is listening and is not a failure.
  pub fn find_process_on_port(&self, port: u16) -> PortLookup {
    let result = if self.tag.is_windows() {
      self.netstat_lookup(port)
    } else {
      self.lsof_lookup(port)
    };

    match result {
      Ok(pids) => {
        debug!(port, count = pids.len(), "port lookup finished");
        PortLookup::found(pids)
      }
      Err(err) => {
        warn!(port, error = %err, "port lookup failed");
        PortLookup::failed(err)
      }
    }
  }

  fn netstat_lookup(&self, port: u16) -> Result<BTreeSet<u32>, ActionError> {
    let output = self.execute("netstat", ["-ano"])?;
    Ok(parse_netstat(&output.stdout, port))
  }

  fn lsof_lookup(&self, port: u16) -> Result<BTreeSet<u32>, ActionError> {
    let (invocation, output) = self.spawn("lsof", ["-t".to_string(), format!("-i:{}", port)])?;

    if output.code == Some(1) && output.stdout.trim().is_empty() {
      return Ok(BTreeSet::new());
    }
    if !output.success() {
      return Err(ActionError::Exit {
        command: invocation.command_line(),
        code: output.code,
        stderr: output.stderr.trim().to_string(),
      });
    }

    parse_lsof(&output.stdout).map_err(|message| ActionError::Parse {
      command: invocation.command_line(),
      message,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::env::EnvSnapshot;
  use crate::platform::tag::PlatformTag;
  use crate::util::testutil::FakeRunner;

  const NETSTAT: &str = "
Active Connections

  Proto  Local Address          Foreign Address        State           PID
  TCP    0.0.0.0:3000           0.0.0.0:0              LISTENING       4242
  TCP    [::]:3000              [::]:0                 LISTENING       4242
  TCP    127.0.0.1:3000         127.0.0.1:51234        ESTABLISHED     4242
  TCP    127.0.0.1:51234        127.0.0.1:3000         ESTABLISHED     9001
  TCP    127.0.0.1:30000        0.0.0.0:0              LISTENING       7777
  TCP    127.0.0.1:3000         127.0.0.1:51999        TIME_WAIT       0
";

  fn platform(tag: PlatformTag, runner: &FakeRunner) -> Platform {
    Platform::new(tag, EnvSnapshot::from_vars([("HOME", "/h"), ("USERPROFILE", "C:\\Users\\h")]))
      .with_runner(runner.clone())
  }

  #[test]
  fn netstat_lines_are_filtered_and_deduplicated() {
    let pids = parse_netstat(NETSTAT, 3000);
    assert_eq!(pids.into_iter().collect::<Vec<_>>(), vec![4242, 9001]);
  }

  #[test]
  fn netstat_port_match_is_exact() {
    assert!(parse_netstat(NETSTAT, 300).is_empty());
    assert_eq!(parse_netstat(NETSTAT, 30000).into_iter().collect::<Vec<_>>(), vec![7777]);
  }

  #[test]
  fn lsof_output_parses_one_pid_per_line() {
    let pids = parse_lsof("123\n456\n123\n\n").unwrap();
    assert_eq!(pids.into_iter().collect::<Vec<_>>(), vec![123, 456]);
    assert!(parse_lsof("").unwrap().is_empty());
    assert!(parse_lsof("123\nCOMMAND\n").is_err());
  }

  #[test]
  fn windows_lookup_runs_netstat() {
    let runner = FakeRunner::new().respond("netstat", 0, NETSTAT);
    let lookup = platform(PlatformTag::Windows, &runner).find_process_on_port(3000);

    assert_eq!(lookup.pids().len(), 2);
    assert!(lookup.failure().is_none());
    assert_eq!(runner.command_lines(), vec!["netstat -ano"]);
  }

  #[test]
  fn unix_lookup_runs_lsof_scoped_to_port() {
    let runner = FakeRunner::new().respond("lsof", 0, "812\n813\n");
    let lookup = platform(PlatformTag::MacOs, &runner).find_process_on_port(8080);

    assert_eq!(lookup.into_pids().into_iter().collect::<Vec<_>>(), vec![812, 813]);
    assert_eq!(runner.command_lines(), vec!["lsof -t -i:8080"]);
  }

  #[test]
  fn no_listener_is_empty_without_failure() {
    let runner = FakeRunner::new().respond("lsof", 1, "");
    let lookup = platform(PlatformTag::Linux, &runner).find_process_on_port(65000);
    assert!(lookup.is_empty());
    assert!(lookup.failure().is_none());

    let runner = FakeRunner::new().respond("netstat", 0, NETSTAT);
    let lookup = platform(PlatformTag::Windows, &runner).find_process_on_port(65000);
    assert!(lookup.is_empty());
    assert!(lookup.failure().is_none());
  }

  #[test]
  fn missing_tool_gives_empty_set_and_failure() {
    for tag in [PlatformTag::Windows, PlatformTag::MacOs, PlatformTag::Linux] {
      let lookup = platform(tag, &FakeRunner::new()).find_process_on_port(3000);
      assert!(lookup.is_empty(), "{tag}");
      assert!(matches!(lookup.failure(), Some(ActionError::Spawn { .. })), "{tag}");
    }
  }

  #[test]
  fn garbage_output_gives_empty_set_and_parse_failure() {
    let runner = FakeRunner::new().respond("lsof", 0, "lsof: WARNING: can't stat()\n");
    let lookup = platform(PlatformTag::Linux, &runner).find_process_on_port(3000);
    assert!(lookup.is_empty());
    assert!(matches!(lookup.failure(), Some(ActionError::Parse { .. })));
  }

  #[test]
  fn non_zero_exit_is_reported() {
    let runner = FakeRunner::new().respond_with("netstat", 2, "", "access denied");
    let lookup = platform(PlatformTag::Windows, &runner).find_process_on_port(3000);
    assert!(lookup.is_empty());
    assert_eq!(lookup.failure().and_then(ActionError::exit_code), Some(2));
  }

  #[test]
  fn lookup_serializes_pids_and_error() {
    let runner = FakeRunner::new().respond("lsof", 0, "5\n");
    let lookup = platform(PlatformTag::Linux, &runner).find_process_on_port(1);
    let json = serde_json::to_value(&lookup).unwrap();
    assert_eq!(json["pids"], serde_json::json!([5]));
    assert!(json["error"].is_null());
  }

  #[test]
  fn real_host_lookup_never_panics() {
    // Port 1 (tcpmux) is essentially never bound on a development machine.
    let lookup = Platform::detect().find_process_on_port(1);
    assert!(lookup.is_empty() || lookup.failure().is_none());
  }
}
