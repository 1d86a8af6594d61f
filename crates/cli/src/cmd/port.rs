//! Port ownership and process termination commands.

use anyhow::Result;

use crossplat_lib::Platform;

use crate::output::{OutputFormat, format_pids, print_attempt, print_info, print_json, print_warning};

pub fn cmd_port(platform: &Platform, port: u16, kill: bool, output: OutputFormat) -> Result<()> {
  let lookup = platform.find_process_on_port(port);

  let kills: Vec<_> = if kill {
    lookup
      .pids()
      .iter()
      .map(|pid| (*pid, platform.kill_process(*pid)))
      .collect()
  } else {
    Vec::new()
  };

  if output.is_json() {
    let killed: Vec<_> = kills
      .iter()
      .map(|(pid, attempt)| serde_json::json!({ "pid": pid, "result": attempt }))
      .collect();
    return print_json(&serde_json::json!({ "port": port, "lookup": lookup, "killed": killed }));
  }

  if let Some(err) = lookup.failure() {
    print_warning(&format!("Port lookup failed: {}", err));
  }
  print_info(&format!("Port {}: {}", port, format_pids(lookup.pids())));

  for (pid, attempt) in &kills {
    print_attempt(&format!("Kill {}", pid), attempt);
  }
  Ok(())
}

pub fn cmd_kill(platform: &Platform, pid: u32, output: OutputFormat) -> Result<()> {
  let attempt = platform.kill_process(pid);

  if output.is_json() {
    return print_json(&serde_json::json!({ "pid": pid, "result": attempt }));
  }

  print_attempt(&format!("Kill {}", pid), &attempt);
  Ok(())
}
