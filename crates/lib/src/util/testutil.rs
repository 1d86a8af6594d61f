//! Test doubles for the process and filesystem collaborators.
//!
//! Both doubles are cheap handles over shared state: clone one, hand the clone
//! to a [`Platform`](crate::platform::Platform), and inspect the shared handle afterwards.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::platform::fs::FileSystem;
use crate::process::{CommandOutput, CommandRunner, Invocation};

#[derive(Default)]
struct RunnerState {
  responses: HashMap<String, VecDeque<CommandOutput>>,
  calls: Vec<Invocation>,
}

/// Replays canned outputs per program, in order. A program with no remaining
/// response behaves as if it were not installed.
#[derive(Clone, Default)]
pub struct FakeRunner {
  state: Arc<Mutex<RunnerState>>,
}

impl FakeRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn respond(self, program: &str, code: i32, stdout: &str) -> Self {
    self.respond_with(program, code, stdout, "")
  }

  pub fn respond_with(self, program: &str, code: i32, stdout: &str, stderr: &str) -> Self {
    self
      .state
      .lock()
      .unwrap()
      .responses
      .entry(program.to_string())
      .or_default()
      .push_back(CommandOutput {
        code: Some(code),
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
      });
    self
  }

  pub fn calls(&self) -> Vec<Invocation> {
    self.state.lock().unwrap().calls.clone()
  }

  pub fn command_lines(&self) -> Vec<String> {
    self.calls().iter().map(Invocation::command_line).collect()
  }
}

impl CommandRunner for FakeRunner {
  fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
    let mut state = self.state.lock().unwrap();
    state.calls.push(invocation.clone());
    state
      .responses
      .get_mut(&invocation.program)
      .and_then(VecDeque::pop_front)
      .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{} not found", invocation.program)))
  }
}

#[derive(Default)]
struct FsState {
  files: BTreeSet<PathBuf>,
  removed: Vec<PathBuf>,
}

/// In-memory set of existing files.
#[derive(Clone, Default)]
pub struct FakeFs {
  state: Arc<Mutex<FsState>>,
}

impl FakeFs {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
    self.state.lock().unwrap().files.insert(path.into());
    self
  }

  pub fn removed(&self) -> Vec<PathBuf> {
    self.state.lock().unwrap().removed.clone()
  }
}

impl FileSystem for FakeFs {
  fn exists(&self, path: &Path) -> bool {
    self.state.lock().unwrap().files.contains(path)
  }

  fn remove_file(&self, path: &Path) -> io::Result<()> {
    let mut state = self.state.lock().unwrap();
    if !state.files.remove(path) {
      return Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
    }
    state.removed.push(path.to_path_buf());
    Ok(())
  }
}
