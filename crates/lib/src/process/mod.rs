//! External process invocation.
//!
//! Every administrative action runs one external tool through a
//! [`CommandRunner`] and reports the outcome as an [`Attempt`] instead of an
//! error: the actions are best-effort, but the failure stays inspectable.

pub mod kill;
pub mod ports;

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::platform::Platform;

/// A program and its arguments, run without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  /// `PATH` for the child; inherited from this process when `None`.
  pub search_path: Option<String>,
}

impl Invocation {
  pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      program: program.into(),
      args: args.into_iter().map(Into::into).collect(),
      search_path: None,
    }
  }

  /// The invocation as one line, for logs and error messages.
  pub fn command_line(&self) -> String {
    std::iter::once(self.program.as_str())
      .chain(self.args.iter().map(String::as_str))
      .map(|part| {
        if part.is_empty() || part.contains(char::is_whitespace) {
          format!("\"{}\"", part)
        } else {
          part.to_string()
        }
      })
      .collect::<Vec<_>>()
      .join(" ")
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.command_line())
  }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
  /// Exit code; `None` when the process was ended by a signal.
  pub code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl CommandOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// Process-spawning collaborator.
pub trait CommandRunner: Send + Sync {
  /// Run `invocation` to completion. `Err` means it could not be started.
  fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput>;
}

/// Runs commands on the host with [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HostRunner;

impl CommandRunner for HostRunner {
  fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
    let mut command = Command::new(&invocation.program);
    command.args(&invocation.args).stdin(Stdio::null());
    if let Some(path) = &invocation.search_path {
      command.env("PATH", path);
    }

    let output = command.output()?;
    Ok(CommandOutput {
      code: output.status.code(),
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
  }
}

/// Why a best-effort action did not complete.
#[derive(Debug, Error)]
pub enum ActionError {
  /// The tool is missing or could not be started.
  #[error("failed to start {command}: {source}")]
  Spawn {
    command: String,
    #[source]
    source: io::Error,
  },

  /// The tool ran and exited unsuccessfully.
  #[error("{command} exited with status {}: {stderr}", display_code(.code))]
  Exit {
    command: String,
    code: Option<i32>,
    stderr: String,
  },

  /// The tool's output could not be interpreted.
  #[error("unexpected output from {command}: {message}")]
  Parse { command: String, message: String },

  /// A file the action needs does not exist.
  #[error("file not found: {}", .path.display())]
  MissingFile { path: PathBuf },
}

fn display_code(code: &Option<i32>) -> String {
  code.map_or_else(|| "none".to_string(), |code| code.to_string())
}

impl ActionError {
  /// Exit code of the failed tool, when it ran at all.
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      ActionError::Exit { code, .. } => *code,
      _ => None,
    }
  }
}

/// Outcome of a best-effort action.
#[derive(Debug)]
pub enum Attempt {
  Completed,
  /// Nothing to do on this platform.
  Skipped(&'static str),
  Failed(ActionError),
}

impl Attempt {
  /// `true` only when the action ran and succeeded.
  pub fn succeeded(&self) -> bool {
    matches!(self, Attempt::Completed)
  }

  pub fn is_skipped(&self) -> bool {
    matches!(self, Attempt::Skipped(_))
  }

  pub fn error(&self) -> Option<&ActionError> {
    match self {
      Attempt::Failed(err) => Some(err),
      _ => None,
    }
  }
}

impl From<Result<(), ActionError>> for Attempt {
  fn from(result: Result<(), ActionError>) -> Self {
    match result {
      Ok(()) => Attempt::Completed,
      Err(err) => Attempt::Failed(err),
    }
  }
}

impl Serialize for Attempt {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("Attempt", 3)?;
    match self {
      Attempt::Completed => {
        state.serialize_field("status", "completed")?;
        state.skip_field("detail")?;
        state.skip_field("exit_code")?;
      }
      Attempt::Skipped(reason) => {
        state.serialize_field("status", "skipped")?;
        state.serialize_field("detail", reason)?;
        state.skip_field("exit_code")?;
      }
      Attempt::Failed(err) => {
        state.serialize_field("status", "failed")?;
        state.serialize_field("detail", &err.to_string())?;
        state.serialize_field("exit_code", &err.exit_code())?;
      }
    }
    state.end()
  }
}

impl Platform {
  /// Run `program` once, passing the context's `PATH`. Only a failure to
  /// start is an error; the exit status is left to the caller.
  pub(crate) fn spawn<I, S>(&self, program: &str, args: I) -> Result<(Invocation, CommandOutput), ActionError>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let mut invocation = Invocation::new(program, args);
    invocation.search_path = self.env.get("PATH").map(str::to_string);

    debug!(command = %invocation, "running");
    match self.runner.run(&invocation) {
      Ok(output) => Ok((invocation, output)),
      Err(source) => Err(ActionError::Spawn {
        command: invocation.command_line(),
        source,
      }),
    }
  }

  /// Run `program` once and require a zero exit status.
  pub(crate) fn execute<I, S>(&self, program: &str, args: I) -> Result<CommandOutput, ActionError>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let (invocation, output) = self.spawn(program, args)?;
    if output.success() {
      return Ok(output);
    }

    Err(ActionError::Exit {
      command: invocation.command_line(),
      code: output.code,
      stderr: output.stderr.trim().to_string(),
    })
  }
}
