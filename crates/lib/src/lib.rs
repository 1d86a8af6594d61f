//! crossplat-lib: one interface over Windows, macOS and Linux host differences
//!
//! - `platform`: tag resolution, the [`Platform`] context, paths, command
//!   aliases and shell profiles
//! - `process`: external tool invocation, port ownership and termination
//! - `permissions`: executable bits, directory ownership and ACL grants
//! - `audio`: player selection, volume scales and playback
//! - `troubleshoot`: per-platform guidance text

pub mod audio;
pub mod consts;
pub mod permissions;
pub mod platform;
pub mod process;
pub mod troubleshoot;

#[cfg(test)]
mod util;

pub use audio::AudioBackend;
pub use platform::Platform;
pub use platform::env::{EnvSnapshot, Identity};
pub use platform::shell::{Shell, ShellProfile};
pub use platform::tag::PlatformTag;
pub use process::ports::PortLookup;
pub use process::{ActionError, Attempt, CommandOutput, CommandRunner, Invocation};
