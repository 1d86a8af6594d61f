mod audio;
mod info;
mod path_add;
mod paths;
mod permissions;
mod port;
mod shell;
mod translate;
mod troubleshoot;

pub use audio::{cmd_audio, cmd_play};
pub use info::cmd_info;
pub use path_add::cmd_path_add;
pub use paths::cmd_paths;
pub use permissions::{cmd_fix_permissions, cmd_make_executable};
pub use port::{cmd_kill, cmd_port};
pub use shell::cmd_shell;
pub use translate::cmd_translate;
pub use troubleshoot::cmd_troubleshoot;
