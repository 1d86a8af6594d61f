//! Names shared across the crate.

/// Environment variable that overrides the configuration root.
pub const CONFIG_DIR_ENV: &str = "PAI_DIR";

/// Directory under the home directory used when no override is set.
pub const CONFIG_DIR_NAME: &str = ".claude";

/// Application name used for log directories when the caller does not pick one.
pub const DEFAULT_APP_NAME: &str = "PAI";

/// Directory under the home directory holding working projects.
pub const PROJECTS_DIR_NAME: &str = "Projects";

/// File recording when the current session started.
pub const SESSION_START_FILE: &str = "pai-session-start.txt";
