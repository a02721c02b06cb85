//! User-facing messages and default values.

/// Banner text while initialization is loading server data.
pub const MSG_WAITING: &str = "Waiting for server data.";

/// Banner text for an empty task list.
pub const MSG_NO_TASKS: &str = "No tasks in list.";

/// Label shown for the sentinel entry of a status-selection control.
pub const STATUS_SENTINEL_LABEL: &str = "<Modify>";

/// Config file name looked up in the current directory and XDG config dir.
pub const CONFIG_FILE_NAME: &str = "taskview.toml";

/// Default log file when file logging is enabled without an explicit path.
pub const DEFAULT_LOG_FILE: &str = "taskview.log";
