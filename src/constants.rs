//! Common constants used throughout scaffolder.

/// Variable key bound to the project name. Always wins over defaults and overrides.
pub const PROJECT_KEY: &str = "PROJECT";

/// Number of leading bytes inspected when deciding whether a template file is text.
pub const TEXT_PROBE_LEN: usize = 4096;

/// Destination base used when `--dest` is not given.
pub const DEFAULT_DEST: &str = ".";
