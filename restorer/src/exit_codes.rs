//! Stable exit codes for restorer CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid configuration or other errors.
pub const INVALID: i32 = 1;
/// Source document missing, unreadable, or not UTF-8.
pub const NOT_FOUND: i32 = 2;
/// Destination document could not be written.
pub const WRITE_FAILED: i32 = 3;
