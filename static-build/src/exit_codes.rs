//! Stable exit codes for the `static-build` binary.
//!
//! A failing external command propagates its own exit code instead.

/// Build, stamping and cleanup all succeeded.
pub const OK: i32 = 0;
/// Build failed for a reason other than a child exit code (missing file, bad config, ...).
pub const FAILED: i32 = 1;
