//! Console output helpers.
//!
//! All user-facing output goes through an injected `dyn Write` sink so
//! tests can capture it. Writes are best-effort: a broken stderr never
//! turns into a secondary failure.

use std::io::Write;

/// Write one line to the sink, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// The closing verdict line.
#[must_use]
pub fn verdict_line(passed: bool) -> &'static str {
    if passed {
        "Manifest validation passed."
    } else {
        "Manifest validation failed."
    }
}
