//! CLI exit code registry.
//!
//! Single source of truth for this binary's shell contract — scripts rely
//! on these codes.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - e.g. inspect found no matching NEO.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unsupported output extension.
pub const EXIT_USAGE: u8 = 2;

/// I/O error - source file unreadable, output not writable.
pub const EXIT_IO: u8 = 3;

/// Parse error - malformed source data, missing required fields.
pub const EXIT_PARSE: u8 = 4;
