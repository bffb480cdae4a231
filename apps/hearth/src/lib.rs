//! # Hearth
//!
//! Library half of the Hearth binary: CLI definitions, command
//! implementations and configuration loading. Exposed as a library so the
//! integration tests can drive commands without spawning a process.

pub mod cli;
pub mod config;

use hearth_core::HearthError;

/// Exit code for input the store rejected ("fix your input").
pub const EXIT_VALIDATION: i32 = 2;

/// Exit code for storage, config or output failures ("try again later").
pub const EXIT_FAILURE: i32 = 1;

/// Map an error to the process exit code.
#[must_use]
pub fn exit_code(error: &HearthError) -> i32 {
    if error.is_validation() {
        EXIT_VALIDATION
    } else {
        EXIT_FAILURE
    }
}
