//! Error codes and exit status for triagectl
//!
//! sysexits-style codes so scripts can tell bad input from a broken config.

use triage_common::TriageError;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when a form value or input file is invalid
pub const EXIT_INVALID_INPUT: i32 = 65;

/// Exit code when a file cannot be read or written
pub const EXIT_IO_ERROR: i32 = 74;

/// Exit code when the configuration is unusable
pub const EXIT_CONFIG_ERROR: i32 = 78;

/// Map an error chain to an exit code
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<TriageError>())
        .map(TriageError::exit_code)
        .unwrap_or(EXIT_GENERAL_ERROR)
}
