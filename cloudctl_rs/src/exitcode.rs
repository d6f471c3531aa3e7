//! Process exit codes returned by the dispatcher.

/// Successful termination
pub const OK: i32 = 0;

/// Leftover invalid arguments rejected by `validate_arguments`
pub const INVALID_ARGUMENTS: i32 = 1;

/// Any handled failure (API error, timeout, unknown command, ...)
pub const FAILURE: i32 = 1;
