/// Standard Unix exit codes for the tagfolio CLI.
///
/// These codes follow the BSD convention (sysexits.h) where possible.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error - invalid arguments, missing required parameters, etc.
pub const USAGE: i32 = 64;

/// Input data was incorrect - invalid tag name, limit exceeded
pub const DATAERR: i32 = 65;

/// Record, tag or image does not exist
pub const NOINPUT: i32 = 66;

/// Reading files or talking to storage failed
pub const IOERR: i32 = 74;
