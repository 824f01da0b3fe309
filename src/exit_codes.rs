//! Standard exit codes for appbundle binaries
//!
//! The inspector reports each container failure kind with its own code so
//! scripts driving it can react the way the device launcher would.

use crate::exceptions::AppError;

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Generic error (avoid using - be more specific)
pub const EXIT_ERROR: i32 = 1;

/// Panic or unrecoverable error
pub const EXIT_PANIC: i32 = 101;

/// Not an app container (bad magic)
pub const EXIT_FORMAT_ERROR: i32 = 102;

/// App container with an unsupported format version
pub const EXIT_VERSION_ERROR: i32 = 103;

/// Corrupt container bookkeeping (truncated, size or layout mismatch)
pub const EXIT_CORRUPT_ERROR: i32 = 104;

/// Checksum or fingerprint mismatch
pub const EXIT_CHECKSUM_ERROR: i32 = 105;

/// Container exceeds the configured size limit
pub const EXIT_TOO_LARGE: i32 = 106;

/// Producer input rejected (icon size, oversized code)
pub const EXIT_INVALID_INPUT: i32 = 107;

/// I/O error (file not found, permission denied, disk error)
pub const EXIT_IO_ERROR: i32 = 108;

/// Map an error to the exit code reported by the binaries
pub fn exit_code_for(err: &AppError) -> i32 {
    match err {
        AppError::BadMagic { .. } => EXIT_FORMAT_ERROR,
        AppError::UnsupportedVersion { .. } => EXIT_VERSION_ERROR,
        AppError::Truncated { .. } | AppError::SizeMismatch { .. } | AppError::LayoutCorrupt(_) => {
            EXIT_CORRUPT_ERROR
        }
        AppError::ChecksumMismatch { .. } => EXIT_CHECKSUM_ERROR,
        AppError::TooLarge { .. } => EXIT_TOO_LARGE,
        AppError::InvalidInput(_) => EXIT_INVALID_INPUT,
        AppError::IoError(_) => EXIT_IO_ERROR,
        AppError::JsonError(_) | AppError::Generic(_) => EXIT_ERROR,
    }
}
