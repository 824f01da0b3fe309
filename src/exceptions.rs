//! Error types for appbundle

use std::fmt;

/// Main error type for appbundle operations
///
/// Every container validation failure has its own variant so a launcher can
/// tell "not an app" apart from "incompatible version" and "corrupt app".
#[derive(Debug)]
pub enum AppError {
    /// Buffer shorter than the fixed header
    Truncated { len: usize },

    /// Magic constant absent; not an app container at all
    BadMagic { found: u32 },

    /// Recognizable container with a version this reader does not handle
    UnsupportedVersion { found: u32 },

    /// Container larger than the configured maximum
    TooLarge { size: u64, max: u64 },

    /// Recorded total size disagrees with the buffer length
    SizeMismatch { recorded: u32, actual: usize },

    /// Section offsets or sizes are out of bounds, overlapping, or not contiguous
    LayoutCorrupt(String),

    /// Stored checksum disagrees with the recomputed one
    ChecksumMismatch { stored: u32, computed: u32 },

    /// Producer supplied data the format cannot hold
    InvalidInput(String),

    /// IO error
    IoError(std::io::Error),

    /// JSON serialization error
    JsonError(serde_json::Error),

    /// Generic error with message
    Generic(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Truncated { len } => {
                write!(f, "Truncated container: {len} bytes is shorter than the header")
            }
            AppError::BadMagic { found } => {
                write!(f, "Not an app container: bad magic 0x{found:08x}")
            }
            AppError::UnsupportedVersion { found } => {
                write!(f, "Unsupported container version: {found}")
            }
            AppError::TooLarge { size, max } => {
                write!(f, "Container too large: {size} bytes (max {max})")
            }
            AppError::SizeMismatch { recorded, actual } => write!(
                f,
                "Size mismatch: header records {recorded} bytes, buffer holds {actual}"
            ),
            AppError::LayoutCorrupt(msg) => write!(f, "Corrupt section layout: {msg}"),
            AppError::ChecksumMismatch { stored, computed } => write!(
                f,
                "Checksum mismatch: stored 0x{stored:08x}, computed 0x{computed:08x}"
            ),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            AppError::IoError(err) => write!(f, "IO error: {err}"),
            AppError::JsonError(err) => write!(f, "JSON error: {err}"),
            AppError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::IoError(err) => Some(err),
            AppError::JsonError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonError(err)
    }
}

/// Result type for appbundle operations
pub type Result<T> = std::result::Result<T, AppError>;
