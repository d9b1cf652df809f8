use std::path::PathBuf;

use enough::StopReason;

use crate::format::{EncodeMode, Format};

/// Errors from Netpbm decoding and encoding.
///
/// Every variant is terminal for the call that produced it: no partial
/// grid or byte stream is ever returned alongside an error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NetpbmError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("unexpected file extension (expected pbm, pgm or ppm): {}", .0.display())]
    UnexpectedExtension(PathBuf),

    #[error("unsupported format tag: {0:?}")]
    UnsupportedFormat(String),

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("format violation: {0}")]
    FormatViolation(String),

    #[error("pixel count mismatch: header declares {expected} pixels, payload holds {found}")]
    PixelCountMismatch { expected: u64, found: u64 },

    #[error("unexpected end of input")]
    EndOfInput,

    #[error("format {format} cannot be written in {mode:?} mode")]
    FormatModeMismatch { format: Format, mode: EncodeMode },

    #[error("header describes {header_width}x{header_height} but grid is {grid_width}x{grid_height}")]
    DimensionMismatch {
        header_width: u32,
        header_height: u32,
        grid_width: usize,
        grid_height: usize,
    },

    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for NetpbmError {
    fn from(r: StopReason) -> Self {
        NetpbmError::Cancelled(r)
    }
}

/// Result alias with [`NetpbmError`].
pub type Result<T> = core::result::Result<T, NetpbmError>;
