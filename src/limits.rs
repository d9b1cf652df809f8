use crate::error::NetpbmError;
use crate::grid;
use crate::header::Header;

/// Caps applied to a parsed header before any pixel is decoded.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size in bytes of the decoded [`PixelGrid`](crate::PixelGrid),
    /// three bytes per pixel.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Reject `header` if decoding it would break any limit.
    pub(crate) fn check(&self, header: &Header) -> Result<(), NetpbmError> {
        within("width", u64::from(header.width), self.max_width)?;
        within("height", u64::from(header.height), self.max_height)?;
        within("pixel count", header.pixel_count(), self.max_pixels)?;
        let bytes = grid::grid_bytes(header.width, header.height).ok_or(NetpbmError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
        within("decoded grid size", bytes as u64, self.max_memory_bytes)
    }
}

fn within(what: &str, value: u64, limit: Option<u64>) -> Result<(), NetpbmError> {
    match limit {
        Some(max) if value > max => Err(NetpbmError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
