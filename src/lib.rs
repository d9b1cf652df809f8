//! # netpbm-codec
//!
//! Decoder and encoder for the Netpbm family: PBM, PGM and PPM in both
//! plain-text (`P1`, `P2`, `P3`) and binary (`P4`, `P5`, `P6`) encodings.
//!
//! Decoding yields a [`Header`] and a fully materialized [`PixelGrid`] of
//! 8-bit RGB colors. Samples are rescaled from the file's max-color range
//! with `value * 255 / max_color` (integer division); grayscale pixels are
//! stored with R = G = B and bitmap pixels are pure black or white.
//!
//! Encoding takes a grid plus a target header and writes either the token
//! stream or the packed bytes. Samples are always written on the 8-bit
//! scale with a max color of 255.
//!
//! ## Format notes
//!
//! - `P1`/`P4`: `1` is black, `0` is white. On encode a pixel is black when
//!   its red channel is at most 127.
//! - `P4` bits are packed MSB first and run continuously across rows; rows
//!   are **not** padded to a byte boundary.
//! - `P5`/`P6` samples wider than a byte (max color above 255) are read as
//!   big-endian 16-bit values.
//! - Plain output writes one header field per line and breaks the pixel
//!   stream every five pixels.
//!
//! ## Non-Goals
//!
//! - PAM (`P7`) and PFM
//! - Color management
//! - Streaming decode of images whose pixel grid does not fit in memory
//!
//! ## Usage
//!
//! ```
//! use netpbm_codec::{EncodeMode, Format, Header, Unstoppable};
//!
//! let (header, grid) = netpbm_codec::decode(b"P1\n2 2\n1 0\n0 1\n", Unstoppable)?;
//! assert_eq!(header.format, Format::P1);
//! assert_eq!(grid.get(0, 0), Some(netpbm_codec::BLACK));
//!
//! // Re-encode as binary PPM.
//! let target = Header::new(Format::P6, header.width, header.height);
//! let bytes = netpbm_codec::encode(&grid, &target, EncodeMode::Binary, Unstoppable)?;
//! assert!(bytes.starts_with(b"P6\n2 2\n255\n"));
//! # Ok::<(), netpbm_codec::NetpbmError>(())
//! ```

#![forbid(unsafe_code)]

mod decode;
mod encode;
mod error;
mod format;
mod grid;
mod header;
mod limits;
mod pnm;
pub mod tokenizer;

use std::path::Path;

pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::{NetpbmError, Result};
pub use format::{EncodeMode, Format, FormatInfo, MAX_COLOR_CEILING};
pub use grid::{BLACK, PixelGrid, WHITE, average, coords, gray, index, is_dark, normalize};
pub use header::Header;
pub use limits::Limits;
pub use rgb::RGB8;

/// Decode an in-memory PBM/PGM/PPM image.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<(Header, PixelGrid)> {
    DecodeRequest::new().decode(data, stop)
}

/// Decode a PBM/PGM/PPM file.
///
/// With `skip_extension_check` false, files not named `*.pbm`, `*.pgm` or
/// `*.ppm` are rejected before any content is read.
pub fn decode_file(
    path: impl AsRef<Path>,
    skip_extension_check: bool,
    stop: impl Stop,
) -> Result<(Header, PixelGrid)> {
    DecodeRequest::new()
        .skip_extension_check(skip_extension_check)
        .decode_file(path, stop)
}

/// Encode `grid` as described by `header` in the given mode.
pub fn encode(
    grid: &PixelGrid,
    header: &Header,
    mode: EncodeMode,
    stop: impl Stop,
) -> Result<Vec<u8>> {
    EncodeRequest::new(mode).encode(grid, header, stop)
}

/// Encode `grid` to a file.
pub fn encode_file(
    grid: &PixelGrid,
    header: &Header,
    mode: EncodeMode,
    path: impl AsRef<Path>,
    stop: impl Stop,
) -> Result<()> {
    EncodeRequest::new(mode).encode_file(grid, header, path, stop)
}
