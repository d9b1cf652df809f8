//! Pixel codec for the six Netpbm variants.
//!
//! `binary` handles P4/P5/P6 payloads (packed bits and raw samples),
//! `plain` handles P1/P2/P3 token streams. Both address the grid through
//! the shared row-major mapping in [`crate::grid`].

mod binary;
mod plain;

use std::io::{BufRead, Write};

use enough::Stop;
use rgb::RGB8;

use crate::error::NetpbmError;
use crate::format::EncodeMode;
use crate::grid::{self, PixelGrid};
use crate::header::Header;
use crate::tokenizer::Tokenizer;

/// Pixels held by the bounded intermediate buffer on binary decode/encode.
pub(crate) const BUFFER_PIXELS: usize = 1024;

/// Pixels written per line in plain-text output.
pub(crate) const PIXELS_PER_LINE: usize = 5;

/// Upper bound on the pixels reserved before any payload has been read.
const INITIAL_PIXELS: usize = BUFFER_PIXELS * 16;

/// Decode the payload that follows `header`.
///
/// `tokens` must have just parsed `header`; for binary formats the
/// remaining bytes are handed to the raw sample decoder.
pub(crate) fn decode_payload<R: BufRead>(
    mut tokens: Tokenizer<R>,
    header: &Header,
    stop: &dyn Stop,
) -> Result<PixelGrid, NetpbmError> {
    let (w, h) = dimensions(header)?;
    if header.format.is_binary() {
        tokens.finish_binary_header()?;
        binary::decode(tokens.into_inner(), header, w, h, stop)
    } else {
        plain::decode(&mut tokens, header, w, h, stop)
    }
}

/// Serialize `grid` (header included) in the encoding `mode` selects.
pub(crate) fn encode_payload<W: Write>(
    grid: &PixelGrid,
    header: &Header,
    mode: EncodeMode,
    out: W,
    stop: &dyn Stop,
) -> Result<(), NetpbmError> {
    match mode {
        EncodeMode::Binary => binary::encode(grid, header, out, stop),
        EncodeMode::Plain => plain::encode(grid, header, out, stop),
    }
}

fn dimensions(header: &Header) -> Result<(usize, usize), NetpbmError> {
    grid::grid_bytes(header.width, header.height).ok_or(NetpbmError::DimensionsTooLarge {
        width: header.width,
        height: header.height,
    })?;
    Ok((header.width as usize, header.height as usize))
}

/// Output buffer for decoded pixels.
///
/// The header alone never decides the allocation: the buffer grows as
/// pixels actually arrive.
fn pixel_buffer(total: usize) -> Vec<RGB8> {
    Vec::with_capacity(total.min(INITIAL_PIXELS))
}

/// Poll the stop token once every 16 rows.
#[inline]
fn check_stop(i: usize, w: usize, stop: &dyn Stop) -> Result<(), NetpbmError> {
    if i % w.saturating_mul(16).max(1) == 0 {
        stop.check()?;
    }
    Ok(())
}
