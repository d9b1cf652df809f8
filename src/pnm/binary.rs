//! Binary payloads: P4 (packed bits), P5 (gray samples), P6 (RGB samples).
//!
//! P4 bits run continuously across row boundaries; rows are not padded to
//! a byte.

use std::io::{BufWriter, ErrorKind, Read, Write};

use enough::Stop;
use rgb::RGB8;

use super::{BUFFER_PIXELS, check_stop, pixel_buffer};
use crate::error::NetpbmError;
use crate::format::{EncodeMode, Format};
use crate::grid::{self, BLACK, PixelGrid, WHITE};
use crate::header::Header;

pub(super) fn decode<R: Read>(
    mut reader: R,
    header: &Header,
    w: usize,
    h: usize,
    stop: &dyn Stop,
) -> Result<PixelGrid, NetpbmError> {
    let total = w * h;
    let mut pixels = pixel_buffer(total);
    let mut i = 0;

    let found_with_extra = match header.format {
        Format::P4 => {
            let needed = total.div_ceil(8);
            let (_, extra) = stream_payload(&mut reader, needed, BUFFER_PIXELS, |chunk| {
                for &byte in chunk {
                    check_stop(i, w, stop)?;
                    for bit in 0..8 {
                        if i == total {
                            break;
                        }
                        let black = byte & (0x80 >> bit) != 0;
                        pixels.push(if black { BLACK } else { WHITE });
                        i += 1;
                    }
                }
                Ok(())
            })?;
            total as u64 + extra * 8
        }
        Format::P5 | Format::P6 => {
            let max_color = header.max_color;
            let bpp = header.format.bytes_per_pixel(max_color);
            let wide = max_color > 255;
            let needed = total * bpp;
            let (_, extra) = stream_payload(&mut reader, needed, BUFFER_PIXELS * bpp, |chunk| {
                for px in chunk.chunks_exact(bpp) {
                    check_stop(i, w, stop)?;
                    let color = if header.format == Format::P5 {
                        grid::gray(sample(px, 0, wide, max_color)?)
                    } else {
                        RGB8::new(
                            sample(px, 0, wide, max_color)?,
                            sample(px, 1, wide, max_color)?,
                            sample(px, 2, wide, max_color)?,
                        )
                    };
                    pixels.push(color);
                    i += 1;
                }
                Ok(())
            })?;
            total as u64 + extra.div_ceil(bpp as u64)
        }
        format => {
            return Err(NetpbmError::FormatModeMismatch {
                format,
                mode: EncodeMode::Binary,
            });
        }
    };

    if i < total {
        return Err(NetpbmError::PixelCountMismatch {
            expected: total as u64,
            found: i as u64,
        });
    }
    if found_with_extra > total as u64 {
        return Err(NetpbmError::PixelCountMismatch {
            expected: total as u64,
            found: found_with_extra,
        });
    }
    PixelGrid::from_pixels(w, h, pixels)
}

/// Sample `idx` of a pixel, normalized to 8 bits.
///
/// Samples wider than a byte are big-endian: `(high << 8) | low`.
fn sample(px: &[u8], idx: usize, wide: bool, max_color: u32) -> Result<u8, NetpbmError> {
    let value = if wide {
        (u32::from(px[2 * idx]) << 8) | u32::from(px[2 * idx + 1])
    } else {
        u32::from(px[idx])
    };
    if value > max_color {
        return Err(NetpbmError::FormatViolation(format!(
            "sample {value} exceeds max color {max_color}"
        )));
    }
    Ok(grid::normalize(value, max_color))
}

/// Feed the first `needed` payload bytes to `sink`, `chunk_len` bytes at a time.
///
/// Returns the payload bytes delivered and the count of bytes that followed
/// them.
fn stream_payload<R: Read>(
    reader: &mut R,
    needed: usize,
    chunk_len: usize,
    mut sink: impl FnMut(&[u8]) -> Result<(), NetpbmError>,
) -> Result<(usize, u64), NetpbmError> {
    let mut buf = vec![0u8; chunk_len];
    let mut delivered = 0;
    let mut extra = 0u64;
    loop {
        let n = read_chunk(reader, &mut buf)?;
        if n == 0 {
            break;
        }
        log::trace!("payload refill: {n} bytes");
        let take = n.min(needed - delivered);
        if take > 0 {
            sink(&buf[..take])?;
            delivered += take;
        }
        extra += (n - take) as u64;
        if n < buf.len() {
            break;
        }
    }
    Ok((delivered, extra))
}

/// Fill `buf` completely unless the reader runs dry first.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

pub(super) fn encode<W: Write>(
    grid: &PixelGrid,
    header: &Header,
    out: W,
    stop: &dyn Stop,
) -> Result<(), NetpbmError> {
    let format = header.format;
    let bpp = format.bytes_per_pixel(255);
    let mut out = BufWriter::with_capacity(BUFFER_PIXELS * bpp, out);
    out.write_all(&header.to_binary_bytes())?;

    let w = grid.width();
    let total = grid.len();
    match format {
        Format::P4 => {
            for start in (0..total).step_by(8) {
                check_stop(start, w, stop)?;
                let end = (start + 8).min(total);
                let mut byte = 0u8;
                for (bit, i) in (start..end).enumerate() {
                    if grid::is_dark(grid.pixel_at(i)) {
                        byte |= 0x80 >> bit;
                    }
                }
                out.write_all(&[byte])?;
            }
        }
        Format::P5 => {
            for i in 0..total {
                check_stop(i, w, stop)?;
                out.write_all(&[grid::average(grid.pixel_at(i))])?;
            }
        }
        Format::P6 => {
            for i in 0..total {
                check_stop(i, w, stop)?;
                let c = grid.pixel_at(i);
                out.write_all(&[c.r, c.g, c.b])?;
            }
        }
        format => {
            return Err(NetpbmError::FormatModeMismatch {
                format,
                mode: EncodeMode::Binary,
            });
        }
    }
    out.flush()?;
    log::trace!("wrote {format} payload for {total} pixels");
    Ok(())
}
