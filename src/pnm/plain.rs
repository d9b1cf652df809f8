//! Plain-text payloads: P1 (`0`/`1` tokens), P2 (gray), P3 (R G B triples).

use std::io::{BufRead, BufWriter, Write};

use enough::Stop;
use rgb::RGB8;

use super::{BUFFER_PIXELS, PIXELS_PER_LINE, check_stop, pixel_buffer};
use crate::error::NetpbmError;
use crate::format::{EncodeMode, Format};
use crate::grid::{self, BLACK, PixelGrid, WHITE};
use crate::header::Header;
use crate::tokenizer::{Tokenizer, parse_decimal, show};

pub(super) fn decode<R: BufRead>(
    tokens: &mut Tokenizer<R>,
    header: &Header,
    w: usize,
    h: usize,
    stop: &dyn Stop,
) -> Result<PixelGrid, NetpbmError> {
    let total = w * h;
    let max_color = header.max_color;
    let mut pixels = pixel_buffer(total);
    let mut i = 0;

    while !tokens.is_empty()? {
        let (_, y) = grid::coords(i, w);
        if y >= h {
            let remaining = count_tokens(tokens)?;
            return Err(NetpbmError::PixelCountMismatch {
                expected: total as u64,
                found: (total + remaining.div_ceil(header.format.channels())) as u64,
            });
        }
        check_stop(i, w, stop)?;
        let short = |e| truncated(e, total, i);
        let color = match header.format {
            Format::P1 => match tokens.pop().map_err(short)? {
                b"1" => BLACK,
                b"0" => WHITE,
                other => {
                    return Err(NetpbmError::FormatViolation(format!(
                        "bitmap token must be 0 or 1, got {:?}",
                        show(other)
                    )));
                }
            },
            Format::P2 => grid::gray(sample(tokens, max_color).map_err(short)?),
            Format::P3 => {
                let r = sample(tokens, max_color).map_err(short)?;
                let g = sample(tokens, max_color).map_err(short)?;
                let b = sample(tokens, max_color).map_err(short)?;
                RGB8::new(r, g, b)
            }
            format => {
                return Err(NetpbmError::FormatModeMismatch {
                    format,
                    mode: EncodeMode::Plain,
                });
            }
        };
        pixels.push(color);
        i += 1;
    }

    if i != total {
        return Err(NetpbmError::PixelCountMismatch {
            expected: total as u64,
            found: i as u64,
        });
    }
    PixelGrid::from_pixels(w, h, pixels)
}

/// A pixel cut off mid-way counts as missing, not as a header-level EOF.
fn truncated(e: NetpbmError, total: usize, decoded: usize) -> NetpbmError {
    match e {
        NetpbmError::EndOfInput => NetpbmError::PixelCountMismatch {
            expected: total as u64,
            found: decoded as u64,
        },
        e => e,
    }
}

fn sample<R: BufRead>(tokens: &mut Tokenizer<R>, max_color: u32) -> Result<u8, NetpbmError> {
    let token = tokens.pop()?;
    let value = parse_decimal(token)
        .ok_or_else(|| NetpbmError::FormatViolation(format!("sample is not an integer: {:?}", show(token))))?;
    if value > max_color {
        return Err(NetpbmError::FormatViolation(format!(
            "sample {value} exceeds max color {max_color}"
        )));
    }
    Ok(grid::normalize(value, max_color))
}

fn count_tokens<R: BufRead>(tokens: &mut Tokenizer<R>) -> Result<usize, NetpbmError> {
    let mut n = 0;
    loop {
        match tokens.pop() {
            Ok(_) => n += 1,
            Err(NetpbmError::EndOfInput) => return Ok(n),
            Err(e) => return Err(e),
        }
    }
}

pub(super) fn encode<W: Write>(
    grid: &PixelGrid,
    header: &Header,
    out: W,
    stop: &dyn Stop,
) -> Result<(), NetpbmError> {
    let emit: fn(&mut BufWriter<W>, RGB8) -> std::io::Result<()> = match header.format {
        Format::P1 => |out, c| out.write_all(if grid::is_dark(c) { b"1 " } else { b"0 " }),
        Format::P2 => |out, c| write!(out, "{} ", grid::average(c)),
        Format::P3 => |out, c| write!(out, "{} {} {} ", c.r, c.g, c.b),
        format => {
            return Err(NetpbmError::FormatModeMismatch {
                format,
                mode: EncodeMode::Plain,
            });
        }
    };

    // Widest token is "255 " and P3 writes three per pixel.
    let mut out = BufWriter::with_capacity(BUFFER_PIXELS * 12, out);
    header.write_plain(&mut out)?;

    let w = grid.width();
    for i in 0..grid.len() {
        check_stop(i, w, stop)?;
        if i % PIXELS_PER_LINE == 0 {
            out.write_all(b"\n")?;
        }
        emit(&mut out, grid.pixel_at(i))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use enough::Unstoppable;

    use super::*;

    fn decode_str(src: &str) -> Result<(Header, PixelGrid), NetpbmError> {
        let mut tokens = Tokenizer::new(src.as_bytes());
        let header = Header::parse(&mut tokens)?;
        let (w, h) = (header.width as usize, header.height as usize);
        let grid = decode(&mut tokens, &header, w, h, &Unstoppable)?;
        Ok((header, grid))
    }

    fn encode_str(grid: &PixelGrid, format: Format) -> String {
        let header = Header::new(format, grid.width() as u32, grid.height() as u32);
        let mut out = Vec::new();
        encode(grid, &header, &mut out, &Unstoppable).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn p1_checker() {
        let (header, grid) = decode_str("P1\n2 2\n1 0\n0 1\n").unwrap();
        assert_eq!(header, Header::new(Format::P1, 2, 2));
        assert_eq!(grid.get(0, 0), Some(BLACK));
        assert_eq!(grid.get(1, 0), Some(WHITE));
        assert_eq!(grid.get(0, 1), Some(WHITE));
        assert_eq!(grid.get(1, 1), Some(BLACK));

        let text = encode_str(&grid, Format::P1);
        assert_eq!(text, "P1\n2\n2\n\n1 0 0 1 ");
    }

    #[test]
    fn p1_rejects_other_tokens() {
        match decode_str("P1\n2 1\n1 2\n") {
            Err(NetpbmError::FormatViolation(_)) => {}
            other => panic!("expected FormatViolation, got {other:?}"),
        }
    }

    #[test]
    fn p2_floors_normalization() {
        let (_, grid) = decode_str("P2\n3 1\n2\n0 1 2\n").unwrap();
        assert_eq!(grid.pixels(), &[grid::gray(0), grid::gray(127), grid::gray(255)]);
    }

    #[test]
    fn p3_with_comments_between_samples() {
        let (_, grid) = decode_str("P3 1 2 255\n10 20 # mid-pixel\n30\n# line\n40 50 60").unwrap();
        assert_eq!(grid.pixels(), &[RGB8::new(10, 20, 30), RGB8::new(40, 50, 60)]);
    }

    #[test]
    fn too_few_pixels() {
        let mut src = String::from("P2\n10 10\n255\n");
        for _ in 0..99 {
            src.push_str("7 ");
        }
        match decode_str(&src) {
            Err(NetpbmError::PixelCountMismatch { expected: 100, found: 99 }) => {}
            other => panic!("expected PixelCountMismatch, got {other:?}"),
        }
    }

    #[test]
    fn too_many_pixels() {
        match decode_str("P1\n2 1\n0 1 1 1 0\n") {
            Err(NetpbmError::PixelCountMismatch { expected: 2, found: 5 }) => {}
            other => panic!("expected PixelCountMismatch, got {other:?}"),
        }
    }

    #[test]
    fn partial_p3_pixel() {
        match decode_str("P3\n2 1\n255\n1 2 3 4 5") {
            Err(NetpbmError::PixelCountMismatch { expected: 2, found: 1 }) => {}
            other => panic!("expected PixelCountMismatch, got {other:?}"),
        }
    }

    #[test]
    fn sample_out_of_range() {
        for src in ["P2\n1 1\n15\n16\n", "P3\n1 1\n255\n1 x 3\n"] {
            match decode_str(src) {
                Err(NetpbmError::FormatViolation(_)) => {}
                other => panic!("expected FormatViolation for {src:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn line_breaks_every_five_pixels() {
        let grid = PixelGrid::from_pixels(6, 1, vec![grid::gray(9); 6]).unwrap();
        assert_eq!(encode_str(&grid, Format::P2), "P2\n6\n1\n255\n\n9 9 9 9 9 \n9 ");
    }

    #[test]
    fn p3_writes_channels_verbatim() {
        let grid = PixelGrid::from_pixels(1, 1, vec![RGB8::new(1, 22, 255)]).unwrap();
        assert_eq!(encode_str(&grid, Format::P3), "P3\n1\n1\n255\n\n1 22 255 ");
    }
}
