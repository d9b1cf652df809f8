use std::io::{BufRead, Write};

use crate::error::NetpbmError;
use crate::format::{Format, MAX_COLOR_CEILING};
use crate::tokenizer::{Tokenizer, parse_decimal, show};

/// Image descriptor: format tag, dimensions and max color value.
///
/// For `P1`/`P4` the max color is implicit (pixels are black or white) and
/// is neither read nor written; decoded bitmap headers carry `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    pub format: Format,
    pub max_color: u32,
    pub width: u32,
    pub height: u32,
}

impl Header {
    /// Header with the format's default max color (1 for bitmaps, 255 otherwise).
    pub fn new(format: Format, width: u32, height: u32) -> Self {
        Self {
            format,
            max_color: format.default_max_color(),
            width,
            height,
        }
    }

    /// Declared pixel count.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Check the header invariants: positive dimensions and, where the
    /// format carries one, a max color in `1..=65535`.
    pub fn validate(&self) -> Result<(), NetpbmError> {
        if self.width == 0 || self.height == 0 {
            return Err(NetpbmError::MalformedHeader(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.format.has_max_color() && !(1..=MAX_COLOR_CEILING).contains(&self.max_color) {
            return Err(NetpbmError::MalformedHeader(format!(
                "max color {} outside 1..={MAX_COLOR_CEILING}",
                self.max_color
            )));
        }
        Ok(())
    }

    /// Parse the header fields in order: tag, width, height, [max color].
    ///
    /// The tokenizer is left positioned after the last field's terminator.
    pub fn parse<R: BufRead>(tokens: &mut Tokenizer<R>) -> Result<Header, NetpbmError> {
        let tag = tokens.pop()?;
        let format = Format::from_tag(tag).ok_or_else(|| NetpbmError::UnsupportedFormat(show(tag)))?;
        let width = parse_field(tokens, "width")?;
        let height = parse_field(tokens, "height")?;
        let max_color = if format.has_max_color() {
            parse_field(tokens, "max color")?
        } else {
            format.default_max_color()
        };
        let header = Header {
            format,
            max_color,
            width,
            height,
        };
        header.validate()?;
        log::debug!(
            "parsed {} header: {}x{}, max color {}",
            header.format,
            header.width,
            header.height,
            header.max_color
        );
        Ok(header)
    }

    /// `"{tag}\n{width} {height}\n"` plus `"255\n"` when the format has a
    /// max-color field. Encoded samples are always 8-bit.
    pub fn to_binary_bytes(&self) -> Vec<u8> {
        let mut out = format!("{}\n{} {}\n", self.format, self.width, self.height);
        if self.format.has_max_color() {
            out.push_str("255\n");
        }
        out.into_bytes()
    }

    /// One header field per line; the max color is always written as 255.
    pub fn write_plain<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self.format)?;
        writeln!(out, "{}", self.width)?;
        writeln!(out, "{}", self.height)?;
        if self.format.has_max_color() {
            writeln!(out, "255")?;
        }
        Ok(())
    }
}

fn parse_field<R: BufRead>(tokens: &mut Tokenizer<R>, name: &str) -> Result<u32, NetpbmError> {
    let token = tokens.pop()?;
    parse_decimal(token)
        .ok_or_else(|| NetpbmError::MalformedHeader(format!("{name} is not an integer: {:?}", show(token))))
}
