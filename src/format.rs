use core::fmt;

/// Netpbm format tag.
///
/// `P1`–`P3` store every sample as ASCII decimal text; `P4`–`P6` store raw
/// bytes (packed bits for bitmaps).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Plain bitmap (PBM).
    P1,
    /// Plain graymap (PGM).
    P2,
    /// Plain pixmap (PPM).
    P3,
    /// Binary bitmap (PBM).
    P4,
    /// Binary graymap (PGM).
    P5,
    /// Binary pixmap (PPM).
    P6,
}

/// Serialization mode selected by the caller on encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncodeMode {
    /// Raw bytes / packed bits (`P4`, `P5`, `P6`).
    Binary,
    /// ASCII decimal tokens (`P1`, `P2`, `P3`).
    Plain,
}

/// Static properties of a format tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatInfo {
    pub tag: &'static str,
    pub mode: EncodeMode,
    /// Samples per pixel: 1 for bitmaps and graymaps, 3 for pixmaps.
    pub channels: usize,
    /// Whether the header carries a max-color field.
    pub has_max_color: bool,
    /// Conventional file extension.
    pub extension: &'static str,
}

const FORMAT_TABLE: [FormatInfo; 6] = [
    FormatInfo {
        tag: "P1",
        mode: EncodeMode::Plain,
        channels: 1,
        has_max_color: false,
        extension: "pbm",
    },
    FormatInfo {
        tag: "P2",
        mode: EncodeMode::Plain,
        channels: 1,
        has_max_color: true,
        extension: "pgm",
    },
    FormatInfo {
        tag: "P3",
        mode: EncodeMode::Plain,
        channels: 3,
        has_max_color: true,
        extension: "ppm",
    },
    FormatInfo {
        tag: "P4",
        mode: EncodeMode::Binary,
        channels: 1,
        has_max_color: false,
        extension: "pbm",
    },
    FormatInfo {
        tag: "P5",
        mode: EncodeMode::Binary,
        channels: 1,
        has_max_color: true,
        extension: "pgm",
    },
    FormatInfo {
        tag: "P6",
        mode: EncodeMode::Binary,
        channels: 3,
        has_max_color: true,
        extension: "ppm",
    },
];

/// Largest max-color value accepted in a header.
pub const MAX_COLOR_CEILING: u32 = 65535;

impl Format {
    pub const ALL: [Format; 6] = [
        Format::P1,
        Format::P2,
        Format::P3,
        Format::P4,
        Format::P5,
        Format::P6,
    ];

    /// Parse a format tag such as `b"P3"`.
    pub fn from_tag(tag: &[u8]) -> Option<Format> {
        Format::ALL
            .into_iter()
            .find(|f| f.info().tag.as_bytes() == tag)
    }

    /// Metadata row for this format.
    pub fn info(self) -> &'static FormatInfo {
        let idx = match self {
            Format::P1 => 0,
            Format::P2 => 1,
            Format::P3 => 2,
            Format::P4 => 3,
            Format::P5 => 4,
            Format::P6 => 5,
        };
        &FORMAT_TABLE[idx]
    }

    pub fn tag(self) -> &'static str {
        self.info().tag
    }

    pub fn mode(self) -> EncodeMode {
        self.info().mode
    }

    pub fn is_plain(self) -> bool {
        self.mode() == EncodeMode::Plain
    }

    pub fn is_binary(self) -> bool {
        self.mode() == EncodeMode::Binary
    }

    /// `P1` or `P4`: one black/white bit per pixel, no max-color field.
    pub fn is_bitmap(self) -> bool {
        !self.info().has_max_color
    }

    pub fn has_max_color(self) -> bool {
        self.info().has_max_color
    }

    pub fn channels(self) -> usize {
        self.info().channels
    }

    pub fn extension(self) -> &'static str {
        self.info().extension
    }

    /// Bytes one pixel occupies in a binary payload.
    ///
    /// `P4` packs eight pixels per byte; it reports 1 here since its payload is
    /// processed a byte at a time.
    pub fn bytes_per_pixel(self, max_color: u32) -> usize {
        let sample = if max_color > 255 { 2 } else { 1 };
        match self {
            Format::P5 => sample,
            Format::P6 => 3 * sample,
            _ => 1,
        }
    }

    /// Max-color value implied by this format when none is given.
    pub fn default_max_color(self) -> u32 {
        if self.is_bitmap() { 1 } else { 255 }
    }

    /// The same image kind in the other encoding (`P1` ↔ `P4`, ...).
    pub fn with_mode(self, mode: EncodeMode) -> Format {
        match (self, mode) {
            (Format::P1 | Format::P4, EncodeMode::Plain) => Format::P1,
            (Format::P2 | Format::P5, EncodeMode::Plain) => Format::P2,
            (Format::P3 | Format::P6, EncodeMode::Plain) => Format::P3,
            (Format::P1 | Format::P4, EncodeMode::Binary) => Format::P4,
            (Format::P2 | Format::P5, EncodeMode::Binary) => Format::P5,
            (Format::P3 | Format::P6, EncodeMode::Binary) => Format::P6,
        }
    }

    /// Map a file extension to a format: `pbm` → P1/P4, `pgm` → P2/P5,
    /// `ppm` → P3/P6. Case-insensitive.
    pub fn for_extension(ext: &str, mode: EncodeMode) -> Option<Format> {
        let plain = match ext.to_ascii_lowercase().as_str() {
            "pbm" => Format::P1,
            "pgm" => Format::P2,
            "ppm" => Format::P3,
            _ => return None,
        };
        Some(plain.with_mode(mode))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
