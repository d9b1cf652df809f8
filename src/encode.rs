use std::fs::File;
use std::io::Write;
use std::path::Path;

use enough::Stop;

use crate::error::NetpbmError;
use crate::format::EncodeMode;
use crate::grid::PixelGrid;
use crate::header::Header;
use crate::pnm;

/// Encode configuration: binary (`P4`–`P6`) or plain (`P1`–`P3`) output.
///
/// The header's format must belong to the selected mode. Whatever
/// `max_color` the header holds, samples are written on the 8-bit scale
/// and the header says `255`.
///
/// ```
/// use netpbm_codec::{EncodeRequest, Format, Header, PixelGrid, Unstoppable};
///
/// let grid = PixelGrid::new(8, 1);
/// let bytes = EncodeRequest::binary().encode(&grid, &Header::new(Format::P4, 8, 1), Unstoppable)?;
/// assert_eq!(bytes, b"P4\n8 1\n\x00");
/// # Ok::<(), netpbm_codec::NetpbmError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest {
    mode: EncodeMode,
}

impl EncodeRequest {
    pub fn new(mode: EncodeMode) -> Self {
        Self { mode }
    }

    pub fn binary() -> Self {
        Self::new(EncodeMode::Binary)
    }

    pub fn plain() -> Self {
        Self::new(EncodeMode::Plain)
    }

    pub fn mode(&self) -> EncodeMode {
        self.mode
    }

    /// Serialize into a new byte vector.
    pub fn encode(
        &self,
        grid: &PixelGrid,
        header: &Header,
        stop: impl Stop,
    ) -> Result<Vec<u8>, NetpbmError> {
        let mut out = Vec::with_capacity(grid.len() * header.format.channels() + 32);
        self.encode_to(grid, header, &mut out, stop)?;
        Ok(out)
    }

    /// Stream the serialized image into `out`.
    pub fn encode_to<W: Write>(
        &self,
        grid: &PixelGrid,
        header: &Header,
        out: W,
        stop: impl Stop,
    ) -> Result<(), NetpbmError> {
        self.check(grid, header)?;
        self.write_checked(grid, header, out, &stop)
    }

    /// Serialize a request that already passed [`check`](Self::check).
    fn write_checked<W: Write>(
        &self,
        grid: &PixelGrid,
        header: &Header,
        out: W,
        stop: &dyn Stop,
    ) -> Result<(), NetpbmError> {
        stop.check()?;
        log::debug!(
            "encoding {}x{} grid as {} ({:?})",
            header.width,
            header.height,
            header.format,
            self.mode
        );
        pnm::encode_payload(grid, header, self.mode, out, stop)
    }

    /// Write the serialized image to `path`, creating or truncating it.
    ///
    /// The request is validated before `path` is touched, so a rejected
    /// request leaves any existing file alone. If writing fails part way the
    /// file is removed.
    pub fn encode_file(
        &self,
        grid: &PixelGrid,
        header: &Header,
        path: impl AsRef<Path>,
        stop: impl Stop,
    ) -> Result<(), NetpbmError> {
        let path = path.as_ref();
        self.check(grid, header)?;
        let file = File::create(path)?;
        let result = self.write_checked(grid, header, file, &stop);
        if result.is_err() {
            let _ = std::fs::remove_file(path);
        }
        result
    }

    fn check(&self, grid: &PixelGrid, header: &Header) -> Result<(), NetpbmError> {
        if header.format.mode() != self.mode {
            return Err(NetpbmError::FormatModeMismatch {
                format: header.format,
                mode: self.mode,
            });
        }
        header.validate()?;
        if header.width as usize != grid.width() || header.height as usize != grid.height() {
            return Err(NetpbmError::DimensionMismatch {
                header_width: header.width,
                header_height: header.height,
                grid_width: grid.width(),
                grid_height: grid.height(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use enough::Unstoppable;

    use super::*;
    use crate::format::Format;

    #[test]
    fn mode_must_match_format() {
        let grid = PixelGrid::new(1, 1);
        for (format, request) in [
            (Format::P1, EncodeRequest::binary()),
            (Format::P6, EncodeRequest::plain()),
        ] {
            match request.encode(&grid, &Header::new(format, 1, 1), Unstoppable) {
                Err(NetpbmError::FormatModeMismatch { format: f, mode }) => {
                    assert_eq!(f, format);
                    assert_eq!(mode, request.mode());
                }
                other => panic!("expected FormatModeMismatch, got {other:?}"),
            }
        }
    }

    #[test]
    fn header_must_describe_grid() {
        let grid = PixelGrid::new(2, 3);
        match EncodeRequest::binary().encode(&grid, &Header::new(Format::P5, 3, 2), Unstoppable) {
            Err(NetpbmError::DimensionMismatch { .. }) => {}
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn max_color_is_always_written_as_255() {
        let grid = PixelGrid::new(1, 1);
        let header = Header {
            max_color: 15,
            ..Header::new(Format::P5, 1, 1)
        };
        let bytes = EncodeRequest::binary().encode(&grid, &header, Unstoppable).unwrap();
        assert_eq!(bytes, b"P5\n1 1\n255\n\xff");
    }

    #[test]
    fn rejected_request_keeps_existing_file() {
        let path = std::env::temp_dir().join(format!("netpbm-codec-keep-{}.pgm", std::process::id()));
        std::fs::write(&path, b"untouched").unwrap();
        let grid = PixelGrid::new(2, 2);
        let result = EncodeRequest::binary().encode_file(&grid, &Header::new(Format::P2, 2, 2), &path, Unstoppable);
        let contents = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(NetpbmError::FormatModeMismatch { .. })));
        assert_eq!(contents, b"untouched");
    }
}
