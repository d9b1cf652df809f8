use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use enough::Stop;

use crate::error::NetpbmError;
use crate::grid::PixelGrid;
use crate::header::Header;
use crate::limits::Limits;
use crate::pnm;
use crate::tokenizer::Tokenizer;

const EXTENSIONS: [&str; 3] = ["pbm", "pgm", "ppm"];

/// Decode configuration.
///
/// ```
/// use netpbm_codec::{DecodeRequest, Limits, Unstoppable};
///
/// let limits = Limits { max_pixels: Some(1 << 20), ..Default::default() };
/// let (header, grid) = DecodeRequest::new()
///     .with_limits(&limits)
///     .decode(b"P1\n2 1\n1 0\n", Unstoppable)?;
/// assert_eq!((header.width, header.height), (2, 1));
/// assert_eq!(grid.len(), 2);
/// # Ok::<(), netpbm_codec::NetpbmError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DecodeRequest<'a> {
    limits: Option<&'a Limits>,
    skip_extension_check: bool,
}

impl<'a> DecodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Accept files whose extension is not `pbm`, `pgm` or `ppm`.
    ///
    /// Only [`decode_file`](Self::decode_file) looks at extensions.
    pub fn skip_extension_check(mut self, skip: bool) -> Self {
        self.skip_extension_check = skip;
        self
    }

    /// Decode an in-memory image.
    pub fn decode(&self, data: &[u8], stop: impl Stop) -> Result<(Header, PixelGrid), NetpbmError> {
        self.decode_reader(data, stop)
    }

    /// Decode from a buffered stream. The payload is pulled through a
    /// bounded buffer; only the pixel grid is fully materialized.
    pub fn decode_reader<R: BufRead>(
        &self,
        reader: R,
        stop: impl Stop,
    ) -> Result<(Header, PixelGrid), NetpbmError> {
        let mut tokens = Tokenizer::new(reader);
        let header = Header::parse(&mut tokens)?;

        if let Some(limits) = self.limits {
            limits.check(&header)?;
        }

        stop.check()?;
        let grid = pnm::decode_payload(tokens, &header, &stop)?;
        Ok((header, grid))
    }

    /// Decode a file on disk.
    ///
    /// Fails with [`NetpbmError::FileNotFound`] if `path` does not exist and,
    /// unless the check is skipped, with [`NetpbmError::UnexpectedExtension`]
    /// if its extension is not `pbm`, `pgm` or `ppm`. The extension never
    /// influences how the content is decoded.
    pub fn decode_file(
        &self,
        path: impl AsRef<Path>,
        stop: impl Stop,
    ) -> Result<(Header, PixelGrid), NetpbmError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => NetpbmError::FileNotFound(path.to_path_buf()),
            _ => NetpbmError::Io(e),
        })?;
        if !self.skip_extension_check && !has_netpbm_extension(path) {
            return Err(NetpbmError::UnexpectedExtension(path.to_path_buf()));
        }
        log::debug!("decoding {}", path.display());
        self.decode_reader(BufReader::new(file), stop)
    }
}

fn has_netpbm_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check() {
        assert!(has_netpbm_extension(Path::new("a/b.pbm")));
        assert!(has_netpbm_extension(Path::new("b.PPM")));
        assert!(!has_netpbm_extension(Path::new("b.png")));
        assert!(!has_netpbm_extension(Path::new("pgm")));
    }
}
