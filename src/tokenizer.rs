//! Whitespace/comment-delimited token scanner over a buffered reader.
//!
//! Shared by header parsing (all formats) and plain-text pixel decoding.
//! Bytes are scanned straight out of the reader's buffer; nothing past the
//! end of the current token is consumed, so a binary payload that follows
//! the header stays in the reader untouched.

use std::io::BufRead;

use crate::error::NetpbmError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    Idle,
    InWord,
    InComment,
}

/// Why the last token ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Terminator {
    /// A single whitespace byte, already consumed.
    Separator,
    /// A `#`, left in the reader.
    Comment,
    EndOfInput,
}

#[inline]
fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

pub struct Tokenizer<R> {
    reader: R,
    word: Vec<u8>,
    terminator: Terminator,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            word: Vec::with_capacity(16),
            terminator: Terminator::Separator,
        }
    }

    /// Next token, skipping separator runs and `#` comments.
    ///
    /// Fails with [`NetpbmError::EndOfInput`] when only whitespace and
    /// comments remain.
    pub fn pop(&mut self) -> Result<&[u8], NetpbmError> {
        self.word.clear();
        let mut state = ScanState::Idle;
        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                break;
            }
            let mut used = 0;
            let mut finished = None;
            for &b in buf {
                match state {
                    ScanState::InComment => {
                        if b == b'\n' {
                            state = ScanState::Idle;
                        }
                    }
                    ScanState::Idle => {
                        if b == b'#' {
                            state = ScanState::InComment;
                        } else if !is_separator(b) {
                            state = ScanState::InWord;
                            self.word.push(b);
                        }
                    }
                    ScanState::InWord => {
                        if b == b'#' {
                            finished = Some(Terminator::Comment);
                            break;
                        }
                        if is_separator(b) {
                            used += 1;
                            finished = Some(Terminator::Separator);
                            break;
                        }
                        self.word.push(b);
                    }
                }
                used += 1;
            }
            self.reader.consume(used);
            if let Some(terminator) = finished {
                self.terminator = terminator;
                return Ok(&self.word);
            }
        }
        if state == ScanState::InWord {
            self.terminator = Terminator::EndOfInput;
            return Ok(&self.word);
        }
        Err(NetpbmError::EndOfInput)
    }

    /// Whether any token-bearing content remains.
    ///
    /// Consumes leading whitespace and comments but never the first byte of
    /// the next token.
    pub fn is_empty(&mut self) -> Result<bool, NetpbmError> {
        let mut in_comment = false;
        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                return Ok(true);
            }
            let mut used = 0;
            let mut found = false;
            for &b in buf {
                if in_comment {
                    in_comment = b != b'\n';
                } else if b == b'#' {
                    in_comment = true;
                } else if !is_separator(b) {
                    found = true;
                    break;
                }
                used += 1;
            }
            self.reader.consume(used);
            if found {
                return Ok(false);
            }
        }
    }

    /// Leave the reader at the first byte after a binary header.
    ///
    /// A whitespace terminator was already consumed by [`pop`](Self::pop); a
    /// comment glued to the last field is skipped through its newline.
    pub fn finish_binary_header(&mut self) -> Result<(), NetpbmError> {
        if self.terminator != Terminator::Comment {
            return Ok(());
        }
        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                return Ok(());
            }
            match buf.iter().position(|&b| b == b'\n') {
                Some(pos) => {
                    self.reader.consume(pos + 1);
                    self.terminator = Terminator::Separator;
                    return Ok(());
                }
                None => {
                    let len = buf.len();
                    self.reader.consume(len);
                }
            }
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Parse an unsigned decimal token. No sign, no surrounding whitespace.
pub(crate) fn parse_decimal(token: &[u8]) -> Option<u32> {
    if token.is_empty() {
        return None;
    }
    token.iter().try_fold(0u32, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))
    })
}

/// Render a token for error messages.
pub(crate) fn show(token: &[u8]) -> String {
    String::from_utf8_lossy(token).into_owned()
}
