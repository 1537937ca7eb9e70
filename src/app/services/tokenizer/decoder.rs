//! Streaming UTF-8 character decoder
//!
//! Reads one character at a time from a buffered byte source. Malformed
//! sequences are reported as [`Decoded::Invalid`] carrying the number of
//! bytes they consumed, so the tokenizer can substitute a placeholder and
//! still count value bytes correctly.

use crate::{Error, Result};
use std::io::{BufRead, BufReader, ErrorKind, Read};

/// One decoding step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A well-formed character and its encoded width in bytes
    Char(char, usize),
    /// A malformed sequence of the given byte length
    Invalid(usize),
}

impl Decoded {
    /// Bytes consumed from the input
    pub fn width(&self) -> usize {
        match self {
            Decoded::Char(_, width) | Decoded::Invalid(width) => *width,
        }
    }
}

pub struct CharDecoder<R> {
    reader: BufReader<R>,
}

impl<R: Read> CharDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Next byte without consuming it
    pub fn peek_byte(&mut self) -> Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::io("Failed to read input", e)),
            }
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }

    /// Decode the next character, or `None` at end of input
    pub fn next_char(&mut self) -> Result<Option<Decoded>> {
        let Some(first) = self.next_byte()? else {
            return Ok(None);
        };

        let expected = match first {
            0x00..=0x7F => return Ok(Some(Decoded::Char(first as char, 1))),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Ok(Some(Decoded::Invalid(1))),
        };

        let mut bytes = [first, 0, 0, 0];
        let mut len = 1;
        while len < expected {
            match self.peek_byte()? {
                Some(next) if next & 0xC0 == 0x80 => {
                    self.reader.consume(1);
                    bytes[len] = next;
                    len += 1;
                }
                // Truncated sequence; the next byte starts a new character
                _ => return Ok(Some(Decoded::Invalid(len))),
            }
        }

        // Rejects overlong forms and surrogates the lead byte alone cannot rule out
        match std::str::from_utf8(&bytes[..len]) {
            Ok(text) => Ok(text
                .chars()
                .next()
                .map(|ch| Decoded::Char(ch, len))
                .or(Some(Decoded::Invalid(len)))),
            Err(_) => Ok(Some(Decoded::Invalid(len))),
        }
    }
}
