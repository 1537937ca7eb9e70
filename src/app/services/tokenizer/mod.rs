//! Tag tokenizer for ADI byte streams
//!
//! A finite-state scanner that turns a raw byte stream into a sequence of
//! [`TagField`] values, one `<TAG:LEN:TYPE>VALUE` unit at a time, while
//! tracking the current line number and flagging encoding anomalies.
//!
//! # Architecture
//!
//! - `decoder`: streaming UTF-8 decoding with malformed-sequence detection
//! - [`Tokenizer`]: the state machine over decoded characters
//!
//! Values are length-prefixed, so any character (including `<`, `>` and `:`)
//! may appear inside one. Lengths count input bytes. Problems found while
//! scanning are returned as diagnostics through the caller's buffer; the only
//! error that ends a scan is a long run of non-numeric length fields, which
//! marks the input as corrupt or binary.
//!
//! # Usage
//!
//! ```
//! use adif_validator::app::services::reference_data::StaticReferenceData;
//! use adif_validator::app::services::tokenizer::Tokenizer;
//!
//! let reference = StaticReferenceData::builtin().unwrap();
//! let mut tokenizer = Tokenizer::new("<CALL:5>W1ABC<EOR>".as_bytes(), &reference);
//! let mut diagnostics = Vec::new();
//!
//! let call = tokenizer.next_field(&mut diagnostics).unwrap().unwrap();
//! assert_eq!(call.name, "CALL");
//! assert_eq!(call.value, "W1ABC");
//! ```

use crate::app::models::{Diagnostic, TagField};
use crate::app::services::reference_data::ReferenceData;
use crate::constants::{DEFAULT_MAX_BAD_LENGTHS, FIRST_LINE};
use crate::{Error, Result};
use std::io::Read;
use tracing::{debug, warn};

pub mod decoder;

#[cfg(test)]
pub mod tests;

pub use decoder::{CharDecoder, Decoded};

/// Scanner state; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Begin,
    ReadName,
    ReadLength,
    ReadType,
    ReadValue,
    ReadValueNewlineContinuation,
    Dispatch,
    Done,
}

/// Field under construction
#[derive(Debug, Default)]
struct PartialField {
    name: String,
    length_text: String,
    declared_length: Option<usize>,
    type_text: String,
    value: String,
    remaining: usize,
}

impl PartialField {
    fn into_field(self, line: usize) -> TagField {
        TagField {
            name: self.name,
            declared_length: self.declared_length,
            declared_type: (!self.type_text.is_empty()).then_some(self.type_text),
            value: self.value,
            line,
        }
    }
}

pub struct Tokenizer<'a, R> {
    decoder: CharDecoder<R>,
    reference: &'a dyn ReferenceData,
    state: ParseState,
    line: usize,
    /// Line on which a non-ASCII diagnostic was last raised
    non_ascii_line: Option<usize>,
    bad_lengths: usize,
    max_bad_lengths: usize,
}

impl<'a, R: Read> Tokenizer<'a, R> {
    pub fn new(reader: R, reference: &'a dyn ReferenceData) -> Self {
        Self {
            decoder: CharDecoder::new(reader),
            reference,
            state: ParseState::Begin,
            line: FIRST_LINE,
            non_ascii_line: None,
            bad_lengths: 0,
            max_bad_lengths: DEFAULT_MAX_BAD_LENGTHS,
        }
    }

    /// Set how many consecutive non-numeric lengths are tolerated
    pub fn with_max_bad_lengths(mut self, max_bad_lengths: usize) -> Self {
        self.max_bad_lengths = max_bad_lengths;
        self
    }

    /// First unread byte, without consuming it
    pub fn peek_byte(&mut self) -> Result<Option<u8>> {
        self.decoder.peek_byte()
    }

    /// Current line number
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Scan the next field
    ///
    /// Returns `Ok(None)` once the input is exhausted. Diagnostics raised
    /// while scanning are appended to `diagnostics`.
    ///
    /// # Errors
    /// * Returns `Error::CorruptInput` when more than the configured number
    ///   of consecutive fields have non-numeric lengths
    /// * Returns `Error::Io` if the underlying reader fails
    pub fn next_field(&mut self, diagnostics: &mut Vec<Diagnostic>) -> Result<Option<TagField>> {
        if self.state == ParseState::Done {
            return Ok(None);
        }

        let mut field = PartialField::default();
        self.state = ParseState::Begin;

        loop {
            if self.state == ParseState::ReadValue && field.remaining == 0 {
                self.state = ParseState::Dispatch;
            }

            if self.state == ParseState::Dispatch {
                self.state = ParseState::Begin;
                if field.name.is_empty() {
                    diagnostics.push(Diagnostic::compliance("Field marker has no tag name", self.line));
                    field = PartialField::default();
                    continue;
                }
                return Ok(Some(field.into_field(self.line)));
            }

            let Some(decoded) = self.decoder.next_char()? else {
                if self.state != ParseState::Begin {
                    debug!(
                        "Input ended in state {:?} while reading tag '{}'",
                        self.state, field.name
                    );
                }
                self.state = ParseState::Done;
                return Ok(None);
            };
            let width = decoded.width();
            let ch = self.check_encoding(decoded, &field.name, diagnostics);

            let in_value = matches!(
                self.state,
                ParseState::ReadValue | ParseState::ReadValueNewlineContinuation
            );
            if !in_value {
                match ch {
                    '\n' => {
                        self.next_line();
                        continue;
                    }
                    '\r' => continue,
                    _ => {}
                }
            }

            match self.state {
                ParseState::Begin => {
                    if ch == '<' {
                        self.state = ParseState::ReadName;
                    }
                }
                ParseState::ReadName => match ch {
                    ':' => self.state = ParseState::ReadLength,
                    '>' => self.state = ParseState::Dispatch,
                    _ => field.name.extend(ch.to_uppercase()),
                },
                ParseState::ReadLength => match ch {
                    ':' => {
                        self.finish_length(&mut field, diagnostics)?;
                        self.state = ParseState::ReadType;
                    }
                    '>' => {
                        self.finish_length(&mut field, diagnostics)?;
                        self.state = ParseState::ReadValue;
                    }
                    _ => field.length_text.push(ch),
                },
                ParseState::ReadType => match ch {
                    '>' => {
                        self.check_type(&field, diagnostics);
                        self.state = ParseState::ReadValue;
                    }
                    _ => field.type_text.extend(ch.to_uppercase()),
                },
                ParseState::ReadValue => {
                    field.value.push(ch);
                    field.remaining = field.remaining.saturating_sub(width);
                    if ch == '\n' {
                        self.next_line();
                        diagnostics.push(Diagnostic::compliance(
                            format!(
                                "Newline in data string for {} did not have preceding Return",
                                field.name
                            ),
                            self.line,
                        ));
                    }
                    // A trailing return completes the value; the newline after it is outside
                    if ch == '\r' && field.remaining > 0 {
                        self.state = ParseState::ReadValueNewlineContinuation;
                    }
                }
                ParseState::ReadValueNewlineContinuation => {
                    field.value.push(ch);
                    field.remaining = field.remaining.saturating_sub(width);
                    if ch != '\n' {
                        diagnostics.push(Diagnostic::compliance(
                            format!(
                                "Return in data string for {} did not have following Newline",
                                field.name
                            ),
                            self.line,
                        ));
                    }
                    self.next_line();
                    self.state = if field.remaining == 0 {
                        ParseState::Dispatch
                    } else {
                        ParseState::ReadValue
                    };
                }
                ParseState::Dispatch | ParseState::Done => {}
            }
        }
    }

    fn next_line(&mut self) {
        self.line += 1;
        self.non_ascii_line = None;
    }

    /// Map a decoding step to a character, raising the per-line non-ASCII diagnostic
    fn check_encoding(
        &mut self,
        decoded: Decoded,
        tag: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> char {
        let (ch, message) = match decoded {
            Decoded::Char(ch, _) if (ch as u32) <= 128 => return ch,
            Decoded::Char(ch, _) => (
                ch,
                if tag.is_empty() {
                    format!("Non-ASCII character '{}' in input file", ch)
                } else {
                    format!("Non-ASCII character {} in input file, tag {}", ch, tag)
                },
            ),
            Decoded::Invalid(_) => (
                ' ',
                if tag.is_empty() {
                    "Non-ASCII character in input file".to_string()
                } else {
                    format!("Non-ASCII character in input file, tag {}", tag)
                },
            ),
        };

        if self.state != ParseState::Begin && self.non_ascii_line != Some(self.line) {
            diagnostics.push(Diagnostic::compliance(message, self.line));
            self.non_ascii_line = Some(self.line);
        }
        ch
    }

    fn finish_length(
        &mut self,
        field: &mut PartialField,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        let text = field.length_text.trim();
        if text.is_empty() {
            field.declared_length = None;
            field.remaining = 0;
            return Ok(());
        }

        let all_digits = text.bytes().all(|b| b.is_ascii_digit());
        let parsed = all_digits.then(|| text.parse::<usize>().ok()).flatten();

        match parsed {
            Some(length) => {
                field.declared_length = Some(length);
                field.remaining = length;
                self.bad_lengths = 0;
            }
            // Numeric but unrepresentable; not evidence of binary input
            None if all_digits => {
                diagnostics.push(Diagnostic::compliance(
                    format!("Length field '{}' is too large", field.length_text),
                    self.line,
                ));
                field.declared_length = Some(0);
                field.remaining = 0;
            }
            None => {
                diagnostics.push(Diagnostic::compliance(
                    format!("Length field '{}' is not numeric", field.length_text),
                    self.line,
                ));
                field.declared_length = Some(0);
                field.remaining = 0;
                self.bad_lengths += 1;
                if self.bad_lengths > self.max_bad_lengths {
                    warn!(
                        "Giving up at line {} after {} consecutive non-numeric lengths",
                        self.line, self.bad_lengths
                    );
                    self.state = ParseState::Done;
                    return Err(Error::corrupt_input(self.line, self.bad_lengths));
                }
            }
        }
        Ok(())
    }

    fn check_type(&self, field: &PartialField, diagnostics: &mut Vec<Diagnostic>) {
        if !field.type_text.is_empty() && !self.reference.is_valid_type_code(&field.type_text) {
            diagnostics.push(Diagnostic::compliance(
                format!("Data Type '{}' is not valid", field.type_text),
                self.line,
            ));
        }
    }
}
