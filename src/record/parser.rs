//! Recursive tokenizer for a single record.
//!
//! The timestamp is parsed first; its sub-format is picked by the character
//! after the leading digit run. Every other field is optional and is
//! recognized by a small state machine: each step reads one delimiter run,
//! then matches the next token against the [`TokenKinds`] still expected
//! and recurses with the narrowed set. Whatever does not match any optional
//! field starts the message, which runs verbatim to the end of the record.
//!
//! # Look-ahead
//!
//! A component reference is only accepted when another token follows it.
//! The tokenizer peeks past the candidate and rewinds; a trailing numeral
//! such as the `3` in `... 12:00:00.000000 3` therefore stays in the message.

use super::error::{RecordParseError, TokenKinds};
use super::event_type::EventTypeTag;
use super::types::{LogRecord, TimestampFormat};

/// Literal component aliases accepted in the reference position.
const COMPONENT_ALIASES: [&str; 3] = ["mtc", "hc", "system"];

/// Substrings identifying a source-info token.
const SOURCE_EXTENSIONS: [&str; 2] = [".ttcn", ".cc"];

/// Whether `token` has the shape of a component reference.
///
/// Accepts a single digit, one of the aliases (case-insensitive), or a digit
/// run that starts with 1-9.
pub fn is_component_ref(token: &str) -> bool {
    let bytes = token.as_bytes();
    match bytes {
        [] => false,
        [single] => single.is_ascii_digit(),
        [first, rest @ ..] if (b'1'..=b'9').contains(first) => {
            rest.iter().all(u8::is_ascii_digit)
        }
        _ => COMPONENT_ALIASES
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(token)),
    }
}

/// Canonical spelling of a component reference: aliases in lower case.
pub fn normalize_component_ref(token: &str) -> String {
    match COMPONENT_ALIASES
        .iter()
        .find(|alias| alias.eq_ignore_ascii_case(token))
    {
        Some(alias) => (*alias).to_string(),
        None => token.to_string(),
    }
}

/// Whether `token` is a source-info field.
pub fn is_source_info(token: &str) -> bool {
    token == "-" || SOURCE_EXTENSIONS.iter().any(|ext| token.contains(ext))
}

fn is_delimiter(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// Byte cursor over one record with save/restore for look-ahead.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn mark(&self) -> usize {
        self.pos
    }

    fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a [u8] {
        let bytes = self.bytes;
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &bytes[start..self.pos]
    }

    /// Next content token: bytes up to the next delimiter or end.
    fn token(&mut self) -> &'a [u8] {
        self.take_while(|b| !is_delimiter(b))
    }

    fn rest_from(&mut self, start: usize) -> &'a [u8] {
        let bytes = self.bytes;
        self.pos = bytes.len();
        &bytes[start..]
    }
}

/// Optional fields collected while recursing.
#[derive(Default)]
struct Fields {
    component_ref: Option<String>,
    event_type: Option<EventTypeTag>,
    source_info: Option<String>,
    message: String,
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Parses one record's bytes into a [`LogRecord`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordParser;

impl RecordParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one record.
    ///
    /// `offset` and `record_number` locate the record in the file and are
    /// copied into the result. Trailing line terminators are ignored.
    ///
    /// # Errors
    ///
    /// - [`RecordParseError::MalformedTimestamp`] if the record does not start
    ///   with a valid timestamp
    /// - [`RecordParseError::UnexpectedEndOfRecord`] if the record ends inside
    ///   the timestamp
    /// - [`RecordParseError::UnrecognizedToken`] if the timestamp is not
    ///   followed by a delimiter
    pub fn parse(
        &self,
        bytes: &[u8],
        offset: u64,
        record_number: usize,
    ) -> Result<LogRecord, RecordParseError> {
        let mut end = bytes.len();
        while end > 0 && matches!(bytes[end - 1], b'\n' | b'\r') {
            end -= 1;
        }
        let bytes = &bytes[..end];

        let mut cursor = Cursor::new(bytes);
        let timestamp_format = self.timestamp(&mut cursor)?;
        let timestamp = text(&bytes[..cursor.mark()]);

        let mut fields = Fields::default();
        self.fields(&mut cursor, TokenKinds::AFTER_TIMESTAMP, &mut fields)?;

        Ok(LogRecord {
            record_number,
            offset,
            length: bytes.len(),
            timestamp,
            timestamp_format,
            component_ref: fields.component_ref,
            event_type: fields.event_type,
            source_info: fields.source_info,
            message: fields.message,
        })
    }

    fn timestamp(&self, cursor: &mut Cursor<'_>) -> Result<TimestampFormat, RecordParseError> {
        self.digits(cursor)?;

        let separator = cursor
            .peek()
            .ok_or(RecordParseError::UnexpectedEndOfRecord {
                offset: cursor.mark(),
                expected: TokenKinds::TIMESTAMP,
            })?;
        let format = TimestampFormat::from_separator(separator).ok_or(
            RecordParseError::MalformedTimestamp {
                offset: cursor.mark(),
                expected: TokenKinds::TIMESTAMP,
            },
        )?;

        match format {
            TimestampFormat::Time => self.clock(cursor)?,
            TimestampFormat::DateTime => {
                self.byte(cursor, b'/')?;
                self.letters(cursor)?;
                self.byte(cursor, b'/')?;
                self.digits(cursor)?;
                self.byte(cursor, b' ')?;
                self.digits(cursor)?;
                self.clock(cursor)?;
            }
            TimestampFormat::Seconds => {
                self.byte(cursor, b'.')?;
                self.digits(cursor)?;
            }
        }
        Ok(format)
    }

    /// `:mm:ss.ffffff`, the hour digits already consumed.
    fn clock(&self, cursor: &mut Cursor<'_>) -> Result<(), RecordParseError> {
        self.byte(cursor, b':')?;
        self.digits(cursor)?;
        self.byte(cursor, b':')?;
        self.digits(cursor)?;
        self.byte(cursor, b'.')?;
        self.digits(cursor)
    }

    fn byte(&self, cursor: &mut Cursor<'_>, expected: u8) -> Result<(), RecordParseError> {
        match cursor.peek() {
            Some(b) if b == expected => {
                cursor.bump();
                Ok(())
            }
            Some(_) => Err(RecordParseError::MalformedTimestamp {
                offset: cursor.mark(),
                expected: TokenKinds::TIMESTAMP,
            }),
            None => Err(RecordParseError::UnexpectedEndOfRecord {
                offset: cursor.mark(),
                expected: TokenKinds::TIMESTAMP,
            }),
        }
    }

    fn digits(&self, cursor: &mut Cursor<'_>) -> Result<(), RecordParseError> {
        self.run(cursor, |b| b.is_ascii_digit())
    }

    fn letters(&self, cursor: &mut Cursor<'_>) -> Result<(), RecordParseError> {
        self.run(cursor, |b| b.is_ascii_alphabetic())
    }

    fn run(
        &self,
        cursor: &mut Cursor<'_>,
        pred: impl Fn(u8) -> bool,
    ) -> Result<(), RecordParseError> {
        if !cursor.take_while(pred).is_empty() {
            return Ok(());
        }
        if cursor.peek().is_none() {
            Err(RecordParseError::UnexpectedEndOfRecord {
                offset: cursor.mark(),
                expected: TokenKinds::TIMESTAMP,
            })
        } else {
            Err(RecordParseError::MalformedTimestamp {
                offset: cursor.mark(),
                expected: TokenKinds::TIMESTAMP,
            })
        }
    }

    /// One delimiter run, then one field matched against `expected`.
    fn fields(
        &self,
        cursor: &mut Cursor<'_>,
        expected: TokenKinds,
        fields: &mut Fields,
    ) -> Result<(), RecordParseError> {
        match cursor.peek() {
            None => return Ok(()),
            Some(b) if is_delimiter(b) => {
                cursor.take_while(is_delimiter);
            }
            Some(_) => {
                return Err(RecordParseError::UnrecognizedToken {
                    offset: cursor.mark(),
                    expected: TokenKinds::DELIMITER,
                })
            }
        }

        let start = cursor.mark();
        let token = text(cursor.token());

        if !token.is_empty() && expected != TokenKinds::MESSAGE {
            if expected.contains(TokenKinds::REF)
                && is_component_ref(&token)
                && self.token_follows(cursor)
            {
                fields.component_ref = Some(normalize_component_ref(&token));
                return self.fields(cursor, TokenKinds::after(TokenKinds::REF), fields);
            }

            if expected.contains(TokenKinds::EVENT_TYPE) {
                if let Some(tag) = EventTypeTag::lookup(&token) {
                    fields.event_type = Some(tag);
                    return self.fields(cursor, TokenKinds::after(TokenKinds::EVENT_TYPE), fields);
                }
            }

            if expected.contains(TokenKinds::SOURCE_INFO) && is_source_info(&token) {
                fields.source_info = Some(token);
                return self.fields(cursor, TokenKinds::after(TokenKinds::SOURCE_INFO), fields);
            }
        }

        fields.message = text(cursor.rest_from(start));
        Ok(())
    }

    /// Peek for a delimiter run followed by content, then rewind.
    fn token_follows(&self, cursor: &mut Cursor<'_>) -> bool {
        let mark = cursor.mark();
        let follows = !cursor.take_while(is_delimiter).is_empty() && cursor.peek().is_some();
        cursor.reset(mark);
        follows
    }
}
