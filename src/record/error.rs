//! Record parse failures.

use std::fmt;

/// Set of token kinds the tokenizer is willing to accept next.
///
/// Carried from one token to the next: every accepted token narrows the set
/// to the kinds that may still follow it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenKinds(u8);

impl TokenKinds {
    pub const NONE: TokenKinds = TokenKinds(0);
    pub const TIMESTAMP: TokenKinds = TokenKinds(1);
    pub const DELIMITER: TokenKinds = TokenKinds(1 << 1);
    pub const REF: TokenKinds = TokenKinds(1 << 2);
    pub const EVENT_TYPE: TokenKinds = TokenKinds(1 << 3);
    pub const SOURCE_INFO: TokenKinds = TokenKinds(1 << 4);
    pub const MESSAGE: TokenKinds = TokenKinds(1 << 5);

    /// Everything that may follow the timestamp.
    pub const AFTER_TIMESTAMP: TokenKinds =
        TokenKinds(Self::REF.0 | Self::EVENT_TYPE.0 | Self::SOURCE_INFO.0 | Self::MESSAGE.0);

    const NAMES: [(TokenKinds, &'static str); 6] = [
        (Self::TIMESTAMP, "timestamp"),
        (Self::DELIMITER, "delimiter"),
        (Self::REF, "component reference"),
        (Self::EVENT_TYPE, "event type"),
        (Self::SOURCE_INFO, "source info"),
        (Self::MESSAGE, "message"),
    ];

    pub const fn contains(self, other: TokenKinds) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Kinds that may still follow once `kind` has been accepted.
    ///
    /// Fields appear in a fixed order, so accepting one drops it and
    /// everything before it.
    pub const fn after(kind: TokenKinds) -> TokenKinds {
        match kind.0 {
            x if x == Self::TIMESTAMP.0 => Self::AFTER_TIMESTAMP,
            x if x == Self::REF.0 => {
                TokenKinds(Self::EVENT_TYPE.0 | Self::SOURCE_INFO.0 | Self::MESSAGE.0)
            }
            x if x == Self::EVENT_TYPE.0 => TokenKinds(Self::SOURCE_INFO.0 | Self::MESSAGE.0),
            _ => Self::MESSAGE,
        }
    }
}

impl fmt::Display for TokenKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("nothing");
        }
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(kind, _)| self.contains(*kind))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&names.join(" | "))
    }
}

impl fmt::Debug for TokenKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenKinds({})", self)
    }
}

/// Errors produced while tokenizing one record.
///
/// Offsets are relative to the start of the record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordParseError {
    #[error("malformed timestamp at offset {offset} (expected {expected})")]
    MalformedTimestamp { offset: usize, expected: TokenKinds },

    #[error("unexpected end of record at offset {offset} (expected {expected})")]
    UnexpectedEndOfRecord { offset: usize, expected: TokenKinds },

    #[error("unrecognized token at offset {offset} (expected {expected})")]
    UnrecognizedToken { offset: usize, expected: TokenKinds },
}

impl RecordParseError {
    /// Byte offset of the offending input within the record.
    pub fn offset(&self) -> usize {
        match self {
            RecordParseError::MalformedTimestamp { offset, .. }
            | RecordParseError::UnexpectedEndOfRecord { offset, .. }
            | RecordParseError::UnrecognizedToken { offset, .. } => *offset,
        }
    }
}
