//! Record layer: one log line in, one classified [`LogRecord`] out.
//!
//! A record has the shape
//!
//! ```text
//! <timestamp> [<ref>] [<eventtype>] [<sourceinfo>] <message>
//! ```
//!
//! # Structure
//!
//! - `types` - the field model ([`LogRecord`], [`TimestampFormat`], [`ConnectedRecord`])
//! - `event_type` - the table of known event-type tokens
//! - `error` - typed parse failures and the expected-token bitmask
//! - `parser` - the recursive tokenizer ([`RecordParser`])

mod error;
pub mod event_type;
mod parser;
mod types;

pub use error::{RecordParseError, TokenKinds};
pub use event_type::EventTypeTag;
pub use parser::{is_component_ref, is_source_info, normalize_component_ref, RecordParser};
pub use types::{ConnectedRecord, LogRecord, TimestampFormat};
