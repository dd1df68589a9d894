//! seqlog library
//!
//! Reads TTCN-3 execution logs and turns each test case into an ordered
//! timeline of sequence-diagram events, indexing once and decoding windows
//! of the index on demand.

pub mod analyser;
pub mod cli;
pub mod config;
pub mod decipher;
pub mod logfile;
pub mod parser;
pub mod progress;
pub mod record;
pub mod timeline;

pub use analyser::{ExecutionMode, LogFormat, MessageAnalyser};
pub use config::Config;
pub use decipher::{Decipherer, DecipheringRules};
pub use logfile::{extract_test_cases, LogFile, LogMetadata, TestCase};
pub use parser::{Parser, Region, ScanError, ScanResult, ScanStatus};
pub use progress::{ConsoleProgress, NullProgress, ProgressMonitor};
pub use record::{LogRecord, RecordParser};
pub use timeline::{Event, EventKind, FilterConfiguration, Preferences, Verdict};
