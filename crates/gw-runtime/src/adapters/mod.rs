//! # Adapters
//!
//! - `console` - Line-oriented channel over stdin/stdout

pub mod console;

pub use console::{parse_line, ConsoleInput, ConsoleLine, ConsoleReplyChannel, ParseError};
