//! OpenSSH command-line parsing
//!
//! The grammar is fixed at compile time and mirrors the OpenSSH 8.9p1
//! client, plus the Azure Arc extension options.

pub mod grammar;
pub mod parser;

// Re-exports
pub use grammar::{short_arity, Arity, LongOption, OptionName, GENERIC_OPTION_FLAG};
pub use parser::{parse, ParsedArgs, ParsedOption};
