//! Codec module - converts between plain text and Morse symbol sequences
//!
//! This module provides:
//! - The fixed code table (A-Z, 0-9 and a handful of punctuation marks)
//! - `encode` / `decode` for the space-delimited symbol sequence format
//!
//! Both directions are lenient: anything the table does not know about
//! passes through unchanged instead of being reported as an error.

mod table;
mod translate;

pub use table::{CodeTable, CODE_TABLE};
pub use translate::{decode, encode};

/// Token that marks a word boundary in a symbol sequence
pub const WORD_SEPARATOR: &str = "/";

/// Short mark, one unit long
pub const DOT: char = '.';

/// Long mark, three units long
pub const DASH: char = '-';
