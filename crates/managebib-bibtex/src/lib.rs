//! BibTeX parsing and formatting for managebib
//!
//! This crate reads a BibTeX file into an ordered [`Document`] of blocks and
//! writes it back out. Nothing in the file is dropped: entries, `@string`
//! macros, `@preamble` declarations, explicit and implicit comments, and
//! blocks that failed to parse all survive a parse/format cycle in their
//! original order.
//!
//! Features:
//! - Nom-based parser that records malformed blocks instead of aborting
//! - Field values kept exactly as written (delimiters and `#` concatenation)
//! - Deterministic, idempotent formatter
//! - Whole-file read and atomic write

mod block;
mod entry;
mod error;
mod formatter;
mod io;
pub mod parser;

pub use block::{Block, Comment, CommentKind, Document, FailedBlock, Preamble, StringMacro};
pub use entry::{BibTeXEntry, BibTeXField};
pub use error::{Error, Result};
pub use formatter::format_document;
pub use io::{parse_file, write_atomic, write_file};
pub use parser::parse;
