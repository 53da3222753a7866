//! BibTeX operations for the `managebib` command line tool
//!
//! The core operation sorts the entries of a BibTeX file by citation key.
//! Comments, `@preamble` and `@string` blocks, and anything that failed to
//! parse stay at their original positions; entries are redistributed over
//! the slots entries already occupied.
//!
//! Parsing and formatting live in [`managebib_bibtex`].

pub mod command;
pub mod error;
pub mod options;
pub mod reorder;

pub use command::{format_file, run_format, run_format_to};
pub use error::{Error, Result};
pub use options::{FormatOptions, OutputTarget};
pub use reorder::{reorder, reorder_by, sort_key, SortOrder};
