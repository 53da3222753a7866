//! BibTeX formatting module
//!
//! Converts a [`Document`] back to BibTeX text. Output is deterministic and
//! formatting a parsed formatter output yields the same text again.

use crate::block::{Block, Comment, CommentKind, Document};
use crate::entry::BibTeXEntry;

/// Prefix for each field line
const FIELD_INDENT: &str = "    ";

/// Text placed between two blocks
const BLOCK_SEPARATOR: &str = "\n\n";

/// Format a document.
///
/// Blocks are separated by a blank line; non-empty output ends with a single
/// newline and an empty document formats to the empty string.
pub fn format_document(document: &Document) -> String {
    if document.is_empty() {
        return String::new();
    }

    let mut result = document
        .blocks
        .iter()
        .map(format_block)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR);
    result.push('\n');
    result
}

fn format_block(block: &Block) -> String {
    match block {
        Block::Entry(entry) => format_entry(entry),
        Block::StringMacro(macro_def) => {
            format!("@string{{{} = {}}}", macro_def.name, macro_def.value)
        }
        Block::Preamble(preamble) => format!("@preamble{{{}}}", preamble.value),
        Block::Comment(comment) => format_comment(comment),
        Block::Failed(failed) => failed.raw.clone(),
    }
}

fn format_entry(entry: &BibTeXEntry) -> String {
    let mut result = String::new();

    // Entry type and cite key
    result.push('@');
    result.push_str(&entry.entry_type);
    result.push('{');
    result.push_str(entry.cite_key_or_empty());
    result.push(',');
    result.push('\n');

    // Fields
    for field in &entry.fields {
        result.push_str(FIELD_INDENT);
        result.push_str(&field.key);
        result.push_str(" = ");
        result.push_str(&field.value);
        result.push(',');
        result.push('\n');
    }

    result.push('}');
    result
}

fn format_comment(comment: &Comment) -> String {
    match comment.kind {
        CommentKind::Implicit => comment.text.clone(),
        CommentKind::Explicit => format!("@comment{{{}}}", comment.text),
    }
}
