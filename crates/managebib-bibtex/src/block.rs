//! Document and block model
//!
//! A [`Document`] is the ordered list of top-level blocks of a `.bib` file.
//! Order matters: it is the order the blocks are written back in.

use crate::entry::BibTeXEntry;

/// A `@string{name = value}` definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringMacro {
    pub name: String,
    /// Raw value text, delimiters included
    pub value: String,
}

/// A `@preamble{...}` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble {
    /// Raw value text, delimiters included
    pub value: String,
}

/// Where a comment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// Free text between blocks (including `%` lines)
    Implicit,
    /// An `@comment{...}` block
    Explicit,
}

/// A comment block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    pub text: String,
}

impl Comment {
    pub fn implicit(text: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Implicit,
            text: text.into(),
        }
    }

    pub fn explicit(text: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Explicit,
            text: text.into(),
        }
    }
}

/// An `@` block the parser could not make sense of.
///
/// The raw text is kept so the block can be written back untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedBlock {
    /// 1-based line the block starts on
    pub line: u32,
    pub message: String,
    pub raw: String,
}

/// A top-level unit of a BibTeX file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Entry(BibTeXEntry),
    StringMacro(StringMacro),
    Preamble(Preamble),
    Comment(Comment),
    Failed(FailedBlock),
}

impl Block {
    pub fn is_entry(&self) -> bool {
        matches!(self, Block::Entry(_))
    }

    pub fn as_entry(&self) -> Option<&BibTeXEntry> {
        match self {
            Block::Entry(entry) => Some(entry),
            Block::StringMacro(_) | Block::Preamble(_) | Block::Comment(_) | Block::Failed(_) => {
                None
            }
        }
    }
}

impl From<BibTeXEntry> for Block {
    fn from(entry: BibTeXEntry) -> Self {
        Block::Entry(entry)
    }
}

/// An ordered sequence of blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Entries in document order
    pub fn entries(&self) -> impl Iterator<Item = &BibTeXEntry> {
        self.blocks.iter().filter_map(Block::as_entry)
    }

    /// Blocks that failed to parse, in document order
    pub fn failed_blocks(&self) -> impl Iterator<Item = &FailedBlock> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Failed(failed) => Some(failed),
            _ => None,
        })
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl FromIterator<Block> for Document {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
