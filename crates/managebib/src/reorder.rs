//! Entry reordering
//!
//! Entries are sorted by citation key and written back into the positions
//! entries occupied before; every other block stays where it was.

use std::borrow::Cow;

use managebib_bibtex::{BibTeXEntry, Block, Document};

/// How citation keys are compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Compare lower-cased keys
    #[default]
    CaseInsensitive,
    /// Compare keys as stored
    CaseSensitive,
}

impl SortOrder {
    pub fn from_case_insensitive(case_insensitive: bool) -> Self {
        if case_insensitive {
            Self::CaseInsensitive
        } else {
            Self::CaseSensitive
        }
    }
}

/// Sort key of an entry. A missing citation key sorts as the empty string.
pub fn sort_key(entry: &BibTeXEntry, order: SortOrder) -> Cow<'_, str> {
    let key = entry.cite_key_or_empty();
    match order {
        SortOrder::CaseInsensitive => Cow::Owned(key.to_lowercase()),
        SortOrder::CaseSensitive => Cow::Borrowed(key),
    }
}

/// Sort the entries of `document` by citation key.
///
/// Lower-cased keys are compared when `case_insensitive` is set.
pub fn reorder(document: Document, case_insensitive: bool) -> Document {
    reorder_by(document, SortOrder::from_case_insensitive(case_insensitive))
}

/// Sort the entries of `document` by citation key using `order`.
///
/// The sort is stable: entries with equal keys keep their relative order.
/// Entry positions and all non-entry blocks are unchanged.
pub fn reorder_by(document: Document, order: SortOrder) -> Document {
    let blocks = document.into_blocks();

    // `None` marks a slot held by an entry
    let mut slots = Vec::with_capacity(blocks.len());
    let mut entries = Vec::new();
    for block in blocks {
        match block {
            Block::Entry(entry) => {
                entries.push(entry);
                slots.push(None);
            }
            other => slots.push(Some(other)),
        }
    }

    entries.sort_by_cached_key(|entry| sort_key(entry, order).into_owned());

    let mut sorted = entries.into_iter();
    slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| sorted.next().map(Block::Entry)))
        .collect()
}
