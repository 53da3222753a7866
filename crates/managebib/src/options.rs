//! Validated options for the `format` command

use std::path::{Path, PathBuf};

use crate::reorder::SortOrder;

/// Where the formatted document goes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(PathBuf),
    /// Overwrite the input file
    InPlace,
}

impl OutputTarget {
    /// Path that will be written, if any
    pub fn path<'a>(&'a self, bibfile: &'a Path) -> Option<&'a Path> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.as_path()),
            OutputTarget::InPlace => Some(bibfile),
        }
    }
}

/// Options for formatting one BibTeX file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub bibfile: PathBuf,
    pub target: OutputTarget,
    pub order: SortOrder,
}

impl FormatOptions {
    /// Case-insensitive sort to standard output
    pub fn new(bibfile: impl Into<PathBuf>) -> Self {
        Self {
            bibfile: bibfile.into(),
            target: OutputTarget::default(),
            order: SortOrder::default(),
        }
    }

    pub fn with_target(mut self, target: OutputTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }
}
