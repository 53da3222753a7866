//! Whole-file reading and atomic writing

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::block::Document;
use crate::error::{Error, Result};
use crate::formatter::format_document;
use crate::parser::parse;

/// Read and parse a BibTeX file
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(parse(&content))
}

/// Format a document and write it to `path` atomically
pub fn write_file(path: impl AsRef<Path>, document: &Document) -> Result<()> {
    write_atomic(path.as_ref(), format_document(document).as_bytes())
}

/// Write content atomically to a file.
///
/// The content goes to a temporary file next to `path` which is then renamed
/// over the target, so the target is either fully written or untouched.
/// Permissions of an existing target are carried over. When `path` is a
/// symlink the file it points to is replaced and the link is kept.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let target = resolve_target(path);
    let temp_path = temp_path_for(&target);

    let result = write_temp(&temp_path, &target, content)
        .and_then(|()| fs::rename(&temp_path, &target).map_err(|e| Error::io(&target, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp(temp_path: &Path, target: &Path, content: &[u8]) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    if let Ok(metadata) = fs::metadata(target) {
        fs::set_permissions(temp_path, metadata.permissions())
            .map_err(|e| Error::io(temp_path, e))?;
    }

    Ok(())
}

/// Follow symlinks to the real file; a path that does not exist yet is used as is
fn resolve_target(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Temp file in the same directory as `path` (same filesystem for the rename)
fn temp_path_for(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    path.with_file_name(temp_name)
}
