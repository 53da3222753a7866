//! The `format` command: read, sort entries, write

use std::io::{self, Write};
use std::path::Path;

use managebib_bibtex::{format_document, parse_file, write_file, Document};

use crate::error::{Error, Result};
use crate::options::{FormatOptions, OutputTarget};
use crate::reorder::reorder_by;

/// Read and parse `path`, then sort its entries.
///
/// Blocks that failed to parse are reported and kept as they are.
pub fn format_file(options: &FormatOptions) -> Result<Document> {
    let path = options.bibfile.as_path();
    let document = parse_file(path)?;
    tracing::debug!(
        "Parsed {} blocks ({} entries) from {:?}",
        document.len(),
        document.entries().count(),
        path
    );
    report_failed_blocks(path, &document);

    Ok(reorder_by(document, options.order))
}

/// Run `format`, sending standard output to the process stdout
pub fn run_format(options: &FormatOptions) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    run_format_to(options, &mut handle)
}

/// Run `format`, sending standard output to `out`
pub fn run_format_to<W: Write>(options: &FormatOptions, out: &mut W) -> Result<()> {
    let sorted = format_file(options)?;

    match &options.target {
        OutputTarget::Stdout => {
            out.write_all(format_document(&sorted).as_bytes())
                .and_then(|()| out.flush())
                .map_err(|source| Error::Io {
                    context: "write to standard output",
                    source,
                })?;
        }
        OutputTarget::File(path) => write_file(path, &sorted)?,
        OutputTarget::InPlace => write_file(&options.bibfile, &sorted)?,
    }

    if let Some(path) = options.target.path(&options.bibfile) {
        tracing::info!("Wrote {} blocks to {:?}", sorted.len(), path);
    }
    Ok(())
}

fn report_failed_blocks(path: &Path, document: &Document) {
    for failed in document.failed_blocks() {
        tracing::warn!(
            "{}:{}: could not parse block, keeping it unchanged ({})",
            path.display(),
            failed.line,
            failed.message
        );
    }
}
