//! Input resolution: expand user-supplied paths into an ordered PDF list.
//!
//! Directories contribute their direct `.pdf` children (case-insensitive,
//! non-recursive) sorted by file name; files contribute themselves when
//! their extension is `.pdf`. Anything else is skipped and reported. No
//! deduplication happens: a PDF named twice is converted twice.

use crate::error::SkipReason;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The result of walking every input argument.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// PDFs to convert, in processing order.
    pub pdfs: Vec<PathBuf>,
    /// Arguments that were excluded, with the reason.
    pub skipped: Vec<(PathBuf, SkipReason)>,
}

impl Discovery {
    pub fn is_empty(&self) -> bool {
        self.pdfs.is_empty()
    }
}

/// True when `path` ends in `.pdf`, ignoring case.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Resolve every input argument, preserving argument order.
pub fn discover<P: AsRef<Path>>(inputs: &[P]) -> Discovery {
    let mut found = Discovery::default();

    for input in inputs {
        let path = input.as_ref();

        if path.is_dir() {
            let pdfs = pdfs_in_dir(path);
            debug!("{}: {} PDF(s)", path.display(), pdfs.len());
            found.pdfs.extend(pdfs);
        } else if path.is_file() && has_pdf_extension(path) {
            found.pdfs.push(path.to_path_buf());
        } else {
            let reason = if path.exists() {
                SkipReason::NotPdf
            } else {
                SkipReason::NotFound
            };
            debug!("Skipping {} ({:?})", path.display(), reason);
            found.skipped.push((path.to_path_buf(), reason));
        }
    }

    found
}

/// Direct `.pdf` children of `dir`, sorted by file name.
///
/// An unreadable directory contributes nothing.
fn pdfs_in_dir(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut pdfs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && has_pdf_extension(p))
        .collect();
    pdfs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    pdfs
}
