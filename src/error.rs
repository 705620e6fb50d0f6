//! Error types for the pdf2png library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Pdf2PngError`]: **fatal**, the batch cannot run at all (no PDFs
//!   were discovered, the configuration is invalid). Returned as
//!   `Err(Pdf2PngError)` from the top-level `convert*` functions.
//!
//! * [`FileError`]: **non-fatal**, a single PDF failed (the renderer
//!   exited non-zero, its PNG never appeared) but every other file is
//!   unaffected. Stored inside [`crate::output::FileReport`] so callers can
//!   inspect partial success instead of losing the whole batch to one bad
//!   figure.
//!
//! Inputs that are neither a PDF nor a directory are not errors at all;
//! they are reported through [`SkipReason`] and excluded.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2png library.
///
/// Per-file failures use [`FileError`] and are stored in
/// [`crate::output::FileReport`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Pdf2PngError {
    // ── Discovery errors ──────────────────────────────────────────────────
    /// None of the supplied inputs yielded a PDF file.
    #[error("No PDF files found in {} input(s).", .inputs.len())]
    NoPdfFound { inputs: Vec<PathBuf> },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The output directory could not be created.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Some files failed and the caller asked for strict handling.
    ///
    /// Returned by [`crate::output::BatchReport::into_result`].
    #[error("{failed}/{total} PDF conversions failed")]
    PartialFailure { failed: usize, total: usize },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single PDF.
///
/// The batch continues with the next file; nothing is written to the
/// output directory for the failed one.
#[derive(Debug, Error)]
pub enum FileError {
    /// The scoped working directory could not be created.
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),

    /// The renderer program could not be started at all.
    #[error("{program} could not be started: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The renderer ran but exited with a non-zero status.
    #[error("{program} failed for {file} ({status})\n  stderr: {stderr}")]
    RenderFailed {
        program: String,
        file: String,
        status: String,
        stderr: String,
    },

    /// The renderer succeeded but its PNG is not where it should be.
    #[error("expected output not found: {}", .expected.display())]
    OutputMissing { expected: PathBuf },

    /// The output directory for this file could not be created.
    #[error("failed to create output directory '{}': {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rendered PNG could not be moved into the output directory.
    #[error("failed to move {} to {}: {source}", .from.display(), .to.display())]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why an input argument was excluded from the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing exists at the path.
    NotFound,
    /// A file exists but its extension is not `.pdf`.
    NotPdf,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Both reasons surface to the user with the same wording.
        f.write_str("not a PDF file or directory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pdf_found_display() {
        let e = Pdf2PngError::NoPdfFound {
            inputs: vec!["a".into(), "b".into()],
        };
        assert!(e.to_string().starts_with("No PDF files found"));
        assert!(e.to_string().contains("2 input(s)"));
    }

    #[test]
    fn partial_failure_display() {
        let e = Pdf2PngError::PartialFailure {
            failed: 1,
            total: 4,
        };
        assert!(e.to_string().contains("1/4"), "got: {e}");
    }

    #[test]
    fn render_failed_carries_stderr() {
        let e = FileError::RenderFailed {
            program: "qlmanage".into(),
            file: "fig.pdf".into(),
            status: "exit status: 1".into(),
            stderr: "no such file".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("qlmanage failed for fig.pdf"), "got: {msg}");
        assert!(msg.contains("stderr: no such file"), "got: {msg}");
    }

    #[test]
    fn skip_reason_wording() {
        assert_eq!(SkipReason::NotFound.to_string(), "not a PDF file or directory");
        assert_eq!(SkipReason::NotPdf.to_string(), "not a PDF file or directory");
    }
}
