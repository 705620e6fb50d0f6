//! Request and result types passed between the pipeline stages.

use crate::error::{FileError, Pdf2PngError};
use std::path::{Path, PathBuf};

/// Everything needed to convert one PDF.
///
/// Built once per discovered PDF, before the renderer runs, and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    source_path: PathBuf,
    output_directory: PathBuf,
    max_dimension: u32,
}

impl ConversionRequest {
    pub fn new(
        source_path: impl Into<PathBuf>,
        output_directory: impl Into<PathBuf>,
        max_dimension: u32,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            output_directory: output_directory.into(),
            max_dimension,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    /// The source file name, e.g. `fig.pdf`.
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_path.display().to_string())
    }

    /// Where the PNG lands: `<output_directory>/<stem>.png`.
    pub fn output_path(&self) -> PathBuf {
        let stem = self
            .source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        self.output_directory.join(format!("{stem}.png"))
    }
}

/// Outcome of a single successful conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionResult {
    /// Final PNG location. `None` only for a result that was never placed.
    pub output_path: Option<PathBuf>,
    /// Pixel width, when the probe could determine it.
    pub width: Option<u32>,
    /// Pixel height, when the probe could determine it.
    pub height: Option<u32>,
    /// Human-readable dimension text reported by the probe; empty when the
    /// probe failed.
    pub dimensions: String,
}

impl ConversionResult {
    /// The output file name, e.g. `fig.png`.
    pub fn output_file_name(&self) -> Option<String> {
        self.output_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }
}

/// The report for one discovered PDF: exactly one per request.
#[derive(Debug)]
pub struct FileReport {
    pub request: ConversionRequest,
    pub outcome: Result<ConversionResult, FileError>,
}

impl FileReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Summary counters for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// PDFs discovered (and therefore attempted).
    pub total_files: usize,
    pub converted_files: usize,
    pub failed_files: usize,
    /// Input arguments that were neither a PDF nor a directory.
    pub skipped_inputs: usize,
    pub total_duration_ms: u64,
}

/// Everything a batch produced, in discovery order.
#[derive(Debug)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub stats: BatchStats,
}

impl BatchReport {
    /// Treat any per-file failure as an error.
    pub fn into_result(self) -> Result<Self, Pdf2PngError> {
        if self.stats.failed_files > 0 {
            return Err(Pdf2PngError::PartialFailure {
                failed: self.stats.failed_files,
                total: self.stats.total_files,
            });
        }
        Ok(self)
    }
}
