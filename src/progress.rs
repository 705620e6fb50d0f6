//! Progress-callback trait for per-file batch events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the batch walks its inputs. The CLI uses this seam to print its
//! `fig.pdf -> fig.png  (...)` lines; library callers can forward the same
//! events anywhere else without the library knowing how they are displayed.
//!
//! # Example
//!
//! ```rust
//! use pdf2png::{ConversionProgressCallback, ConversionConfig, FileReport};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     converted: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_file_complete(&self, index: usize, total: usize, report: &FileReport) {
//!         self.converted.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{}/{} {}", index + 1, total, report.request.file_name());
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { converted: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::error::{FileError, SkipReason};
use crate::output::FileReport;
use std::path::Path;
use std::sync::Arc;

/// Called by the batch driver as it processes each input.
///
/// Files are converted strictly one after another, so calls never overlap,
/// but the trait is `Send + Sync` so a config can be shared across tasks.
/// All methods have default no-op implementations.
pub trait ConversionProgressCallback: Send + Sync {
    /// An input argument was neither a PDF file nor a directory.
    fn on_input_skipped(&self, input: &Path, reason: SkipReason) {
        let _ = (input, reason);
    }

    /// Called once, after discovery, before the first render.
    fn on_batch_start(&self, total_files: usize, max_dimension: u32) {
        let _ = (total_files, max_dimension);
    }

    /// Called just before the renderer is invoked for a PDF.
    ///
    /// `index` is 0-based in discovery order.
    fn on_file_start(&self, index: usize, total_files: usize, pdf: &Path) {
        let _ = (index, total_files, pdf);
    }

    /// Called when a PDF was converted and placed.
    fn on_file_complete(&self, index: usize, total_files: usize, report: &FileReport) {
        let _ = (index, total_files, report);
    }

    /// Called when a PDF's conversion was abandoned.
    fn on_file_error(&self, index: usize, total_files: usize, pdf: &Path, error: &FileError) {
        let _ = (index, total_files, pdf, error);
    }

    /// Called once after every PDF has been attempted.
    fn on_batch_complete(&self, total_files: usize, converted: usize) {
        let _ = (total_files, converted);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{ConversionRequest, ConversionResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        skipped: AtomicUsize,
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        converted_total: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_input_skipped(&self, _input: &Path, _reason: SkipReason) {
            self.skipped.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_start(&self, _index: usize, _total: usize, _pdf: &Path) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_complete(&self, _index: usize, _total: usize, _report: &FileReport) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_error(&self, _index: usize, _total: usize, _pdf: &Path, _error: &FileError) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_batch_complete(&self, _total: usize, converted: usize) {
            self.converted_total.store(converted, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        let report = FileReport {
            request: ConversionRequest::new("a.pdf", ".", 2400),
            outcome: Ok(ConversionResult::default()),
        };
        cb.on_input_skipped(Path::new("notes.txt"), SkipReason::NotPdf);
        cb.on_batch_start(1, 2400);
        cb.on_file_start(0, 1, Path::new("a.pdf"));
        cb.on_file_complete(0, 1, &report);
        cb.on_batch_complete(1, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();
        let missing = FileError::OutputMissing {
            expected: "/tmp/x/b.pdf.png".into(),
        };
        let ok = FileReport {
            request: ConversionRequest::new("a.pdf", ".", 2400),
            outcome: Ok(ConversionResult::default()),
        };

        tracker.on_input_skipped(Path::new("notes.txt"), SkipReason::NotPdf);
        tracker.on_file_start(0, 2, Path::new("a.pdf"));
        tracker.on_file_complete(0, 2, &ok);
        tracker.on_file_start(1, 2, Path::new("b.pdf"));
        tracker.on_file_error(1, 2, Path::new("b.pdf"), &missing);
        tracker.on_batch_complete(2, 1);

        assert_eq!(tracker.skipped.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.converted_total.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn ConversionProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_batch_start(10, 3000);
        cb.on_file_start(0, 10, Path::new("fig.pdf"));
    }
}
