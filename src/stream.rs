//! Streaming conversion API: emit one report per PDF as it completes.
//!
//! Unlike the eager [`crate::convert::convert_batch`], which returns only
//! after every file has been attempted, [`convert_stream`] yields each
//! [`FileReport`] as soon as its PNG is placed (or its conversion is
//! abandoned). Files are still converted strictly one at a time and in
//! discovery order; the next render starts only when the stream is polled
//! again.
//!
//! Progress callbacks fire for skipped inputs only; per-file events are the
//! stream items themselves.

use crate::config::ConversionConfig;
use crate::convert::{convert_file, prepare};
use crate::error::Pdf2PngError;
use crate::output::FileReport;
use futures::stream::{self, Stream, StreamExt};
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use tracing::info;

/// A boxed stream of per-file reports.
pub type ReportStream = Pin<Box<dyn Stream<Item = FileReport> + Send>>;

/// Convert every PDF reachable from `inputs`, streaming reports.
///
/// Discovery happens before this function returns, so an input list with
/// no PDFs fails here with [`Pdf2PngError::NoPdfFound`] and no renderer is
/// ever started.
///
/// # Example
/// ```rust,no_run
/// use futures::StreamExt;
/// use pdf2png::{convert_stream, ConversionConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ConversionConfig::default();
/// let mut reports = convert_stream(&["Figures/"], &config).await?;
/// while let Some(report) = reports.next().await {
///     println!("{} ok={}", report.request.file_name(), report.is_success());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn convert_stream<P: AsRef<Path>>(
    inputs: &[P],
    config: &ConversionConfig,
) -> Result<ReportStream, Pdf2PngError> {
    let (requests, _skipped) = prepare(inputs, config).await?;
    info!("Streaming conversion of {} PDF(s)", requests.len());

    let renderer = config.resolve_renderer();
    let probe = config.resolve_probe();

    let reports = stream::iter(requests).then(move |request| {
        let renderer = Arc::clone(&renderer);
        let probe = Arc::clone(&probe);
        async move {
            let outcome = convert_file(&request, renderer.as_ref(), probe.as_ref()).await;
            FileReport { request, outcome }
        }
    });

    Ok(Box::pin(reports))
}
