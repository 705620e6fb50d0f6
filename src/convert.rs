//! Eager (whole-batch) conversion entry points.
//!
//! [`convert_batch`] walks every input, converts the discovered PDFs one
//! after another and returns a [`BatchReport`] once all of them have been
//! attempted. Use [`crate::stream::convert_stream`] to receive each
//! [`FileReport`] as soon as its file is done.

use crate::config::ConversionConfig;
use crate::error::{FileError, Pdf2PngError};
use crate::output::{BatchReport, BatchStats, ConversionRequest, ConversionResult, FileReport};
use crate::pipeline::probe::DimensionProbe;
use crate::pipeline::render::{expected_png, Renderer};
use crate::pipeline::{input, place};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Convert every PDF reachable from `inputs`.
///
/// # Arguments
/// * `inputs`: PDF file paths and/or directories containing PDFs
/// * `config`: Conversion configuration
///
/// # Returns
/// `Ok(BatchReport)` once every PDF has been attempted, even if some of them
/// failed (check `report.stats.failed_files`, or call
/// [`BatchReport::into_result`]).
///
/// # Errors
/// Returns `Err(Pdf2PngError)` only for fatal errors:
/// - No PDF was discovered (no renderer is ever invoked)
/// - The explicit output directory cannot be created
pub async fn convert_batch<P: AsRef<Path>>(
    inputs: &[P],
    config: &ConversionConfig,
) -> Result<BatchReport, Pdf2PngError> {
    let total_start = Instant::now();

    // ── Step 1: Discover PDFs ────────────────────────────────────────────
    let (requests, skipped) = prepare(inputs, config).await?;
    let total = requests.len();
    info!("Converting {} PDF(s) at {}px", total, config.max_dimension);

    // ── Step 2: Resolve backends ─────────────────────────────────────────
    let renderer = config.resolve_renderer();
    let probe = config.resolve_probe();
    debug!("Renderer: {}, probe: {}", renderer.name(), probe.name());

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total, config.max_dimension);
    }

    // ── Step 3: Convert sequentially ─────────────────────────────────────
    let mut files = Vec::with_capacity(total);
    for (index, request) in requests.into_iter().enumerate() {
        if let Some(ref cb) = config.progress_callback {
            cb.on_file_start(index, total, request.source_path());
        }

        let outcome = convert_file(&request, renderer.as_ref(), probe.as_ref()).await;
        let report = FileReport { request, outcome };

        if let Some(ref cb) = config.progress_callback {
            match &report.outcome {
                Ok(_) => cb.on_file_complete(index, total, &report),
                Err(e) => cb.on_file_error(index, total, report.request.source_path(), e),
            }
        }
        files.push(report);
    }

    // ── Step 4: Summarise ────────────────────────────────────────────────
    let converted = files.iter().filter(|f| f.is_success()).count();
    let stats = BatchStats {
        total_files: total,
        converted_files: converted,
        failed_files: total - converted,
        skipped_inputs: skipped,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Batch complete: {}/{} converted, {}ms",
        converted, total, stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, converted);
    }

    Ok(BatchReport { files, stats })
}

/// Synchronous wrapper around [`convert_batch`].
///
/// Creates a single-threaded tokio runtime internally.
pub fn convert_sync<P: AsRef<Path>>(
    inputs: &[P],
    config: &ConversionConfig,
) -> Result<BatchReport, Pdf2PngError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Pdf2PngError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert_batch(inputs, config))
}

/// Convert one PDF, then probe the PNG it produced.
///
/// The probe never turns a success into a failure; when it learns
/// nothing the result simply carries an empty dimension string.
pub async fn convert_file(
    request: &ConversionRequest,
    renderer: &dyn Renderer,
    probe: &dyn DimensionProbe,
) -> Result<ConversionResult, FileError> {
    let output_path = render_to_output(request, renderer).await?;
    let dims = probe.probe(&output_path).await;

    Ok(ConversionResult {
        output_path: Some(output_path),
        width: dims.width,
        height: dims.height,
        dimensions: dims.text,
    })
}

/// Render `request` in a scoped temporary directory and move the PNG to
/// its final location.
///
/// The temporary directory is removed when this function returns, on
/// every path.
pub async fn render_to_output(
    request: &ConversionRequest,
    renderer: &dyn Renderer,
) -> Result<PathBuf, FileError> {
    let work_dir = tempfile::Builder::new()
        .prefix("pdf2png-")
        .tempdir()
        .map_err(FileError::TempDir)?;

    let source = request.source_path();
    renderer
        .render(source, request.max_dimension(), work_dir.path())
        .await
        .inspect_err(|e| debug!("{}: {}", source.display(), e))?;

    let rendered = expected_png(work_dir.path(), source);
    if !tokio::fs::try_exists(&rendered).await.unwrap_or(false) {
        debug!("{}: renderer produced no {}", source.display(), rendered.display());
        return Err(FileError::OutputMissing { expected: rendered });
    }

    let output_path = request.output_path();
    place::ensure_dir(request.output_directory()).await?;
    place::move_into_place(&rendered, &output_path).await?;
    debug!("{} -> {}", source.display(), output_path.display());

    Ok(output_path)
}

/// Discover PDFs, report skips, and build one request per PDF.
///
/// Returns the requests and the number of skipped inputs.
pub(crate) async fn prepare<P: AsRef<Path>>(
    inputs: &[P],
    config: &ConversionConfig,
) -> Result<(Vec<ConversionRequest>, usize), Pdf2PngError> {
    let discovery = input::discover(inputs);

    if let Some(ref cb) = config.progress_callback {
        for (input, reason) in &discovery.skipped {
            cb.on_input_skipped(input, *reason);
        }
    }

    if discovery.is_empty() {
        return Err(Pdf2PngError::NoPdfFound {
            inputs: inputs.iter().map(|p| p.as_ref().to_path_buf()).collect(),
        });
    }

    // An explicit output directory is created once, before any render.
    if let Some(ref dir) = config.output_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Pdf2PngError::OutputDirFailed {
                path: dir.clone(),
                source: e,
            })?;
    }

    let explicit = config.output_dir.as_deref();
    let requests = discovery
        .pdfs
        .iter()
        .map(|pdf| {
            ConversionRequest::new(
                pdf.clone(),
                place::output_dir_for(pdf, explicit),
                config.max_dimension,
            )
        })
        .collect();

    Ok((requests, discovery.skipped.len()))
}
