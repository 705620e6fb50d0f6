//! # pdf2png
//!
//! Batch-convert PDF figures to high-resolution PNGs using the platform's
//! own thumbnail renderer.
//!
//! No PDF is parsed or rasterised in-process. Each file is handed to an
//! external renderer (Quick Look's `qlmanage` on macOS, Poppler's
//! `pdftoppm` elsewhere) inside a scoped temporary directory, and the PNG
//! it produces is moved next to the PDF or into a chosen output directory.
//! A second, best-effort step reports the PNG's pixel size.
//!
//! ## Pipeline Overview
//!
//! ```text
//! inputs (files / directories)
//!  │
//!  ├─ 1. Input   expand directories, keep *.pdf (case-insensitive), sort
//!  ├─ 2. Render  external renderer → <tmpdir>/<name>.pdf.png
//!  ├─ 3. Place   move to <output_dir>/<stem>.png
//!  └─ 4. Probe   pixelWidth / pixelHeight for the report line
//! ```
//!
//! Files are processed strictly one after another. A failure affects only
//! its own file; the batch always continues.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2png::{convert_batch, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .output_dir("static/images")
//!         .max_dimension(3000)
//!         .build()?;
//!     let report = convert_batch(&["Figures/"], &config).await?;
//!     for file in &report.files {
//!         if let Ok(result) = &file.outcome {
//!             let png = result.output_file_name().unwrap_or_default();
//!             println!("{} ({})", png, result.dimensions);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2png` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2png = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    ConversionConfig, ConversionConfigBuilder, ProbeBackend, RenderBackend, DEFAULT_MAX_DIMENSION,
};
pub use convert::{convert_batch, convert_file, convert_sync, render_to_output};
pub use error::{FileError, Pdf2PngError, SkipReason};
pub use output::{BatchReport, BatchStats, ConversionRequest, ConversionResult, FileReport};
pub use pipeline::probe::{DimensionProbe, Dimensions, ImageHeaderProbe, SipsProbe};
pub use pipeline::render::{PopplerRenderer, QuickLookRenderer, Renderer};
pub use pipeline::tool::ToolCommand;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use stream::{convert_stream, ReportStream};
