//! CLI binary for pdf2png.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and prints one report line per PDF.

use anyhow::{Context, Result};
use clap::Parser;
use pdf2png::{
    convert_batch, BatchReport, ConversionConfig, ConversionProgressCallback, ConversionResult,
    FileError, FileReport, Pdf2PngError, ProbeBackend, ProgressCallback, RenderBackend,
    SkipReason,
};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Exit status when `--strict` is set and at least one file failed.
const EXIT_PARTIAL_FAILURE: u8 = 2;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn paint(code: &str, s: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{code}m{s}\x1b[0m")
    } else {
        s.to_string()
    }
}

// ── Report lines ─────────────────────────────────────────────────────────────

const NO_PDFS_FOUND: &str = "No PDF files found.";

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn skip_line(input: &Path, reason: SkipReason) -> String {
    format!("Skipping: {} ({reason})", input.display())
}

/// Header line, followed by a blank line.
fn batch_start_line(total_files: usize, max_dimension: u32) -> String {
    format!("Found {total_files} PDF(s) to convert (max size: {max_dimension}px)\n")
}

/// Start of a per-file line; the outcome is appended once known.
fn file_prefix(pdf: &Path) -> String {
    format!("  {} -> ", file_name(pdf))
}

fn success_line(result: &ConversionResult, color: bool) -> String {
    format!(
        "{}  ({})",
        paint("32", &result.output_file_name().unwrap_or_default(), color),
        paint("2", &result.dimensions, color)
    )
}

fn error_line(error: &FileError, color: bool) -> String {
    format!("  {} {error}", paint("31", "ERROR:", color))
}

fn summary_line(total_files: usize, converted: usize, color: bool) -> String {
    match total_files.saturating_sub(converted) {
        0 => "\nDone.".to_string(),
        failed => format!(
            "\nDone. {} of {total_files} conversion(s) failed.",
            paint("31", &failed.to_string(), color)
        ),
    }
}

// ── Console reporter ─────────────────────────────────────────────────────────

/// Prints the per-file report lines to stdout.
///
/// Under `--quiet` only failures are printed, to stderr.
struct ConsoleReporter {
    quiet: bool,
    color: bool,
}

impl ConsoleReporter {
    fn new(quiet: bool) -> Arc<Self> {
        Arc::new(Self {
            quiet,
            color: io::stdout().is_terminal(),
        })
    }
}

impl ConversionProgressCallback for ConsoleReporter {
    fn on_input_skipped(&self, input: &Path, reason: SkipReason) {
        if !self.quiet {
            println!("{}", skip_line(input, reason));
        }
    }

    fn on_batch_start(&self, total_files: usize, max_dimension: u32) {
        if !self.quiet {
            println!("{}", batch_start_line(total_files, max_dimension));
        }
    }

    fn on_file_start(&self, _index: usize, _total: usize, pdf: &Path) {
        if !self.quiet {
            print!("{}", file_prefix(pdf));
            io::stdout().flush().ok();
        }
    }

    fn on_file_complete(&self, _index: usize, _total: usize, report: &FileReport) {
        if self.quiet {
            return;
        }
        if let Ok(ref result) = report.outcome {
            println!("{}", success_line(result, self.color));
        }
    }

    fn on_file_error(&self, _index: usize, _total: usize, pdf: &Path, error: &FileError) {
        if self.quiet {
            eprintln!("{}: {}", pdf.display(), error);
        } else {
            println!("{}", error_line(error, self.color));
        }
    }

    fn on_batch_complete(&self, total_files: usize, converted: usize) {
        if !self.quiet {
            println!("{}", summary_line(total_files, converted, self.color));
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Specific files
  pdf2png figure1.pdf figure2.pdf

  # All PDFs in a directory
  pdf2png Figures/

  # Custom output directory and size
  pdf2png Figures/ -o static/images/ -s 3000

  # Fail the run (exit 2) if any figure could not be converted
  pdf2png --strict Figures/

OUTPUT NAMING:
  Each PNG is named after its PDF (my_figure.pdf -> my_figure.png) and is
  written next to the PDF unless --output-dir is given.

BACKENDS:
  Renderer   Program                              Default on
  ─────────  ───────────────────────────────────  ──────────
  quicklook  qlmanage -t -s <size> -o <dir>       macOS
  poppler    pdftoppm -png -singlefile -scale-to  elsewhere

  Probe      Source                               Default on
  ─────────  ───────────────────────────────────  ──────────
  sips       sips --getProperty pixelWidth ...    macOS
  header     PNG header, read in-process          elsewhere

EXIT STATUS:
  0  all discovered PDFs attempted (failures are reported, not fatal)
  1  no PDF files found, or a fatal error
  2  --strict and at least one conversion failed

ENVIRONMENT VARIABLES:
  PDF2PNG_OUTPUT_DIR   Default for --output-dir
  PDF2PNG_SIZE         Default for --size
  PDF2PNG_RENDERER     Default for --renderer
  PDF2PNG_PROBE        Default for --probe
  RUST_LOG             Log filter (overrides --verbose/--quiet)
"#;

/// Convert PDF figures to high-resolution PNGs.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2png",
    version,
    about = "Convert PDF figures to high-resolution PNGs",
    long_about = "Convert PDF figures to high-resolution PNGs using the platform's thumbnail \
renderer (Quick Look on macOS, Poppler elsewhere). Directories are scanned (non-recursively) \
for *.pdf files.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file(s) or directories containing PDFs.
    #[arg(required = true, num_args = 1.., value_hint = clap::ValueHint::AnyPath)]
    inputs: Vec<PathBuf>,

    /// Output directory for PNGs. Defaults to the directory of each input PDF.
    #[arg(short, long, env = "PDF2PNG_OUTPUT_DIR", value_hint = clap::ValueHint::DirPath)]
    output_dir: Option<PathBuf>,

    /// Max dimension in pixels.
    #[arg(short, long, env = "PDF2PNG_SIZE", default_value_t = pdf2png::DEFAULT_MAX_DIMENSION,
          value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,

    /// Rendering backend: auto, quicklook, poppler.
    #[arg(long, env = "PDF2PNG_RENDERER", value_enum, default_value = "auto")]
    renderer: RendererArg,

    /// Dimension probe: auto, sips, header.
    #[arg(long, env = "PDF2PNG_PROBE", value_enum, default_value = "auto")]
    probe: ProbeArg,

    /// Exit with status 2 if any conversion failed.
    #[arg(long, env = "PDF2PNG_STRICT")]
    strict: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2PNG_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2PNG_QUIET", conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum RendererArg {
    Auto,
    Quicklook,
    Poppler,
}

impl From<RendererArg> for RenderBackend {
    fn from(v: RendererArg) -> Self {
        match v {
            RendererArg::Auto => RenderBackend::Auto,
            RendererArg::Quicklook => RenderBackend::QuickLook,
            RendererArg::Poppler => RenderBackend::Poppler,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ProbeArg {
    Auto,
    Sips,
    Header,
}

impl From<ProbeArg> for ProbeBackend {
    fn from(v: ProbeArg) -> Self {
        match v {
            ProbeArg::Auto => ProbeBackend::Auto,
            ProbeArg::Sips => ProbeBackend::Sips,
            ProbeArg::Header => ProbeBackend::Header,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The report lines are the primary output; logs stay at WARN unless
    // asked for.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let reporter: ProgressCallback = ConsoleReporter::new(cli.quiet);
    let config = build_config(&cli, reporter)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let report = match convert_batch(&cli.inputs, &config).await {
        Ok(report) => report,
        Err(Pdf2PngError::NoPdfFound { .. }) => {
            if cli.quiet {
                eprintln!("{NO_PDFS_FOUND}");
            } else {
                println!("{NO_PDFS_FOUND}");
            }
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("Conversion failed"),
    };

    let status = exit_status(report, cli.strict).context("Conversion failed")?;
    Ok(ExitCode::from(status))
}

/// Process exit status for a finished batch.
///
/// Lenient runs always succeed; strict runs map a partial failure to
/// [`EXIT_PARTIAL_FAILURE`].
fn exit_status(report: BatchReport, strict: bool) -> Result<u8, Pdf2PngError> {
    if !strict {
        return Ok(0);
    }
    match report.into_result() {
        Ok(_) => Ok(0),
        Err(Pdf2PngError::PartialFailure { .. }) => Ok(EXIT_PARTIAL_FAILURE),
        Err(e) => Err(e),
    }
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: ProgressCallback) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .max_dimension(cli.size)
        .renderer(cli.renderer.into())
        .probe(cli.probe.into())
        .progress_callback(progress);

    if let Some(ref dir) = cli.output_dir {
        builder = builder.output_dir(dir);
    }

    builder.build().context("Invalid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_library() {
        let cli = Cli::try_parse_from(["pdf2png", "Figures/"]).unwrap();
        assert_eq!(cli.size, 2400);
        assert!(cli.output_dir.is_none());
        assert!(!cli.strict);
        assert_eq!(cli.inputs, vec![PathBuf::from("Figures/")]);
    }

    #[test]
    fn short_flags_map_onto_config() {
        let cli =
            Cli::try_parse_from(["pdf2png", "a.pdf", "b.pdf", "-o", "out/", "-s", "3000"]).unwrap();
        let config = build_config(&cli, Arc::new(pdf2png::NoopProgressCallback)).unwrap();
        assert_eq!(config.max_dimension, 3000);
        assert_eq!(config.output_dir, Some(PathBuf::from("out/")));
        assert_eq!(cli.inputs.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_inputs_are_accepted() {
        use std::ffi::OsString;
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let raw = b"Figures/fig\xff.pdf".to_vec();
        let cli = Cli::try_parse_from([OsString::from("pdf2png"), OsString::from_vec(raw.clone())])
            .unwrap();
        assert_eq!(cli.inputs[0].as_os_str().as_bytes(), raw.as_slice());
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(Cli::try_parse_from(["pdf2png", "a.pdf", "-s", "0"]).is_err());
    }

    #[test]
    fn at_least_one_input_is_required() {
        assert!(Cli::try_parse_from(["pdf2png", "-s", "100"]).is_err());
    }

    #[test]
    fn paint_is_a_no_op_without_a_terminal() {
        assert_eq!(paint("32", "ok", false), "ok");
        assert_eq!(paint("32", "ok", true), "\x1b[32mok\x1b[0m");
    }

    fn placed(png: &str, dimensions: &str) -> ConversionResult {
        ConversionResult {
            output_path: Some(PathBuf::from(png)),
            dimensions: dimensions.to_string(),
            ..Default::default()
        }
    }

    fn batch(total: usize, failed: usize) -> BatchReport {
        BatchReport {
            files: Vec::new(),
            stats: pdf2png::BatchStats {
                total_files: total,
                converted_files: total - failed,
                failed_files: failed,
                ..Default::default()
            },
        }
    }

    #[test]
    fn skip_and_header_lines() {
        assert_eq!(
            skip_line(Path::new("notes.txt"), SkipReason::NotPdf),
            "Skipping: notes.txt (not a PDF file or directory)"
        );
        assert_eq!(
            skip_line(Path::new("ghost.pdf"), SkipReason::NotFound),
            "Skipping: ghost.pdf (not a PDF file or directory)"
        );
        assert_eq!(
            batch_start_line(2, 3000),
            "Found 2 PDF(s) to convert (max size: 3000px)\n"
        );
        assert_eq!(NO_PDFS_FOUND, "No PDF files found.");
    }

    #[test]
    fn success_line_plain_and_coloured() {
        let result = placed("out/fig.png", "pixelWidth: 3000  pixelHeight: 2250");
        let line = format!(
            "{}{}",
            file_prefix(Path::new("Figures/fig.pdf")),
            success_line(&result, false)
        );
        assert_eq!(line, "  fig.pdf -> fig.png  (pixelWidth: 3000  pixelHeight: 2250)");

        assert_eq!(
            success_line(&result, true),
            "\x1b[32mfig.png\x1b[0m  (\x1b[2mpixelWidth: 3000  pixelHeight: 2250\x1b[0m)"
        );
    }

    #[test]
    fn empty_dimensions_still_print_parentheses() {
        assert_eq!(success_line(&placed("fig.png", ""), false), "fig.png  ()");
    }

    #[test]
    fn error_line_carries_the_message() {
        let error = FileError::OutputMissing {
            expected: PathBuf::from("/tmp/w/fig.pdf.png"),
        };
        let plain = error_line(&error, false);
        assert_eq!(plain, format!("  ERROR: {error}"));
        assert!(error_line(&error, true).starts_with("  \x1b[31mERROR:\x1b[0m "));
    }

    #[test]
    fn summary_line_counts_failures() {
        assert_eq!(summary_line(3, 3, false), "\nDone.");
        assert_eq!(summary_line(3, 3, true), "\nDone.");
        assert_eq!(
            summary_line(3, 1, false),
            "\nDone. 2 of 3 conversion(s) failed."
        );
        assert_eq!(
            summary_line(3, 1, true),
            "\nDone. \x1b[31m2\x1b[0m of 3 conversion(s) failed."
        );
    }

    #[test]
    fn strict_mode_maps_partial_failure_to_exit_two() {
        assert_eq!(exit_status(batch(3, 1), false).unwrap(), 0);
        assert_eq!(exit_status(batch(3, 1), true).unwrap(), EXIT_PARTIAL_FAILURE);
        assert_eq!(exit_status(batch(3, 0), true).unwrap(), 0);
    }
}
