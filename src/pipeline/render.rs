//! PDF rasterisation through an external thumbnail renderer.
//!
//! Rendering is delegated entirely to a platform program. Every backend
//! follows the same naming contract: rendering `fig.pdf` into `work_dir`
//! produces `work_dir/fig.pdf.png`. That is what Quick Look does natively,
//! and the Poppler backend asks `pdftoppm` for the same name, so nothing
//! downstream needs to know which backend ran.

use crate::error::FileError;
use crate::pipeline::tool::{stderr_text, ToolCommand};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Produces a PNG preview of a PDF, bounded by a maximum dimension.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Short backend name used in logs and messages.
    fn name(&self) -> &str;

    /// Render `source` into `work_dir` with its longest edge at most
    /// `max_dimension` pixels.
    ///
    /// On success the PNG is expected at [`expected_png`]; callers verify
    /// that, since some renderers exit 0 without writing anything.
    async fn render(
        &self,
        source: &Path,
        max_dimension: u32,
        work_dir: &Path,
    ) -> Result<(), FileError>;
}

/// Where a renderer leaves its output: `<work_dir>/<source file name>.png`.
pub fn expected_png(work_dir: &Path, source: &Path) -> PathBuf {
    let mut name: OsString = source
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".png");
    work_dir.join(name)
}

/// Run `tool` and map a spawn failure or non-zero exit to [`FileError`].
async fn run_renderer(
    tool: &ToolCommand,
    source: &Path,
    args: Vec<OsString>,
) -> Result<(), FileError> {
    let output = tool.output(args).await.map_err(|e| FileError::Spawn {
        program: tool.display_name(),
        source: e,
    })?;

    if !output.status.success() {
        return Err(FileError::RenderFailed {
            program: tool.display_name(),
            file: source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| source.display().to_string()),
            status: output.status.to_string(),
            stderr: stderr_text(&output),
        });
    }
    Ok(())
}

// ── Quick Look ───────────────────────────────────────────────────────────

/// macOS Quick Look: `qlmanage -t -s <size> -o <dir> <pdf>`.
#[derive(Debug, Clone)]
pub struct QuickLookRenderer {
    tool: ToolCommand,
}

impl Default for QuickLookRenderer {
    fn default() -> Self {
        Self {
            tool: ToolCommand::new("qlmanage"),
        }
    }
}

impl QuickLookRenderer {
    /// Use a different program (or wrapper) in place of `qlmanage`.
    pub fn with_command(tool: ToolCommand) -> Self {
        Self { tool }
    }
}

#[async_trait]
impl Renderer for QuickLookRenderer {
    fn name(&self) -> &str {
        "qlmanage"
    }

    async fn render(
        &self,
        source: &Path,
        max_dimension: u32,
        work_dir: &Path,
    ) -> Result<(), FileError> {
        debug!(
            "Quick Look thumbnail of {} at {}px",
            source.display(),
            max_dimension
        );
        let args: Vec<OsString> = vec![
            "-t".into(),
            "-s".into(),
            max_dimension.to_string().into(),
            "-o".into(),
            work_dir.as_os_str().to_os_string(),
            source.as_os_str().to_os_string(),
        ];
        run_renderer(&self.tool, source, args).await
    }
}

// ── Poppler ──────────────────────────────────────────────────────────────

/// Poppler: `pdftoppm -png -singlefile -scale-to <size> <pdf> <dir>/<name>`.
///
/// Only the first page is rendered, matching a thumbnail.
#[derive(Debug, Clone)]
pub struct PopplerRenderer {
    tool: ToolCommand,
}

impl Default for PopplerRenderer {
    fn default() -> Self {
        Self {
            tool: ToolCommand::new("pdftoppm"),
        }
    }
}

impl PopplerRenderer {
    /// Use a different program (or wrapper) in place of `pdftoppm`.
    pub fn with_command(tool: ToolCommand) -> Self {
        Self { tool }
    }
}

#[async_trait]
impl Renderer for PopplerRenderer {
    fn name(&self) -> &str {
        "pdftoppm"
    }

    async fn render(
        &self,
        source: &Path,
        max_dimension: u32,
        work_dir: &Path,
    ) -> Result<(), FileError> {
        // pdftoppm appends ".png" to the prefix itself.
        let prefix = expected_png(work_dir, source).with_extension("");
        debug!(
            "pdftoppm render of {} at {}px into {}",
            source.display(),
            max_dimension,
            prefix.display()
        );
        let args: Vec<OsString> = vec![
            "-png".into(),
            "-singlefile".into(),
            "-scale-to".into(),
            max_dimension.to_string().into(),
            source.as_os_str().to_os_string(),
            prefix.into_os_string(),
        ];
        run_renderer(&self.tool, source, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn expected_png_keeps_the_pdf_suffix() {
        let p = expected_png(Path::new("/tmp/w"), Path::new("Figures/fig.pdf"));
        assert_eq!(p, PathBuf::from("/tmp/w/fig.pdf.png"));
        let p = expected_png(Path::new("/tmp/w"), Path::new("b.PDF"));
        assert_eq!(p, PathBuf::from("/tmp/w/b.PDF.png"));
    }

    #[test]
    fn poppler_prefix_round_trips_to_expected_name() {
        let prefix = expected_png(Path::new("/w"), Path::new("fig.v2.pdf")).with_extension("");
        assert_eq!(prefix, PathBuf::from("/w/fig.v2.pdf"));
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let work = TempDir::new().unwrap();
        let r = QuickLookRenderer::with_command(ToolCommand::new("qlmanage-not-installed-here"));
        let err = r
            .render(Path::new("fig.pdf"), 100, work.path())
            .await
            .unwrap_err();
        assert!(matches!(err, FileError::Spawn { .. }), "got: {err:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn quicklook_arguments_follow_qlmanage_layout() {
        let work = TempDir::new().unwrap();
        // $0 is the script name; qlmanage args start at $1.
        let fake = ToolCommand::new("sh")
            .arg("-c")
            .arg(r#"printf '%s %s %s' "$1" "$2" "$3" > "$5/$(basename "$6").png""#)
            .arg("qlmanage");
        let r = QuickLookRenderer::with_command(fake);
        r.render(Path::new("/figs/fig.pdf"), 3000, work.path())
            .await
            .unwrap();

        let written = std::fs::read_to_string(work.path().join("fig.pdf.png")).unwrap();
        assert_eq!(written, "-t -s 3000");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn poppler_writes_the_shared_output_name() {
        let work = TempDir::new().unwrap();
        let fake = ToolCommand::new("sh")
            .arg("-c")
            .arg(r#"printf '%s' "$4" > "$6.png""#)
            .arg("pdftoppm");
        let r = PopplerRenderer::with_command(fake);
        let source = Path::new("/figs/fig.pdf");
        r.render(source, 1200, work.path()).await.unwrap();

        let written = std::fs::read_to_string(expected_png(work.path(), source)).unwrap();
        assert_eq!(written, "1200");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_reports_stderr() {
        let work = TempDir::new().unwrap();
        let fake = ToolCommand::new("sh")
            .arg("-c")
            .arg("echo 'cannot open file' >&2; exit 1")
            .arg("qlmanage");
        let r = QuickLookRenderer::with_command(fake);
        let err = r
            .render(Path::new("/figs/broken.pdf"), 2400, work.path())
            .await
            .unwrap_err();
        match err {
            FileError::RenderFailed { file, stderr, .. } => {
                assert_eq!(file, "broken.pdf");
                assert_eq!(stderr, "cannot open file");
            }
            other => panic!("expected RenderFailed, got {other:?}"),
        }
    }
}
