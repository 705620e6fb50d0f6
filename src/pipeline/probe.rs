//! Dimension probe: best-effort pixel size of a rendered PNG.
//!
//! The result is only ever shown to the user, so a probe never fails: a
//! missing program, a non-zero exit or unrecognised output all degrade to
//! an empty [`Dimensions`].

use crate::pipeline::tool::ToolCommand;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::Path;
use tracing::debug;

/// What a probe learned about an image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dimensions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Display text, e.g. `pixelWidth: 2400  pixelHeight: 1800`.
    pub text: String,
}

impl Dimensions {
    /// Build from known width and height, formatted like `sips` output.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            text: format!("pixelWidth: {width}  pixelHeight: {height}"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Reports the pixel width and height of an image.
#[async_trait]
pub trait DimensionProbe: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &str;

    async fn probe(&self, png: &Path) -> Dimensions;
}

/// Extract the `pixelWidth`/`pixelHeight` lines from `sips` output.
///
/// Matching lines are trimmed and joined with two spaces. Numeric values
/// after the last `:` are parsed when present.
pub fn parse_sips_output(stdout: &str) -> Dimensions {
    let mut dims = Dimensions::default();
    let mut parts: Vec<&str> = Vec::new();

    for line in stdout.lines() {
        let is_width = line.contains("pixelWidth");
        let is_height = line.contains("pixelHeight");
        if !is_width && !is_height {
            continue;
        }
        let line = line.trim();
        parts.push(line);

        let value = line
            .rsplit_once(':')
            .and_then(|(_, v)| v.trim().parse::<u32>().ok());
        if is_width {
            dims.width = value;
        } else {
            dims.height = value;
        }
    }

    dims.text = parts.join("  ");
    dims
}

// ── sips ─────────────────────────────────────────────────────────────────

/// macOS `sips --getProperty pixelWidth --getProperty pixelHeight <png>`.
#[derive(Debug, Clone)]
pub struct SipsProbe {
    tool: ToolCommand,
}

impl Default for SipsProbe {
    fn default() -> Self {
        Self {
            tool: ToolCommand::new("sips"),
        }
    }
}

impl SipsProbe {
    /// Use a different program (or wrapper) in place of `sips`.
    pub fn with_command(tool: ToolCommand) -> Self {
        Self { tool }
    }
}

#[async_trait]
impl DimensionProbe for SipsProbe {
    fn name(&self) -> &str {
        "sips"
    }

    async fn probe(&self, png: &Path) -> Dimensions {
        let args = [
            OsStr::new("--getProperty"),
            OsStr::new("pixelWidth"),
            OsStr::new("--getProperty"),
            OsStr::new("pixelHeight"),
            png.as_os_str(),
        ];
        match self.tool.output(args).await {
            Ok(out) if out.status.success() => {
                parse_sips_output(&String::from_utf8_lossy(&out.stdout))
            }
            Ok(out) => {
                debug!("{} exited with {}", self.tool.display_name(), out.status);
                Dimensions::default()
            }
            Err(e) => {
                debug!("{} could not be started: {}", self.tool.display_name(), e);
                Dimensions::default()
            }
        }
    }
}

// ── PNG header ───────────────────────────────────────────────────────────

/// Reads the size from the image header in-process via the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageHeaderProbe;

#[async_trait]
impl DimensionProbe for ImageHeaderProbe {
    fn name(&self) -> &str {
        "png-header"
    }

    async fn probe(&self, png: &Path) -> Dimensions {
        let path = png.to_path_buf();
        let result = tokio::task::spawn_blocking(move || image::image_dimensions(&path)).await;
        match result {
            Ok(Ok((w, h))) => Dimensions::from_size(w, h),
            Ok(Err(e)) => {
                debug!("Cannot read image header of {}: {}", png.display(), e);
                Dimensions::default()
            }
            Err(e) => {
                debug!("Header probe task panicked: {}", e);
                Dimensions::default()
            }
        }
    }
}
