//! Configuration types for PDF-to-PNG conversion.
//!
//! All batch behaviour is controlled through [`ConversionConfig`], built via
//! its [`ConversionConfigBuilder`]. The CLI maps its flags onto the builder;
//! library callers set only what they care about and rely on the defaults
//! for the rest.

use crate::error::Pdf2PngError;
use crate::pipeline::probe::{DimensionProbe, ImageHeaderProbe, SipsProbe};
use crate::pipeline::render::{PopplerRenderer, QuickLookRenderer, Renderer};
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default longest edge, in pixels, requested from the renderer.
pub const DEFAULT_MAX_DIMENSION: u32 = 2400;

/// Configuration for a batch conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2png::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .max_dimension(3000)
///     .output_dir("static/images")
///     .build()
///     .unwrap();
/// assert_eq!(config.max_dimension, 3000);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Longest edge of the rendered PNG in pixels. Default: 2400.
    ///
    /// Passed straight to the renderer; the tool never resizes on its own.
    pub max_dimension: u32,

    /// Directory every PNG is written to. Default: `None`.
    ///
    /// When `None`, each PNG is written next to its PDF.
    pub output_dir: Option<PathBuf>,

    /// Which rendering backend to use. Default: [`RenderBackend::Auto`].
    pub renderer: RenderBackend,

    /// Which dimension probe to use. Default: [`ProbeBackend::Auto`].
    pub probe: ProbeBackend,

    /// Pre-constructed renderer. Takes precedence over `renderer`.
    pub custom_renderer: Option<Arc<dyn Renderer>>,

    /// Pre-constructed probe. Takes precedence over `probe`.
    pub custom_probe: Option<Arc<dyn DimensionProbe>>,

    /// Optional progress callback for per-file events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            output_dir: None,
            renderer: RenderBackend::default(),
            probe: ProbeBackend::default(),
            custom_renderer: None,
            custom_probe: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("max_dimension", &self.max_dimension)
            .field("output_dir", &self.output_dir)
            .field("renderer", &self.renderer)
            .field("probe", &self.probe)
            .field(
                "custom_renderer",
                &self.custom_renderer.as_ref().map(|r| r.name()),
            )
            .field("custom_probe", &self.custom_probe.as_ref().map(|p| p.name()))
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// The renderer this configuration selects.
    pub fn resolve_renderer(&self) -> Arc<dyn Renderer> {
        if let Some(ref r) = self.custom_renderer {
            return Arc::clone(r);
        }
        match self.renderer.resolve() {
            RenderBackend::Poppler => Arc::new(PopplerRenderer::default()),
            _ => Arc::new(QuickLookRenderer::default()),
        }
    }

    /// The dimension probe this configuration selects.
    pub fn resolve_probe(&self) -> Arc<dyn DimensionProbe> {
        if let Some(ref p) = self.custom_probe {
            return Arc::clone(p);
        }
        match self.probe.resolve() {
            ProbeBackend::Header => Arc::new(ImageHeaderProbe),
            _ => Arc::new(SipsProbe::default()),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn max_dimension(mut self, px: u32) -> Self {
        self.config.max_dimension = px;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    pub fn renderer(mut self, backend: RenderBackend) -> Self {
        self.config.renderer = backend;
        self
    }

    pub fn probe(mut self, backend: ProbeBackend) -> Self {
        self.config.probe = backend;
        self
    }

    pub fn custom_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.config.custom_renderer = Some(renderer);
        self
    }

    pub fn custom_probe(mut self, probe: Arc<dyn DimensionProbe>) -> Self {
        self.config.custom_probe = Some(probe);
        self
    }

    /// Attach a progress callback that receives per-file events.
    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2PngError> {
        if self.config.max_dimension == 0 {
            return Err(Pdf2PngError::InvalidConfig(
                "max dimension must be ≥ 1 pixel".into(),
            ));
        }
        if let Some(ref dir) = self.config.output_dir {
            if dir.as_os_str().is_empty() {
                return Err(Pdf2PngError::InvalidConfig(
                    "output directory must not be empty".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Rendering backend selection.
///
/// | Backend | Program | Platform |
/// |---------|---------|----------|
/// | `QuickLook` | `qlmanage -t` | macOS |
/// | `Poppler` | `pdftoppm -singlefile` | Linux, BSD, Windows with poppler |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderBackend {
    /// Quick Look on macOS, Poppler everywhere else. (default)
    #[default]
    Auto,
    QuickLook,
    Poppler,
}

impl RenderBackend {
    /// Collapse `Auto` into the concrete backend for this platform.
    pub fn resolve(self) -> Self {
        match self {
            RenderBackend::Auto if cfg!(target_os = "macos") => RenderBackend::QuickLook,
            RenderBackend::Auto => RenderBackend::Poppler,
            other => other,
        }
    }
}

/// Dimension probe selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeBackend {
    /// `sips` on macOS, the in-process PNG header reader elsewhere. (default)
    #[default]
    Auto,
    /// `sips --getProperty pixelWidth --getProperty pixelHeight`.
    Sips,
    /// Read the PNG header with the `image` crate.
    Header,
}

impl ProbeBackend {
    /// Collapse `Auto` into the concrete probe for this platform.
    pub fn resolve(self) -> Self {
        match self {
            ProbeBackend::Auto if cfg!(target_os = "macos") => ProbeBackend::Sips,
            ProbeBackend::Auto => ProbeBackend::Header,
            other => other,
        }
    }
}
