//! Density renderer adapters.
//!
//! The text renderer rasterises heat frames onto a character grid shared
//! through a [`TextCanvas`], so binaries and tests can read back what was
//! drawn.

mod text;

use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::domain::Size;
use crate::domain::ports::{HeatRenderer, HeatRendererError, HeatRendererFactory, RendererConfig};

pub use text::{GLYPH_RAMP, TextHeatRenderer};

/// Shared handle to the most recently rendered heat image.
#[derive(Debug, Clone, Default)]
pub struct TextCanvas(Arc<Mutex<String>>);

impl TextCanvas {
    /// Create a blank canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current image.
    #[must_use]
    pub fn snapshot(&self) -> String {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn replace(&self, image: String) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = image;
    }
}

/// Builds [`TextHeatRenderer`]s drawing into one shared canvas.
#[derive(Debug, Clone)]
pub struct TextHeatRendererFactory {
    canvas: TextCanvas,
    cell: Size,
}

impl TextHeatRendererFactory {
    /// Default pixel footprint of one character cell.
    pub const DEFAULT_CELL: Size = Size::new(8, 16);

    /// Draw into `canvas`, one character per `cell` pixels.
    #[must_use]
    pub const fn new(canvas: TextCanvas, cell: Size) -> Self {
        Self { canvas, cell }
    }
}

impl HeatRendererFactory for TextHeatRendererFactory {
    fn create(&self, config: &RendererConfig) -> Result<Box<dyn HeatRenderer>, HeatRendererError> {
        if self.cell.width == 0 || self.cell.height == 0 {
            return Err(HeatRendererError::construction(format!(
                "character cell must be at least 1x1 px, got {}x{}",
                self.cell.width, self.cell.height
            )));
        }
        debug!(
            container = %config.container,
            width = config.size.width,
            height = config.size.height,
            "text heat renderer created"
        );
        Ok(Box::new(TextHeatRenderer::new(
            self.canvas.clone(),
            self.cell,
            config,
        )))
    }
}
