//! Character-grid density renderer.

use tracing::debug;

use super::TextCanvas;
use crate::domain::ports::{HeatRenderer, HeatRendererError, RendererConfig};
use crate::domain::{HeatFrame, ProjectedPoint, Size};

/// Glyphs from coldest to hottest.
pub const GLYPH_RAMP: &[u8] = b" .:-=+*#%@";

/// Renderer drawing heat frames as bordered text.
///
/// Each character cell samples the heat at its centre. A point contributes
/// its normalised weight, fading linearly to zero at its radius, and
/// overlapping contributions are composited the way translucent strokes
/// stack. `max_opacity` caps the hottest reachable glyph.
#[derive(Debug)]
pub struct TextHeatRenderer {
    canvas: TextCanvas,
    cell: Size,
    size: Size,
    max_opacity: f64,
}

impl TextHeatRenderer {
    pub(super) fn new(canvas: TextCanvas, cell: Size, config: &RendererConfig) -> Self {
        Self {
            canvas,
            cell,
            size: config.size,
            max_opacity: config.max_opacity,
        }
    }

    fn columns(&self) -> u32 {
        self.size.width.div_ceil(self.cell.width)
    }

    fn rows(&self) -> u32 {
        self.size.height.div_ceil(self.cell.height)
    }

    fn cell_centre(&self, column: u32, row: u32) -> (f64, f64) {
        let width = f64::from(self.cell.width);
        let height = f64::from(self.cell.height);
        (
            f64::from(column).mul_add(width, width / 2.0),
            f64::from(row).mul_add(height, height / 2.0),
        )
    }

    fn rasterise(&self, frame: &HeatFrame) -> String {
        let columns = self.columns();
        let border = format!("+{}+", "-".repeat(columns as usize));
        let mut lines = Vec::with_capacity(self.rows() as usize + 2);
        lines.push(border.clone());
        for row in 0..self.rows() {
            let mut line = String::with_capacity(columns as usize + 2);
            line.push('|');
            for column in 0..columns {
                let (x, y) = self.cell_centre(column, row);
                let heat = frame
                    .data
                    .iter()
                    .map(|point| contribution(point, frame, x, y))
                    .fold(0.0, |acc, alpha| alpha.mul_add(1.0 - acc, acc));
                line.push(glyph(heat * self.max_opacity));
            }
            line.push('|');
            lines.push(line);
        }
        lines.push(border);
        lines.join("\n")
    }
}

impl HeatRenderer for TextHeatRenderer {
    fn set_data(&mut self, frame: &HeatFrame) -> Result<(), HeatRendererError> {
        if !frame.max.is_finite() || !frame.min.is_finite() {
            return Err(HeatRendererError::render(format!(
                "intensity range must be finite, got [{}, {}]",
                frame.min, frame.max
            )));
        }
        self.canvas.replace(self.rasterise(frame));
        debug!(points = frame.data.len(), "text heat frame rendered");
        Ok(())
    }

    fn set_dimensions(&mut self, size: Size) -> Result<(), HeatRendererError> {
        self.size = size;
        self.canvas.replace(String::new());
        Ok(())
    }
}

/// Alpha one point adds at `(x, y)`.
///
/// A range with `max <= min` carries no contrast, so every point is drawn
/// transparent.
fn contribution(point: &ProjectedPoint, frame: &HeatFrame, x: f64, y: f64) -> f64 {
    let span = frame.max - frame.min;
    if span <= 0.0 || point.radius <= 0.0 {
        return 0.0;
    }
    let distance = (x - point.x as f64).hypot(y - point.y as f64);
    if distance >= point.radius {
        return 0.0;
    }
    let alpha = ((point.value - frame.min) / span).clamp(0.0, 1.0);
    alpha * (1.0 - distance / point.radius)
}

fn glyph(heat: f64) -> char {
    let last = GLYPH_RAMP.len() - 1;
    let index = (heat.clamp(0.0, 1.0) * last as f64).round() as usize;
    char::from(GLYPH_RAMP[index.min(last)])
}
