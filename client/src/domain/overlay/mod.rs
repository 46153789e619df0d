//! Heat overlay adapter bridging a density renderer to an interactive map.
//!
//! The overlay owns its heat points and one rendering-engine instance. While
//! attached it borrows a [`MapWidget`], and every redraw re-projects the
//! visible points into container pixels before handing the frame to the
//! renderer. Pure panning is absorbed by translating the drawing surface
//! against the map pane offset.
//!
//! Lifecycle: `Detached` → [`HeatmapOverlay::attach`] → `Attached` →
//! [`HeatmapOverlay::detach`] → `Detached`. Data may be replaced or appended
//! in either state; drawing only happens while attached.

mod config;
mod error;
mod surface;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_MAX_OPACITY, DEFAULT_RADIUS, OverlayConfig, OverlayConfigBuilder};
pub use error::OverlayError;
pub use surface::{CssTransformProperty, DrawingSurface, SURFACE_CLASS, SurfaceId};

use std::sync::Arc;

use tracing::debug;

use crate::domain::geo::{LatLng, Point, Size};
use crate::domain::heat::{GeoPoint, HeatFrame, HeatRecord, IntensityRange, ProjectedPoint};
use crate::domain::ports::{HeatRenderer, HeatRendererFactory, LayerId, MapWidget, RendererConfig};

enum OverlayState {
    Detached,
    Attached(AttachedView),
}

struct AttachedView {
    map: Arc<dyn MapWidget>,
    origin: LatLng,
    size: Size,
}

/// A heat layer drawn on top of an interactive map.
///
/// # Examples
/// ```rust,ignore
/// use std::sync::Arc;
///
/// use client::domain::{HeatRecord, HeatmapOverlay, OverlayConfig};
///
/// let mut overlay = HeatmapOverlay::new(OverlayConfig::default(), Arc::new(factory));
/// overlay.attach(map.clone())?;
/// overlay.set_data(&[HeatRecord::new().with("lat", 24.64).with("lng", 46.77).with("value", 3)], Some(8.0), None)?;
/// ```
pub struct HeatmapOverlay<F> {
    id: LayerId,
    config: OverlayConfig,
    factory: Arc<F>,
    surface: DrawingSurface,
    transform_detected: bool,
    renderer: Option<Box<dyn HeatRenderer>>,
    points: Vec<GeoPoint>,
    range: IntensityRange,
    state: OverlayState,
}

impl<F> HeatmapOverlay<F> {
    /// Create a detached overlay. The renderer is built on first attach.
    #[must_use]
    pub fn new(config: OverlayConfig, factory: Arc<F>) -> Self {
        Self {
            id: LayerId::random(),
            config,
            factory,
            surface: DrawingSurface::new(),
            transform_detected: false,
            renderer: None,
            points: Vec::new(),
            range: IntensityRange::INITIAL,
            state: OverlayState::Detached,
        }
    }

    /// Identifier the overlay registers map listeners under.
    #[must_use]
    pub const fn id(&self) -> LayerId {
        self.id
    }

    /// Configuration the overlay was built with.
    #[must_use]
    pub const fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Whether the overlay is currently on a map.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        matches!(self.state, OverlayState::Attached(_))
    }

    /// Geographic position of the top-left layer point, while attached.
    #[must_use]
    pub fn origin(&self) -> Option<LatLng> {
        match &self.state {
            OverlayState::Attached(view) => Some(view.origin),
            OverlayState::Detached => None,
        }
    }

    /// Last known viewport size, while attached.
    #[must_use]
    pub fn viewport_size(&self) -> Option<Size> {
        match &self.state {
            OverlayState::Attached(view) => Some(view.size),
            OverlayState::Detached => None,
        }
    }

    /// Tracked intensity range used when local extrema are disabled.
    #[must_use]
    pub const fn tracked_range(&self) -> IntensityRange {
        self.range
    }

    /// Stored points in insertion order.
    #[must_use]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// The overlay's drawing surface.
    #[must_use]
    pub const fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    /// Whether the rendering engine has been created.
    #[must_use]
    pub const fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }
}

impl<F> HeatmapOverlay<F>
where
    F: HeatRendererFactory,
{
    /// Bind the overlay to `map` and draw.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::AlreadyAttached`] when already on a map, or
    /// [`OverlayError::Renderer`] when the engine cannot be created or
    /// rejects the first frame.
    pub fn attach(&mut self, map: Arc<dyn MapWidget>) -> Result<(), OverlayError> {
        if self.is_attached() {
            return Err(OverlayError::AlreadyAttached { layer: self.id });
        }

        let size = map.size();
        match self.renderer.as_mut() {
            Some(renderer) if self.surface.size() != size => renderer.set_dimensions(size)?,
            Some(_) => {}
            None => {
                let config = RendererConfig {
                    container: self.surface.id(),
                    size,
                    radius: self.config.radius(),
                    max_opacity: self.config.max_opacity(),
                };
                self.renderer = Some(self.factory.create(&config)?);
            }
        }
        // Committed only once the renderer has accepted the size.
        self.surface.resize(size);
        if !self.transform_detected {
            let property = CssTransformProperty::detect(|name| map.supports_style_property(name));
            self.surface.use_transform_property(property);
            self.transform_detected = true;
        }
        let origin = map.layer_point_to_lat_lng(Point::ORIGIN);

        map.insert_overlay(&self.surface);
        map.on_move_end(self.id);
        debug!(
            layer = %self.id,
            width = size.width,
            height = size.height,
            "heat overlay attached"
        );
        self.state = OverlayState::Attached(AttachedView { map, origin, size });
        self.draw()
    }

    /// Unbind from the current map. Does nothing when detached.
    pub fn detach(&mut self) {
        let OverlayState::Attached(view) = std::mem::replace(&mut self.state, OverlayState::Detached)
        else {
            return;
        };
        view.map.remove_overlay(self.surface.id());
        view.map.off_move_end(self.id);
        debug!(layer = %self.id, "heat overlay detached");
    }

    /// Replace every point and redraw.
    ///
    /// `max` and `min` replace the tracked range only when supplied.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Renderer`] when the engine rejects the frame.
    pub fn set_data(
        &mut self,
        records: &[HeatRecord],
        max: Option<f64>,
        min: Option<f64>,
    ) -> Result<(), OverlayError> {
        if let Some(max) = max {
            self.range.max = max;
        }
        if let Some(min) = min {
            self.range.min = min;
        }
        let fields = self.config.field_names();
        self.points = records
            .iter()
            .map(|record| GeoPoint::decode(record, fields))
            .collect();
        self.draw()
    }

    /// Append one point, widen the tracked range to cover it and redraw.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Renderer`] when the engine rejects the frame.
    pub fn add_point(&mut self, record: &HeatRecord) -> Result<(), OverlayError> {
        let point = GeoPoint::decode(record, self.config.field_names());
        self.range = self.range.widened(point.weight);
        self.points.push(point);
        self.draw()
    }

    /// Append each record in order, redrawing after every addition.
    ///
    /// # Errors
    ///
    /// Stops at the first [`OverlayError::Renderer`] failure; points added
    /// before it are kept.
    pub fn add_points(&mut self, records: &[HeatRecord]) -> Result<(), OverlayError> {
        records
            .iter()
            .try_for_each(|record| self.add_point(record))
    }

    /// React to the map's view-settled notification.
    ///
    /// Recomputes the origin, resizes the surface and renderer when the
    /// viewport changed, then redraws. Returns `false` without doing anything
    /// when detached.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Renderer`] when the engine rejects the resize
    /// or the frame.
    pub fn handle_move_end(&mut self) -> Result<bool, OverlayError> {
        let OverlayState::Attached(view) = &mut self.state else {
            return Ok(false);
        };
        view.origin = view.map.layer_point_to_lat_lng(Point::ORIGIN);
        let size = view.map.size();
        if size != view.size {
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.set_dimensions(size)?;
            }
            view.size = size;
            self.surface.resize(size);
            debug!(
                layer = %self.id,
                width = size.width,
                height = size.height,
                "heat overlay resized"
            );
        }
        self.draw()?;
        Ok(true)
    }

    fn draw(&mut self) -> Result<(), OverlayError> {
        let OverlayState::Attached(view) = &self.state else {
            return Ok(());
        };
        let pane = view.map.map_pane_position();
        self.surface
            .translate(-round_pixel(pane.x), -round_pixel(pane.y));
        view.map.style_overlay(&self.surface);

        let frame = self.build_frame(view.map.as_ref());
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_data(&frame)?;
        }
        debug!(
            layer = %self.id,
            points = frame.data.len(),
            max = frame.max,
            min = frame.min,
            "heat overlay redrawn"
        );
        Ok(())
    }

    fn build_frame(&self, map: &dyn MapWidget) -> HeatFrame {
        if self.points.is_empty() {
            return HeatFrame::empty(self.range);
        }

        let bounds = map.bounds();
        let multiplier = if self.config.scale_radius() {
            2_f64.powf(map.zoom())
        } else {
            1.0
        };

        let mut local = IntensityRange::LOCAL_FLOOR;
        let mut data = Vec::with_capacity(self.points.len());
        for point in &self.points {
            if !bounds.contains(point.lat_lng) {
                continue;
            }
            local = local.widened(point.weight);
            let pixel = map.lat_lng_to_container_point(point.lat_lng);
            data.push(ProjectedPoint {
                x: round_pixel(pixel.x),
                y: round_pixel(pixel.y),
                value: point.weight,
                radius: point.radius.unwrap_or(self.config.radius()) * multiplier,
            });
        }

        let range = if self.config.use_local_extrema() {
            local
        } else {
            self.range
        };
        HeatFrame {
            max: range.max,
            min: range.min,
            data,
        }
    }
}

/// Round half-way values towards positive infinity, as browsers do.
fn round_pixel(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
