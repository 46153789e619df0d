//! In-memory interactive map adapter.
//!
//! `InMemoryMap` models a slippy map viewport the way browser tile maps do:
//! a pixel origin fixed at the last view reset, a map pane offset that
//! accumulates while panning, and an overlay pane holding drawing surfaces.
//! It implements both [`MapWidget`] and [`MapNavigator`]; every navigation
//! call returns the move-end listeners the host must notify.

mod projection;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::domain::ports::{LayerId, MapNavigator, MapWidget};
use crate::domain::{DrawingSurface, LatLng, LatLngBounds, Point, Size, SurfaceId};

/// Initial viewport of an [`InMemoryMap`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    /// Geographic centre.
    pub center: LatLng,
    /// Zoom level; fractional values are allowed.
    pub zoom: f64,
    /// Viewport size in pixels.
    pub size: Size,
}

#[derive(Debug)]
struct MapState {
    zoom: f64,
    size: Size,
    pixel_origin: Point,
    pane: Point,
    overlays: BTreeMap<SurfaceId, Vec<(String, String)>>,
    listeners: Vec<LayerId>,
}

impl MapState {
    fn reset_view(&mut self, center: LatLng) {
        self.pane = Point::ORIGIN;
        self.pixel_origin = projection::project(center, self.zoom)
            .subtract(self.size.centre())
            .round();
    }

    fn layer_point_to_lat_lng(&self, point: Point) -> LatLng {
        projection::unproject(point.add(self.pixel_origin), self.zoom)
    }

    fn container_point_to_lat_lng(&self, point: Point) -> LatLng {
        self.layer_point_to_lat_lng(point.subtract(self.pane))
    }

    fn center(&self) -> LatLng {
        self.container_point_to_lat_lng(self.size.centre())
    }
}

/// Map widget held entirely in memory.
///
/// # Examples
/// ```
/// use client::domain::ports::{MapNavigator, MapWidget};
/// use client::domain::{LatLng, Point, Size};
/// use client::outbound::map::{InMemoryMap, MapView};
///
/// let map = InMemoryMap::new(MapView {
///     center: LatLng::new(0.0, 0.0),
///     zoom: 0.0,
///     size: Size::new(256, 256),
/// });
/// assert_eq!(map.lat_lng_to_container_point(LatLng::new(0.0, 0.0)), Point::new(128.0, 128.0));
/// map.pan_by(Point::new(10.0, 0.0));
/// assert_eq!(map.map_pane_position(), Point::new(-10.0, 0.0));
/// ```
#[derive(Debug)]
pub struct InMemoryMap {
    state: Mutex<MapState>,
    style_properties: Vec<String>,
}

impl InMemoryMap {
    /// Create a map showing `view`, understanding only the standard
    /// `transform` style property.
    #[must_use]
    pub fn new(view: MapView) -> Self {
        Self::with_style_properties(view, ["transform"])
    }

    /// Create a map whose host understands exactly `properties`.
    #[must_use]
    pub fn with_style_properties<I, P>(view: MapView, properties: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let mut state = MapState {
            zoom: view.zoom,
            size: view.size,
            pixel_origin: Point::ORIGIN,
            pane: Point::ORIGIN,
            overlays: BTreeMap::new(),
            listeners: Vec::new(),
        };
        state.reset_view(view.center);
        Self {
            state: Mutex::new(state),
            style_properties: properties.into_iter().map(Into::into).collect(),
        }
    }

    fn state(&self) -> MutexGuard<'_, MapState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Geographic coordinate at the viewport centre.
    #[must_use]
    pub fn center(&self) -> LatLng {
        self.state().center()
    }

    /// Absolute pixel position of the layer origin.
    #[must_use]
    pub fn pixel_origin(&self) -> Point {
        self.state().pixel_origin
    }

    /// Surfaces currently in the overlay pane.
    #[must_use]
    pub fn overlays(&self) -> Vec<SurfaceId> {
        self.state().overlays.keys().copied().collect()
    }

    /// Last inline style applied to `surface`.
    #[must_use]
    pub fn overlay_style(&self, surface: SurfaceId) -> Option<Vec<(String, String)>> {
        self.state().overlays.get(&surface).cloned()
    }

    /// Layers registered for move-end notifications, in registration order.
    #[must_use]
    pub fn move_end_listeners(&self) -> Vec<LayerId> {
        self.state().listeners.clone()
    }
}

impl MapWidget for InMemoryMap {
    fn size(&self) -> Size {
        self.state().size
    }

    fn bounds(&self) -> LatLngBounds {
        let state = self.state();
        let size = state.size;
        let north_west = state.container_point_to_lat_lng(Point::ORIGIN);
        let south_east = state.container_point_to_lat_lng(Point::new(
            f64::from(size.width),
            f64::from(size.height),
        ));
        LatLngBounds::from_corners(north_west, south_east)
    }

    fn zoom(&self) -> f64 {
        self.state().zoom
    }

    fn layer_point_to_lat_lng(&self, point: Point) -> LatLng {
        self.state().layer_point_to_lat_lng(point)
    }

    fn lat_lng_to_container_point(&self, lat_lng: LatLng) -> Point {
        let state = self.state();
        projection::project(lat_lng, state.zoom)
            .subtract(state.pixel_origin)
            .add(state.pane)
    }

    fn map_pane_position(&self) -> Point {
        self.state().pane
    }

    fn insert_overlay(&self, surface: &DrawingSurface) {
        self.state()
            .overlays
            .insert(surface.id(), surface.style_declarations());
    }

    fn remove_overlay(&self, surface: SurfaceId) {
        self.state().overlays.remove(&surface);
    }

    fn style_overlay(&self, surface: &DrawingSurface) {
        if let Some(style) = self.state().overlays.get_mut(&surface.id()) {
            *style = surface.style_declarations();
        }
    }

    fn on_move_end(&self, layer: LayerId) {
        let mut state = self.state();
        if !state.listeners.contains(&layer) {
            state.listeners.push(layer);
        }
    }

    fn off_move_end(&self, layer: LayerId) {
        self.state().listeners.retain(|listener| *listener != layer);
    }

    fn supports_style_property(&self, property: &str) -> bool {
        self.style_properties.iter().any(|known| known == property)
    }
}

impl MapNavigator for InMemoryMap {
    fn pan_by(&self, offset: Point) -> Vec<LayerId> {
        let mut state = self.state();
        state.pane = state.pane.subtract(offset);
        debug!(x = state.pane.x, y = state.pane.y, "map panned");
        state.listeners.clone()
    }

    fn set_zoom(&self, zoom: f64) -> Vec<LayerId> {
        let mut state = self.state();
        let center = state.center();
        state.zoom = zoom;
        state.reset_view(center);
        debug!(zoom, "map zoomed");
        state.listeners.clone()
    }

    fn resize(&self, size: Size) -> Vec<LayerId> {
        let mut state = self.state();
        let center = state.center();
        state.size = size;
        state.reset_view(center);
        debug!(width = size.width, height = size.height, "map resized");
        state.listeners.clone()
    }
}
