//! Driven port for the interactive tile map an overlay is drawn on.
//!
//! The overlay borrows the map for as long as it is attached. It reads the
//! viewport through this port, parks its drawing surface in the map's overlay
//! pane, and registers for "view settled" notifications. Delivering those
//! notifications is the host's job: map adapters report which listeners to
//! notify and the host calls back into the matching overlay, one redraw per
//! event.

use std::fmt;

use uuid::Uuid;

use crate::domain::geo::{LatLng, LatLngBounds, Point, Size};
use crate::domain::overlay::{DrawingSurface, SurfaceId};

/// Identifier a layer registers view-change listeners under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(Uuid);

impl LayerId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Read and attachment surface of an interactive map.
#[cfg_attr(test, mockall::automock)]
pub trait MapWidget: Send + Sync {
    /// Viewport size in pixels.
    fn size(&self) -> Size;

    /// Geographic bounds of the visible viewport.
    fn bounds(&self) -> LatLngBounds;

    /// Current zoom level.
    fn zoom(&self) -> f64;

    /// Convert a layer point (relative to the pixel origin) to a coordinate.
    fn layer_point_to_lat_lng(&self, point: Point) -> LatLng;

    /// Convert a coordinate to a container point (relative to the viewport).
    fn lat_lng_to_container_point(&self, lat_lng: LatLng) -> Point;

    /// Current offset of the map pane produced by panning.
    fn map_pane_position(&self) -> Point;

    /// Insert a surface into the overlay pane.
    fn insert_overlay(&self, surface: &DrawingSurface);

    /// Remove a surface from the overlay pane. Unknown ids are ignored.
    fn remove_overlay(&self, surface: SurfaceId);

    /// Apply the surface's current inline style.
    fn style_overlay(&self, surface: &DrawingSurface);

    /// Register `layer` for view-settled notifications.
    fn on_move_end(&self, layer: LayerId);

    /// Unregister `layer`. Unknown ids are ignored.
    fn off_move_end(&self, layer: LayerId);

    /// Return whether the host understands the inline style `property`.
    fn supports_style_property(&self, property: &str) -> bool {
        property == "transform"
    }
}

/// Navigation surface of a map that reports settled-view notifications.
///
/// Each call returns the layers registered for move-end at the time the view
/// settled; the host forwards the notification to each of them.
pub trait MapNavigator: Send + Sync {
    /// Pan the view by a pixel offset.
    fn pan_by(&self, offset: Point) -> Vec<LayerId>;

    /// Change the zoom level, keeping the centre.
    fn set_zoom(&self, zoom: f64) -> Vec<LayerId>;

    /// Change the viewport size, keeping the centre.
    fn resize(&self, size: Size) -> Vec<LayerId>;
}
