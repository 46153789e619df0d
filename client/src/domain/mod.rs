//! Domain primitives and services for the heat map page.
//!
//! Purpose: hold the pure parts of the page (the location filter, the heat
//! overlay state machine and the search page service) behind ports that
//! adapters implement. Nothing in this module performs I/O directly.
//!
//! Public surface:
//! - `filter_locations` and `render_location_list`: search results.
//! - `HeatmapOverlay`: geo heat overlay adapter driven by a `MapWidget`.
//! - `LocationSearchPage`: fetch-once, filter-per-keystroke page service.

mod geo;
mod heat;
mod location;
mod location_list;
mod location_search;
pub mod overlay;
pub mod ports;

pub use self::geo::{LatLng, LatLngBounds, Point, Size};
pub use self::heat::{
    FieldNames, GeoPoint, HeatFrame, HeatRecord, IntensityRange, ProjectedPoint, RADIUS_FIELD,
};
pub use self::location::{LocationRecord, filter_locations};
pub use self::location_list::render_location_list;
pub use self::location_search::LocationSearchPage;
pub use self::overlay::{
    CssTransformProperty, DEFAULT_MAX_OPACITY, DEFAULT_RADIUS, DrawingSurface, HeatmapOverlay,
    OverlayConfig, OverlayConfigBuilder, OverlayError, SurfaceId,
};
