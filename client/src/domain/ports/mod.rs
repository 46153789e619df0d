//! Domain ports for the hexagonal boundary.
//!
//! Capabilities the domain needs from the outside world are declared here and
//! injected explicitly; nothing is discovered from ambient global state.

mod macros;
pub(crate) use macros::define_port_error;

mod heat_renderer;
mod location_list_view;
mod location_source;
mod map_widget;

#[cfg(test)]
pub use heat_renderer::{MockHeatRenderer, MockHeatRendererFactory};
pub use heat_renderer::{HeatRenderer, HeatRendererError, HeatRendererFactory, RendererConfig};
#[cfg(test)]
pub use location_list_view::MockLocationListView;
pub use location_list_view::{LocationListView, LocationListViewError};
#[cfg(test)]
pub use location_source::MockLocationSource;
pub use location_source::{FixtureLocationSource, LocationSource, LocationSourceError};
#[cfg(test)]
pub use map_widget::MockMapWidget;
pub use map_widget::{LayerId, MapNavigator, MapWidget};
