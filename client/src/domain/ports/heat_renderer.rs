//! Driven port for the density-rendering engine behind a heat overlay.

use crate::domain::geo::Size;
use crate::domain::heat::HeatFrame;
use crate::domain::overlay::SurfaceId;

use super::define_port_error;

/// Construction parameters handed to a renderer factory.
///
/// Kept apart from the overlay configuration: the container is internal
/// overlay state, not a caller option.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Surface the renderer draws into.
    pub container: SurfaceId,
    /// Surface size at construction time.
    pub size: Size,
    /// Default point radius in pixels.
    pub radius: f64,
    /// Opacity of the hottest pixel.
    pub max_opacity: f64,
}

define_port_error! {
    /// Errors raised by a rendering engine.
    pub enum HeatRendererError {
        /// The engine could not be created for the container.
        Construction { message: String } =>
            "heat renderer construction failed: {message}",
        /// The engine rejected a frame.
        Render { message: String } =>
            "heat renderer rejected frame: {message}",
        /// The engine could not adopt new dimensions.
        Resize { message: String } =>
            "heat renderer resize failed: {message}",
    }
}

/// One rendering-engine instance bound to a drawing surface.
#[cfg_attr(test, mockall::automock)]
pub trait HeatRenderer: Send {
    /// Replace the rendered points and intensity range.
    fn set_data(&mut self, frame: &HeatFrame) -> Result<(), HeatRendererError>;

    /// Adopt new pixel dimensions for the backing canvas.
    fn set_dimensions(&mut self, size: Size) -> Result<(), HeatRendererError>;
}

/// Creates rendering-engine instances.
#[cfg_attr(test, mockall::automock)]
pub trait HeatRendererFactory: Send + Sync {
    /// Create an engine drawing into `config.container`.
    fn create(&self, config: &RendererConfig) -> Result<Box<dyn HeatRenderer>, HeatRendererError>;
}
