//! Errors raised by heat overlay operations.

use thiserror::Error;

use crate::domain::ports::{HeatRendererError, LayerId};

/// Failures of [`super::HeatmapOverlay`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// `attach` was called on an overlay that is already on a map.
    #[error("overlay {layer} is already attached to a map")]
    AlreadyAttached {
        /// Overlay that rejected the call.
        layer: LayerId,
    },
    /// The rendering engine failed.
    #[error(transparent)]
    Renderer(#[from] HeatRendererError),
}
