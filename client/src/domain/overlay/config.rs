//! Immutable configuration for a heat overlay.

use crate::domain::heat::FieldNames;

/// Default base radius in pixels.
pub const DEFAULT_RADIUS: f64 = 2.0;

/// Default opacity ceiling handed to the renderer.
pub const DEFAULT_MAX_OPACITY: f64 = 0.8;

/// Options recognised by [`super::HeatmapOverlay`].
///
/// Built once and never mutated; overlay state lives on the overlay itself.
///
/// # Examples
/// ```
/// use client::domain::OverlayConfig;
///
/// let config = OverlayConfig::builder()
///     .radius(4.0)
///     .scale_radius(true)
///     .value_field("count")
///     .build();
/// assert_eq!(config.radius(), 4.0);
/// assert_eq!(config.field_names().value, "count");
/// assert!(!config.use_local_extrema());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    radius: f64,
    max_opacity: f64,
    scale_radius: bool,
    use_local_extrema: bool,
    field_names: FieldNames,
}

impl OverlayConfig {
    /// Start a builder populated with defaults.
    #[must_use]
    pub fn builder() -> OverlayConfigBuilder {
        OverlayConfigBuilder {
            config: Self::default(),
        }
    }

    /// Base radius used when a point carries no override.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Opacity of the hottest pixel, forwarded to the renderer.
    #[must_use]
    pub const fn max_opacity(&self) -> f64 {
        self.max_opacity
    }

    /// Whether radii are multiplied by `2^zoom`.
    #[must_use]
    pub const fn scale_radius(&self) -> bool {
        self.scale_radius
    }

    /// Whether each frame uses the visible points' range.
    #[must_use]
    pub const fn use_local_extrema(&self) -> bool {
        self.use_local_extrema
    }

    /// Field names read from raw records.
    #[must_use]
    pub const fn field_names(&self) -> &FieldNames {
        &self.field_names
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            max_opacity: DEFAULT_MAX_OPACITY,
            scale_radius: false,
            use_local_extrema: false,
            field_names: FieldNames::default(),
        }
    }
}

/// Consuming builder for [`OverlayConfig`].
#[derive(Debug, Clone)]
pub struct OverlayConfigBuilder {
    config: OverlayConfig,
}

impl OverlayConfigBuilder {
    /// Set the base radius. Zero or non-finite values keep the default.
    #[must_use]
    pub fn radius(mut self, radius: f64) -> Self {
        self.config.radius = if radius.is_finite() && radius != 0.0 {
            radius
        } else {
            DEFAULT_RADIUS
        };
        self
    }

    /// Set the opacity ceiling, clamped into `[0, 1]`.
    #[must_use]
    pub fn max_opacity(mut self, opacity: f64) -> Self {
        self.config.max_opacity = if opacity.is_nan() {
            DEFAULT_MAX_OPACITY
        } else {
            opacity.clamp(0.0, 1.0)
        };
        self
    }

    /// Scale radii with the zoom level.
    #[must_use]
    pub const fn scale_radius(mut self, enabled: bool) -> Self {
        self.config.scale_radius = enabled;
        self
    }

    /// Use the visible points' range instead of the tracked one.
    #[must_use]
    pub const fn use_local_extrema(mut self, enabled: bool) -> Self {
        self.config.use_local_extrema = enabled;
        self
    }

    /// Field holding latitude.
    #[must_use]
    pub fn lat_field(mut self, field: impl Into<String>) -> Self {
        self.config.field_names.lat = field.into();
        self
    }

    /// Field holding longitude.
    #[must_use]
    pub fn lng_field(mut self, field: impl Into<String>) -> Self {
        self.config.field_names.lng = field.into();
        self
    }

    /// Field holding the weight.
    #[must_use]
    pub fn value_field(mut self, field: impl Into<String>) -> Self {
        self.config.field_names.value = field.into();
        self
    }

    /// Finish the configuration.
    #[must_use]
    pub fn build(self) -> OverlayConfig {
        self.config
    }
}
