//! The drawing surface an overlay positions inside the map's overlay pane.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::geo::Size;

/// CSS class hiding the surface while the map animates a zoom.
pub const SURFACE_CLASS: &str = "leaflet-zoom-hide";

/// Stable identifier of one drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SurfaceId(Uuid);

impl SurfaceId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Style property used for translation-only repositioning.
///
/// Hosts without the standard property fall back through the vendor
/// prefixed variants in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CssTransformProperty {
    /// Standard `transform`.
    #[default]
    Transform,
    /// WebKit prefix.
    WebkitTransform,
    /// Gecko prefix.
    MozTransform,
    /// Presto prefix.
    OTransform,
    /// Trident prefix.
    MsTransform,
}

impl CssTransformProperty {
    /// Candidates in probe order.
    pub const CANDIDATES: [Self; 5] = [
        Self::Transform,
        Self::WebkitTransform,
        Self::MozTransform,
        Self::OTransform,
        Self::MsTransform,
    ];

    /// Style-object property name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::WebkitTransform => "WebkitTransform",
            Self::MozTransform => "MozTransform",
            Self::OTransform => "OTransform",
            Self::MsTransform => "msTransform",
        }
    }

    /// Pick the first candidate `supports` accepts, or `transform`.
    ///
    /// # Examples
    /// ```
    /// use client::domain::CssTransformProperty;
    ///
    /// let found = CssTransformProperty::detect(|name| name == "MozTransform");
    /// assert_eq!(found, CssTransformProperty::MozTransform);
    /// assert_eq!(CssTransformProperty::detect(|_| false), CssTransformProperty::Transform);
    /// ```
    #[must_use]
    pub fn detect(supports: impl Fn(&str) -> bool) -> Self {
        Self::CANDIDATES
            .into_iter()
            .find(|candidate| supports(candidate.as_str()))
            .unwrap_or_default()
    }
}

/// Absolutely positioned container hosting the renderer output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawingSurface {
    id: SurfaceId,
    size: Size,
    offset: Option<(i64, i64)>,
    transform_property: CssTransformProperty,
}

impl DrawingSurface {
    /// Create an unsized, untranslated surface.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SurfaceId::random(),
            size: Size::default(),
            offset: None,
            transform_property: CssTransformProperty::default(),
        }
    }

    /// Surface identifier.
    #[must_use]
    pub const fn id(&self) -> SurfaceId {
        self.id
    }

    /// CSS class carried by the surface element.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        SURFACE_CLASS
    }

    /// Current pixel size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Current translation in pixels, if any has been applied.
    #[must_use]
    pub const fn offset(&self) -> Option<(i64, i64)> {
        self.offset
    }

    /// Property the translation is written to.
    #[must_use]
    pub const fn transform_property(&self) -> CssTransformProperty {
        self.transform_property
    }

    pub(crate) const fn resize(&mut self, size: Size) {
        self.size = size;
    }

    pub(crate) const fn translate(&mut self, x: i64, y: i64) {
        self.offset = Some((x, y));
    }

    pub(crate) const fn use_transform_property(&mut self, property: CssTransformProperty) {
        self.transform_property = property;
    }

    /// Inline style declarations describing the surface, in a stable order.
    ///
    /// # Examples
    /// ```
    /// use client::domain::DrawingSurface;
    ///
    /// let surface = DrawingSurface::new();
    /// let style = surface.style_declarations();
    /// assert_eq!(style.first(), Some(&("position".to_owned(), "absolute".to_owned())));
    /// ```
    #[must_use]
    pub fn style_declarations(&self) -> Vec<(String, String)> {
        let mut declarations = vec![
            ("position".to_owned(), "absolute".to_owned()),
            ("width".to_owned(), format!("{}px", self.size.width)),
            ("height".to_owned(), format!("{}px", self.size.height)),
        ];
        if let Some((x, y)) = self.offset {
            declarations.push((
                self.transform_property.as_str().to_owned(),
                format!("translate({x}px,{y}px)"),
            ));
        }
        declarations
    }
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new()
    }
}
