//! Heat records as supplied by callers and the frames pushed to renderers.
//!
//! Callers hand the overlay loosely shaped JSON objects ([`HeatRecord`]). The
//! overlay decodes them once into [`GeoPoint`]s using configurable field
//! names, and on every redraw projects the visible points into a
//! [`HeatFrame`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::geo::LatLng;

/// Field carrying an explicit per-point radius override.
pub const RADIUS_FIELD: &str = "radius";

/// A caller-supplied raw record.
///
/// # Examples
/// ```
/// use client::domain::HeatRecord;
///
/// let record = HeatRecord::new()
///     .with("lat", 24.6408)
///     .with("lng", 46.7728)
///     .with("count", 3.0);
/// assert_eq!(record.number("count"), Some(3.0));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeatRecord(Map<String, Value>);

impl HeatRecord {
    /// Build an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` to `value`, returning the record.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_owned(), value.into());
        self
    }

    /// Read `field` as a number when it holds one.
    #[must_use]
    pub fn number(&self, field: &str) -> Option<f64> {
        self.0.get(field).and_then(Value::as_f64)
    }
}

impl From<Map<String, Value>> for HeatRecord {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// Names of the fields holding latitude, longitude and weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    /// Latitude field, `lat` by default.
    pub lat: String,
    /// Longitude field, `lng` by default.
    pub lng: String,
    /// Weight field, `value` by default.
    pub value: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            lat: "lat".to_owned(),
            lng: "lng".to_owned(),
            value: "value".to_owned(),
        }
    }
}

/// A decoded, immutable heat point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    /// Geographic position.
    pub lat_lng: LatLng,
    /// Intensity contributed by the point.
    pub weight: f64,
    /// Explicit radius in pixels, overriding the configured default.
    pub radius: Option<f64>,
}

impl GeoPoint {
    /// Decode a raw record using `fields`.
    ///
    /// Missing or non-numeric coordinate and weight fields decode to `NaN`;
    /// such points fail every bounds test and are never drawn. A missing
    /// weight also leaves the tracked range unchanged when the point is
    /// added, because [`IntensityRange::widened`] skips `NaN`. A radius of
    /// zero counts as absent.
    ///
    /// # Examples
    /// ```
    /// use client::domain::{FieldNames, GeoPoint, HeatRecord};
    ///
    /// let record = HeatRecord::new().with("lat", 1.0).with("value", 2.0);
    /// let point = GeoPoint::decode(&record, &FieldNames::default());
    /// assert!(point.lat_lng.lng.is_nan());
    /// assert_eq!(point.weight, 2.0);
    /// assert_eq!(point.radius, None);
    /// ```
    #[must_use]
    pub fn decode(record: &HeatRecord, fields: &FieldNames) -> Self {
        let read = |field: &str| record.number(field).unwrap_or(f64::NAN);
        Self {
            lat_lng: LatLng::new(read(&fields.lat), read(&fields.lng)),
            weight: read(&fields.value),
            radius: record
                .number(RADIUS_FIELD)
                .filter(|radius| *radius != 0.0 && !radius.is_nan()),
        }
    }
}

/// A point projected into container pixels for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    /// Horizontal pixel, rounded.
    pub x: i64,
    /// Vertical pixel, rounded.
    pub y: i64,
    /// Intensity of the source point.
    pub value: f64,
    /// Effective radius in pixels after zoom scaling.
    pub radius: f64,
}

/// Intensity range handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityRange {
    /// Intensity mapped to the hottest colour.
    pub max: f64,
    /// Intensity mapped to full transparency.
    pub min: f64,
}

impl IntensityRange {
    /// Range tracked by a fresh overlay.
    pub const INITIAL: Self = Self { max: 1.0, min: 0.0 };

    /// Range a local-extrema pass starts from before seeing any point.
    pub const LOCAL_FLOOR: Self = Self { max: 0.0, min: 0.0 };

    /// Widen the range so it covers `weight`. Never narrows; a `NaN` weight
    /// returns the range as is.
    #[must_use]
    pub fn widened(self, weight: f64) -> Self {
        Self {
            max: self.max.max(weight),
            min: self.min.min(weight),
        }
    }
}

/// Payload pushed to the renderer on every redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatFrame {
    /// Intensity mapped to the hottest colour.
    pub max: f64,
    /// Intensity mapped to full transparency.
    pub min: f64,
    /// Visible points for this frame.
    pub data: Vec<ProjectedPoint>,
}

impl HeatFrame {
    /// A frame without points.
    #[must_use]
    pub const fn empty(range: IntensityRange) -> Self {
        Self {
            max: range.max,
            min: range.min,
            data: Vec::new(),
        }
    }

    /// Intensity range carried by the frame.
    #[must_use]
    pub const fn range(&self) -> IntensityRange {
        IntensityRange {
            max: self.max,
            min: self.min,
        }
    }
}
