//! Geographic and pixel primitives shared by the overlay and map adapters.
//!
//! Latitudes and longitudes are WGS84 degrees. Pixel points use the map
//! widget's container space (origin at the top-left corner of the viewport,
//! `y` growing downwards).

use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Build a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Return whether both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// An axis-aligned geographic rectangle.
///
/// Containment is inclusive on every edge so points lying exactly on the
/// viewport border are still drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    south_west: LatLng,
    north_east: LatLng,
}

impl LatLngBounds {
    /// Build bounds from two opposite corners in any order.
    #[must_use]
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    /// South-west corner.
    #[must_use]
    pub const fn south_west(&self) -> LatLng {
        self.south_west
    }

    /// North-east corner.
    #[must_use]
    pub const fn north_east(&self) -> LatLng {
        self.north_east
    }

    /// Return whether `point` lies inside or on the edge of the bounds.
    ///
    /// Any `NaN` component makes the point fall outside.
    ///
    /// # Examples
    /// ```
    /// use client::domain::{LatLng, LatLngBounds};
    ///
    /// let bounds = LatLngBounds::from_corners(LatLng::new(0.0, 0.0), LatLng::new(10.0, 10.0));
    /// assert!(bounds.contains(LatLng::new(10.0, 0.0)));
    /// assert!(!bounds.contains(LatLng::new(f64::NAN, 5.0)));
    /// ```
    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }
}

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset in pixels.
    pub x: f64,
    /// Vertical offset in pixels.
    pub y: f64,
}

impl Point {
    /// The pixel-space origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Build a point from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise sum.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise difference.
    #[must_use]
    pub fn subtract(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Round both components to the nearest whole pixel.
    #[must_use]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }
}

/// Viewport dimensions in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Build a size from width and height.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The point at the centre of a viewport of this size.
    #[must_use]
    pub fn centre(&self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    //! Containment and arithmetic checks for the geo primitives.

    use rstest::rstest;

    use super::*;

    fn bounds() -> LatLngBounds {
        LatLngBounds::from_corners(LatLng::new(20.0, 40.0), LatLng::new(30.0, 50.0))
    }

    #[rstest]
    #[case::inside(LatLng::new(24.64, 46.77), true)]
    #[case::south_edge(LatLng::new(20.0, 45.0), true)]
    #[case::north_east_corner(LatLng::new(30.0, 50.0), true)]
    #[case::outside_west(LatLng::new(25.0, 39.99), false)]
    #[case::outside_north(LatLng::new(50.75, -1.55), false)]
    #[case::nan_latitude(LatLng::new(f64::NAN, 45.0), false)]
    fn containment_is_inclusive(#[case] point: LatLng, #[case] expected: bool) {
        assert_eq!(bounds().contains(point), expected);
    }

    #[test]
    fn corners_are_normalised() {
        let flipped = LatLngBounds::from_corners(LatLng::new(30.0, 50.0), LatLng::new(20.0, 40.0));
        assert_eq!(flipped, bounds());
    }

    #[test]
    fn size_centre_is_half_extent() {
        assert_eq!(Size::new(800, 601).centre(), Point::new(400.0, 300.5));
    }
}
