//! Spherical Web Mercator projection onto 256 px tiles.

use std::f64::consts::PI;

use crate::domain::{LatLng, Point};

const EARTH_RADIUS: f64 = 6_378_137.0;
const MAX_LATITUDE: f64 = 85.051_128_779_8;
const TILE_SIZE: f64 = 256.0;

/// Pixels spanned by the whole world at `zoom`.
pub(super) fn world_scale(zoom: f64) -> f64 {
    TILE_SIZE * 2_f64.powf(zoom)
}

/// Project a coordinate to absolute pixel space at `zoom`.
///
/// Latitudes beyond the Mercator limit are clamped.
pub(super) fn project(lat_lng: LatLng, zoom: f64) -> Point {
    let lat = lat_lng.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin_lat = lat.to_radians().sin();
    let world = Point::new(
        EARTH_RADIUS * lat_lng.lng.to_radians(),
        EARTH_RADIUS * ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / 2.0,
    );

    let factor = 0.5 / (PI * EARTH_RADIUS);
    let scale = world_scale(zoom);
    Point::new(
        scale * factor.mul_add(world.x, 0.5),
        scale * (-factor).mul_add(world.y, 0.5),
    )
}

/// Inverse of [`project`].
pub(super) fn unproject(pixel: Point, zoom: f64) -> LatLng {
    let factor = 0.5 / (PI * EARTH_RADIUS);
    let scale = world_scale(zoom);
    let world = Point::new(
        (pixel.x / scale - 0.5) / factor,
        (pixel.y / scale - 0.5) / -factor,
    );

    LatLng::new(
        2.0_f64
            .mul_add((world.y / EARTH_RADIUS).exp().atan(), -PI / 2.0)
            .to_degrees(),
        (world.x / EARTH_RADIUS).to_degrees(),
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[rstest]
    #[case::zoom_zero(0.0, 128.0)]
    #[case::zoom_four(4.0, 2048.0)]
    fn null_island_projects_to_world_centre(#[case] zoom: f64, #[case] expected: f64) {
        let pixel = project(LatLng::new(0.0, 0.0), zoom);
        assert!(close(pixel.x, expected), "x was {}", pixel.x);
        assert!(close(pixel.y, expected), "y was {}", pixel.y);
    }

    #[test]
    fn antimeridian_spans_the_world() {
        assert!(close(project(LatLng::new(0.0, -180.0), 0.0).x, 0.0));
        assert!(close(project(LatLng::new(0.0, 180.0), 0.0).x, 256.0));
    }

    #[test]
    fn polar_latitudes_are_clamped() {
        let north = project(LatLng::new(90.0, 0.0), 0.0);
        assert!(close(north.y, 0.0), "y was {}", north.y);
    }

    #[rstest]
    #[case(LatLng::new(24.6408, 46.7728), 4.0)]
    #[case(LatLng::new(-33.86, 151.21), 7.5)]
    #[case(LatLng::new(50.75, -1.55), 0.0)]
    fn unproject_inverts_project(#[case] lat_lng: LatLng, #[case] zoom: f64) {
        let back = unproject(project(lat_lng, zoom), zoom);
        assert!(close(back.lat, lat_lng.lat), "lat was {}", back.lat);
        assert!(close(back.lng, lat_lng.lng), "lng was {}", back.lng);
    }
}
