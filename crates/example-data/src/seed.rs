//! Generated record types.
//!
//! These types are independent of the client's domain types so the crate
//! can be consumed without a dependency cycle. Field names follow the wire
//! format the page reads: heat records carry `lat`, `lng` and `count`, and
//! school locations carry `school_name`.

use serde::{Deserialize, Serialize};

/// A generated heat record.
///
/// # Example
///
/// ```
/// use example_data::HeatPointSeed;
///
/// let point = HeatPointSeed { lat: 25.7, lng: -80.2, count: 4 };
/// let json = serde_json::to_value(point).expect("serialize");
/// assert_eq!(json["count"], 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPointSeed {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Intensity weight, between 1 and 10 inclusive.
    pub count: u32,
}

/// A generated school location record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolLocationSeed {
    /// School display name.
    pub school_name: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}
