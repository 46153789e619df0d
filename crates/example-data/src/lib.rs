//! Deterministic example heat records and school locations for demonstration
//! purposes.
//!
//! This crate generates believable, reproducible map data from a JSON seed
//! registry. It is independent of the client's domain types so it can be
//! used from the page binary, fixtures and tests alike.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Parsing seed registries with per-seed bounding boxes
//! - Deterministic heat record generation using named seeds
//! - Deterministic school location generation with validated names
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_heat_points, generate_school_locations};
//!
//! let json = r#"{
//!     "version": 1,
//!     "seeds": [{
//!         "name": "test-seed",
//!         "seed": 42,
//!         "pointCount": 3,
//!         "bounds": {"south": 24.0, "west": -82.0, "north": 27.5, "east": -79.5}
//!     }]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//!
//! assert_eq!(generate_heat_points(seed_def).len(), 3);
//! assert_eq!(generate_school_locations(seed_def).expect("names").len(), 3);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::{
    MAX_POINT_COUNT, MIN_POINT_COUNT, generate_heat_points, generate_school_locations,
};
pub use registry::{SeedBounds, SeedDefinition, SeedRegistry};
pub use seed::{HeatPointSeed, SchoolLocationSeed};
pub use validation::{SCHOOL_NAME_MAX, SCHOOL_NAME_MIN, is_valid_school_name};
