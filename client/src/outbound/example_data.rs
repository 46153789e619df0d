//! Demo data generated from the example-data seed registry.
//!
//! Replaces both the heat data file and the locations endpoint with records
//! derived from one named seed, so the page can run with no backend.

use std::path::{Path, PathBuf};

use example_data::{
    GenerationError, MAX_POINT_COUNT, RegistryError, SeedRegistry, generate_heat_points,
    generate_school_locations,
};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::FixtureLocationSource;
use crate::domain::{HeatRecord, LocationRecord};
use crate::heat_data::{HeatData, read_utf8};

/// Value field carried by generated heat records.
pub const EXAMPLE_VALUE_FIELD: &str = "count";

/// Errors returned while preparing example data.
#[derive(Debug, Error)]
pub enum ExampleDataError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing or seed lookup failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Record generation failed.
    #[error("example data generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// Heat data and school locations generated from one seed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleDataSet {
    heat: HeatData,
    locations: Vec<LocationRecord>,
}

impl ExampleDataSet {
    /// Heat records keyed `lat`/`lng`/`count`, with `max` pinned to the
    /// largest weight the generator can produce.
    #[must_use]
    pub fn heat_data(&self) -> HeatData {
        self.heat.clone()
    }

    /// Generated school locations.
    #[must_use]
    pub fn locations(&self) -> &[LocationRecord] {
        &self.locations
    }

    /// A location source serving the generated schools.
    #[must_use]
    pub fn location_source(&self) -> FixtureLocationSource {
        FixtureLocationSource::new(self.locations.clone())
    }
}

/// Load the registry at `registry_path` and generate the records of
/// `seed_name`.
///
/// # Errors
///
/// Returns [`ExampleDataError`] when the seed name is blank, the registry
/// cannot be read or parsed, the seed is unknown, or names cannot be
/// generated.
pub fn load_example_data(
    registry_path: &Path,
    seed_name: &str,
) -> Result<ExampleDataSet, ExampleDataError> {
    let seed_name = seed_name.trim();
    if seed_name.is_empty() {
        return Err(ExampleDataError::EmptySeedName);
    }

    let contents = read_utf8(registry_path).map_err(|source| ExampleDataError::RegistryRead {
        path: registry_path.to_path_buf(),
        source,
    })?;
    let registry = SeedRegistry::from_json(&contents)?;
    let seed_def = registry.find_seed(seed_name)?;

    let data = generate_heat_points(seed_def)
        .into_iter()
        .map(|point| {
            HeatRecord::new()
                .with("lat", point.lat)
                .with("lng", point.lng)
                .with(EXAMPLE_VALUE_FIELD, point.count)
        })
        .collect::<Vec<_>>();
    let locations = generate_school_locations(seed_def)?
        .into_iter()
        .map(|school| {
            LocationRecord::named(school.school_name)
                .with("lat", school.lat)
                .with("lng", school.lng)
        })
        .collect::<Vec<_>>();

    info!(
        seed_key = seed_name,
        heat_points = data.len(),
        schools = locations.len(),
        "example data generated"
    );

    Ok(ExampleDataSet {
        heat: HeatData {
            max: Some(f64::from(MAX_POINT_COUNT)),
            min: None,
            data,
        },
        locations,
    })
}
