//! Seed registry types and JSON parsing.
//!
//! The registry names a set of seeds. Each seed fixes the RNG value, the
//! number of points to generate, and the geographic box they fall in.

use serde::Deserialize;

use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// A seed registry containing named seed definitions.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "seeds": [{
///         "name": "test",
///         "seed": 42,
///         "pointCount": 5,
///         "bounds": {"south": 24.0, "west": -82.0, "north": 27.5, "east": -79.5}
///     }]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SeedRegistry {
    version: u32,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or required fields are missing
    /// - The version is unsupported
    /// - The seeds array is empty
    /// - Any seed has non-finite, out-of-range or empty bounds
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let seeds = raw
            .seeds
            .into_iter()
            .map(|s| {
                validate_bounds(&s.name, &s.bounds)?;
                Ok(SeedDefinition {
                    name: s.name,
                    seed: s.seed,
                    point_count: s.point_count,
                    bounds: s.bounds,
                })
            })
            .collect::<Result<Vec<_>, RegistryError>>()?;

        Ok(Self {
            version: raw.version,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

fn validate_bounds(name: &str, bounds: &SeedBounds) -> Result<(), RegistryError> {
    let invalid = |message: &str| RegistryError::InvalidBounds {
        name: name.to_owned(),
        message: message.to_owned(),
    };
    let edges = [bounds.south, bounds.west, bounds.north, bounds.east];
    if edges.iter().any(|edge| !edge.is_finite()) {
        return Err(invalid("edges must be finite"));
    }
    if [bounds.south, bounds.north]
        .iter()
        .any(|lat| lat.abs() > MAX_LATITUDE)
    {
        return Err(invalid("latitudes must lie within [-90, 90]"));
    }
    if [bounds.west, bounds.east]
        .iter()
        .any(|lng| lng.abs() > MAX_LONGITUDE)
    {
        return Err(invalid("longitudes must lie within [-180, 180]"));
    }
    if bounds.south >= bounds.north {
        return Err(invalid("south must be below north"));
    }
    if bounds.west >= bounds.east {
        return Err(invalid("west must be below east"));
    }
    Ok(())
}

/// Geographic box generated points fall in.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SeedBounds {
    /// Southern latitude edge.
    pub south: f64,
    /// Western longitude edge.
    pub west: f64,
    /// Northern latitude edge.
    pub north: f64,
    /// Eastern longitude edge.
    pub east: f64,
}

/// A named seed definition for deterministic generation.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    point_count: usize,
    bounds: SeedBounds,
}

impl SeedDefinition {
    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of records to generate.
    #[must_use]
    pub const fn point_count(&self) -> usize {
        self.point_count
    }

    /// Returns the box generated points fall in.
    #[must_use]
    pub const fn bounds(&self) -> SeedBounds {
        self.bounds
    }
}

#[derive(Debug, Deserialize)]
struct RawSeedRegistry {
    version: u32,
    seeds: Vec<RawSeedDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    point_count: usize,
    bounds: SeedBounds,
}
