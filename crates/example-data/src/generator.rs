//! Deterministic record generation from seed definitions.
//!
//! The same seed definition always produces identical output. Heat points and
//! school locations draw from separate ChaCha8 streams of the same seed, so
//! adding schools to a demo never moves its heat points.

use fake::Fake;
use fake::faker::address::raw::CityName;
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::registry::{SeedBounds, SeedDefinition};
use crate::seed::{HeatPointSeed, SchoolLocationSeed};
use crate::validation::{SCHOOL_NAME_MAX, is_valid_school_name, sanitize_school_name};

/// Maximum number of attempts to generate a valid school name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Smallest generated heat weight.
pub const MIN_POINT_COUNT: u32 = 1;

/// Largest generated heat weight.
pub const MAX_POINT_COUNT: u32 = 10;

const HEAT_STREAM: u64 = 0;
const SCHOOL_STREAM: u64 = 1;

const SCHOOL_SUFFIXES: [&str; 4] = ["High", "Middle", "Elementary", "Academy"];

fn rng_for(seed_def: &SeedDefinition, stream: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    rng.set_stream(stream);
    rng
}

fn position_within(rng: &mut ChaCha8Rng, bounds: SeedBounds) -> (f64, f64) {
    let lat = rng.random_range(bounds.south..=bounds.north);
    let lng = rng.random_range(bounds.west..=bounds.east);
    (lat, lng)
}

/// Generates heat records from a seed definition.
///
/// Every point lies inside the seed's bounds and carries a `count` between
/// [`MIN_POINT_COUNT`] and [`MAX_POINT_COUNT`] inclusive.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_heat_points};
///
/// let json = r#"{
///     "version": 1,
///     "seeds": [{
///         "name": "test",
///         "seed": 42,
///         "pointCount": 3,
///         "bounds": {"south": 24.0, "west": -82.0, "north": 27.5, "east": -79.5}
///     }]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let points = generate_heat_points(seed_def);
///
/// assert_eq!(points.len(), 3);
/// assert_eq!(points, generate_heat_points(seed_def));
/// ```
#[must_use]
pub fn generate_heat_points(seed_def: &SeedDefinition) -> Vec<HeatPointSeed> {
    let mut rng = rng_for(seed_def, HEAT_STREAM);
    let bounds = seed_def.bounds();
    (0..seed_def.point_count())
        .map(|_| {
            let (lat, lng) = position_within(&mut rng, bounds);
            let count = rng.random_range(MIN_POINT_COUNT..=MAX_POINT_COUNT);
            HeatPointSeed { lat, lng, count }
        })
        .collect()
}

/// Generates school locations from a seed definition.
///
/// Produces one school per configured point, each placed inside the seed's
/// bounds and named after a generated city with a school-level suffix.
///
/// # Errors
///
/// Returns [`GenerationError::SchoolNameGenerationFailed`] if a valid name
/// cannot be produced within the retry limit.
pub fn generate_school_locations(
    seed_def: &SeedDefinition,
) -> Result<Vec<SchoolLocationSeed>, GenerationError> {
    let mut rng = rng_for(seed_def, SCHOOL_STREAM);
    let bounds = seed_def.bounds();
    let mut schools = Vec::with_capacity(seed_def.point_count());

    for _ in 0..seed_def.point_count() {
        let school_name = generate_school_name(&mut rng)?;
        let (lat, lng) = position_within(&mut rng, bounds);
        schools.push(SchoolLocationSeed {
            school_name,
            lat,
            lng,
        });
    }

    Ok(schools)
}

fn generate_school_name(rng: &mut ChaCha8Rng) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let city: String = CityName(EN).fake_with_rng(rng);
        let suffix = SCHOOL_SUFFIXES.choose(rng).copied().unwrap_or("High");

        let candidate = sanitize_school_name(&format!("{city} {suffix}"));
        let truncated: String = candidate.chars().take(SCHOOL_NAME_MAX).collect();

        if is_valid_school_name(&truncated) {
            return Ok(truncated);
        }
    }

    Err(GenerationError::SchoolNameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}
