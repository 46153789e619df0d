//! Error types for the example-data crate.
//!
//! Registry parsing and record generation fail through separate `thiserror`
//! enums so callers can tell a bad registry file from a generation fault.

use thiserror::Error;

/// Errors that can occur when parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// A seed's bounding box cannot hold generated points.
    #[error("seed '{name}' has invalid bounds: {message}")]
    InvalidBounds {
        /// Name of the offending seed.
        name: String,
        /// What is wrong with the bounds.
        message: String,
    },

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors that can occur during record generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Failed to generate a valid school name after maximum retries.
    #[error("failed to generate valid school name after {max_attempts} attempts")]
    SchoolNameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::parse(
        RegistryError::ParseError { message: "unexpected token".to_owned() },
        "invalid registry JSON: unexpected token"
    )]
    #[case::version(
        RegistryError::UnsupportedVersion { expected: 1, actual: 2 },
        "unsupported registry version: expected 1, found 2"
    )]
    #[case::empty(RegistryError::EmptySeeds, "registry contains no seed definitions")]
    #[case::bounds(
        RegistryError::InvalidBounds {
            name: "mossy-owl".to_owned(),
            message: "south must be below north".to_owned(),
        },
        "seed 'mossy-owl' has invalid bounds: south must be below north"
    )]
    #[case::missing(
        RegistryError::SeedNotFound { name: "mossy-owl".to_owned() },
        "seed 'mossy-owl' not found in registry"
    )]
    fn registry_errors_format(#[case] err: RegistryError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn generation_error_school_name_formats_correctly() {
        let err = GenerationError::SchoolNameGenerationFailed { max_attempts: 100 };
        assert_eq!(
            err.to_string(),
            "failed to generate valid school name after 100 attempts"
        );
    }
}
