//! Heat data files: `{ "max"?, "min"?, "data": [record, ...] }`.
//!
//! Files are read through `cap-std`, opening the parent directory with
//! ambient authority and reading the file relative to it.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::HeatRecord;

/// Errors returned while loading a heat data file.
#[derive(Debug, Error)]
pub enum HeatDataError {
    /// The file could not be read.
    #[error("failed to read heat data at {path}: {source}")]
    Read {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file is not a valid heat data document.
    #[error("invalid heat data at {path}: {source}")]
    Parse {
        /// Path to the file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// A heat dataset with an optional intensity range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeatData {
    /// Upper end of the intensity range, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Lower end of the intensity range, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Raw records, decoded by the overlay's field names.
    #[serde(default)]
    pub data: Vec<HeatRecord>,
}

impl HeatData {
    /// Load and decode the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HeatDataError::Read`] when the file cannot be read and
    /// [`HeatDataError::Parse`] when it is not valid heat data.
    pub fn load(path: &Path) -> Result<Self, HeatDataError> {
        let contents = read_utf8(path).map_err(|source| HeatDataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| HeatDataError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Read a UTF-8 file through a capability on its parent directory.
///
/// # Errors
///
/// Returns an [`io::Error`] when the path has no file name, the directory or
/// file cannot be opened, or the contents are not UTF-8.
pub fn read_utf8(path: &Path) -> io::Result<String> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path must name a file")
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read_to_string(Path::new(file_name))
}
