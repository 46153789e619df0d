//! Page configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{LatLng, Size};
use crate::outbound::map::MapView;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CENTER: LatLng = LatLng::new(25.6586, -80.3568);
const DEFAULT_ZOOM: f64 = 4.0;
const DEFAULT_MAP_SIZE: Size = Size::new(800, 600);
const DEFAULT_SEED_NAME: &str = "mossy-owl";

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn default_heat_data_path() -> PathBuf {
    fixtures_dir().join("heat").join("demo.json")
}

fn default_registry_path() -> PathBuf {
    fixtures_dir().join("example-data").join("seeds.json")
}

/// Configuration values for the `heatmap-page` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HEATMAP_PAGE")]
pub struct PageSettings {
    /// Base URL the locations endpoint is resolved against.
    pub api_base_url: Option<String>,
    /// Client timeout for the locations request, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Initial map centre latitude.
    pub map_center_lat: Option<f64>,
    /// Initial map centre longitude.
    pub map_center_lng: Option<f64>,
    /// Initial map zoom level.
    pub map_zoom: Option<f64>,
    /// Map viewport width in pixels.
    pub map_width: Option<u32>,
    /// Map viewport height in pixels.
    pub map_height: Option<u32>,
    /// Heat data file drawn on the overlay.
    pub heat_data_path: Option<PathBuf>,
    /// Generate heat data from the example-data registry instead of reading
    /// the heat data file. Only honoured when built with `example-data`.
    #[ortho_config(default = false)]
    pub use_example_data: bool,
    /// Seed name to load from the registry.
    pub seed_name: Option<String>,
    /// Registry path override.
    pub registry_path: Option<PathBuf>,
}

impl PageSettings {
    /// Return the API base URL, falling back to the local development server.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] when the configured value is not a URL.
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Return the locations request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Return the initial map view.
    #[must_use]
    pub fn map_view(&self) -> MapView {
        MapView {
            center: LatLng::new(
                self.map_center_lat.unwrap_or(DEFAULT_CENTER.lat),
                self.map_center_lng.unwrap_or(DEFAULT_CENTER.lng),
            ),
            zoom: self.map_zoom.unwrap_or(DEFAULT_ZOOM),
            size: Size::new(
                self.map_width.unwrap_or(DEFAULT_MAP_SIZE.width),
                self.map_height.unwrap_or(DEFAULT_MAP_SIZE.height),
            ),
        }
    }

    /// Return the heat data file path, falling back to the bundled demo.
    #[must_use]
    pub fn heat_data_path(&self) -> PathBuf {
        self.heat_data_path
            .clone()
            .unwrap_or_else(default_heat_data_path)
    }

    /// Return the configured seed name, falling back to the default.
    #[must_use]
    pub fn seed_name(&self) -> &str {
        self.seed_name.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    /// Return the configured registry path, falling back to the default.
    #[must_use]
    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(default_registry_path)
    }
}
