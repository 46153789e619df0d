//! Reqwest-backed location source adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into location records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::LocationsResponseDto;
use crate::domain::LocationRecord;
use crate::domain::ports::{LocationSource, LocationSourceError};

/// Path of the locations endpoint, relative to the API base URL.
pub const LOCATIONS_PATH: &str = "api/internetPG";

/// Location source that performs one HTTP GET against the locations endpoint.
pub struct HttpLocationSource {
    client: Client,
    endpoint: Url,
}

impl HttpLocationSource {
    /// Build an adapter for the endpoint below `base` with an explicit
    /// request timeout.
    ///
    /// ```rust,ignore
    /// let base = Url::parse("http://localhost:3000/")?;
    /// let source = HttpLocationSource::new(&base, Duration::from_secs(10))?;
    /// assert_eq!(source.endpoint().as_str(), "http://localhost:3000/api/internetPG");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`LocationSourceError::Transport`] when the base URL cannot be
    /// joined or the reqwest client cannot be constructed.
    pub fn new(base: &Url, timeout: Duration) -> Result<Self, LocationSourceError> {
        let endpoint = base
            .join(LOCATIONS_PATH)
            .map_err(|error| LocationSourceError::transport(format!("invalid base URL: {error}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(map_transport_error)?;
        Ok(Self { client, endpoint })
    }

    /// Endpoint requested on every fetch.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl LocationSource for HttpLocationSource {
    async fn fetch_locations(&self) -> Result<Vec<LocationRecord>, LocationSourceError> {
        debug!(endpoint = %self.endpoint, "fetching locations");
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_records(body.as_ref())
    }
}

fn parse_records(body: &[u8]) -> Result<Vec<LocationRecord>, LocationSourceError> {
    let decoded: LocationsResponseDto = serde_json::from_slice(body).map_err(|error| {
        LocationSourceError::decode(format!("invalid locations JSON payload: {error}"))
    })?;
    Ok(decoded.into_domain_records())
}

fn map_transport_error(error: reqwest::Error) -> LocationSourceError {
    if error.is_timeout() {
        LocationSourceError::timeout(error.to_string())
    } else {
        LocationSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> LocationSourceError {
    let body_preview = body_preview(body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            LocationSourceError::timeout(format!("status {}", status.as_u16()))
        }
        _ => LocationSourceError::status(status.as_u16(), body_preview),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
