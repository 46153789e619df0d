//! Driven port supplying the location records shown on the search page.

use async_trait::async_trait;

use crate::domain::location::LocationRecord;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while fetching location records.
    pub enum LocationSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "location transport failed: {message}",
        /// The request exceeded the client timeout.
        Timeout { message: String } =>
            "location request timed out: {message}",
        /// The endpoint answered with a non-success status.
        Status { status: u16, message: String } =>
            "location endpoint returned status {status}: {message}",
        /// The response body did not have the expected shape.
        Decode { message: String } =>
            "location response decode failed: {message}",
    }
}

/// Port fetching every location record once at page load.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Fetch the full, ordered record set.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use client::domain::LocationRecord;
    /// use client::domain::ports::{FixtureLocationSource, LocationSource};
    ///
    /// let source = FixtureLocationSource::new(vec![LocationRecord::named("Northwood High")]);
    /// let records = source.fetch_locations().await?;
    /// assert_eq!(records.len(), 1);
    /// # Ok::<(), client::domain::ports::LocationSourceError>(())
    /// ```
    async fn fetch_locations(&self) -> Result<Vec<LocationRecord>, LocationSourceError>;
}

/// Fixture implementation returning a fixed record set.
#[derive(Debug, Clone, Default)]
pub struct FixtureLocationSource {
    records: Vec<LocationRecord>,
}

impl FixtureLocationSource {
    /// Serve `records` on every fetch.
    #[must_use]
    pub const fn new(records: Vec<LocationRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl LocationSource for FixtureLocationSource {
    async fn fetch_locations(&self) -> Result<Vec<LocationRecord>, LocationSourceError> {
        Ok(self.records.clone())
    }
}
