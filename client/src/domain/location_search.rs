//! Domain service backing the location search page.
//!
//! Records are fetched once at load; each input event filters the in-memory
//! set and replaces the rendered list. Nothing is fetched again.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::location::{LocationRecord, filter_locations};
use crate::domain::location_list::render_location_list;
use crate::domain::ports::{
    LocationListView, LocationListViewError, LocationSource, LocationSourceError,
};

/// Page service owning the fetched records.
pub struct LocationSearchPage<S: ?Sized, V: ?Sized> {
    source: Arc<S>,
    view: Arc<V>,
    records: Vec<LocationRecord>,
    input_enabled: bool,
}

impl<S, V> LocationSearchPage<S, V>
where
    S: LocationSource + ?Sized,
    V: LocationListView + ?Sized,
{
    /// Create a page that has not loaded yet; input is ignored until
    /// [`Self::load`] succeeds with at least one record.
    #[must_use]
    pub const fn new(source: Arc<S>, view: Arc<V>) -> Self {
        Self {
            source,
            view,
            records: Vec::new(),
            input_enabled: false,
        }
    }

    /// Fetch every record and enable input handling when any arrived.
    ///
    /// Returns the number of records kept.
    ///
    /// # Errors
    ///
    /// Propagates [`LocationSourceError`]; nothing is retried and the page
    /// stays unloaded.
    pub async fn load(&mut self) -> Result<usize, LocationSourceError> {
        let records = self.source.fetch_locations().await?;
        self.input_enabled = !records.is_empty();
        if self.input_enabled {
            info!(records = records.len(), "locations loaded");
        } else {
            info!("location source returned no records; search input disabled");
        }
        self.records = records;
        Ok(self.records.len())
    }

    /// Handle one search input event.
    ///
    /// Returns the number of rendered entries, or `None` when input handling
    /// is not enabled.
    ///
    /// # Errors
    ///
    /// Propagates [`LocationListViewError`] from the list view.
    pub fn on_input(&self, query: &str) -> Result<Option<usize>, LocationListViewError> {
        if !self.input_enabled {
            debug!("search input ignored before locations loaded");
            return Ok(None);
        }
        let matches = filter_locations(&self.records, query);
        render_location_list(self.view.as_ref(), &matches)?;
        debug!(query, matches = matches.len(), "location list rendered");
        Ok(Some(matches.len()))
    }

    /// Whether input events are being handled.
    #[must_use]
    pub const fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Records fetched at load time, in source order.
    #[must_use]
    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }
}
