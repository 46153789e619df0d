//! Presentation of filtered location records.

use crate::domain::location::LocationRecord;
use crate::domain::ports::{LocationListView, LocationListViewError};

/// Replace the contents of `view` with one entry per record.
///
/// Each entry's text is the record's name. This is always a full replace;
/// an empty slice clears the list.
///
/// # Errors
///
/// Propagates [`LocationListViewError`] from the view.
pub fn render_location_list<V>(
    view: &V,
    records: &[LocationRecord],
) -> Result<(), LocationListViewError>
where
    V: LocationListView + ?Sized,
{
    let entries: Vec<String> = records
        .iter()
        .map(|record| record.school_name().unwrap_or_default().to_owned())
        .collect();
    view.replace_entries(&entries)
}
