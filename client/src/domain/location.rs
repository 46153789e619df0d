//! Location records and the name filter applied on every search keystroke.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One location returned by the locations endpoint.
///
/// Only `school_name` is interpreted; every other field is retained verbatim
/// in [`LocationRecord::extra`] so records round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Display name used for matching and for the rendered list entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
    /// Remaining fields of the upstream record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LocationRecord {
    /// Build a record carrying only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            school_name: Some(name.into()),
            extra: Map::new(),
        }
    }

    /// Set an upstream `field` to `value`, returning the record.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(field.to_owned(), value.into());
        self
    }

    /// Return the name when present and non-empty.
    ///
    /// An empty name is treated the same as a missing one.
    #[must_use]
    pub fn school_name(&self) -> Option<&str> {
        self.school_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Return the records whose name contains `query`, ignoring case.
///
/// Matching is plain substring containment. Records without a name never
/// match, even for an empty query. Input order is preserved.
///
/// # Examples
/// ```
/// use client::domain::{LocationRecord, filter_locations};
///
/// let records = vec![
///     LocationRecord::named("Northwood High"),
///     LocationRecord::default(),
///     LocationRecord::named("Eastern Middle"),
/// ];
/// let matches = filter_locations(&records, "WOOD");
/// assert_eq!(matches, vec![LocationRecord::named("Northwood High")]);
/// assert_eq!(filter_locations(&records, "").len(), 2);
/// ```
#[must_use]
pub fn filter_locations(records: &[LocationRecord], query: &str) -> Vec<LocationRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .school_name()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    //! Filter contract coverage.

    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    #[fixture]
    fn records() -> Vec<LocationRecord> {
        vec![
            LocationRecord::named("Bladensburg High School"),
            LocationRecord::named("Greenbelt Middle School"),
            LocationRecord::default(),
            LocationRecord::named(""),
            LocationRecord::named("High Point High School"),
        ]
    }

    fn names(records: &[LocationRecord]) -> Vec<&str> {
        records.iter().filter_map(LocationRecord::school_name).collect()
    }

    #[rstest]
    fn matches_case_insensitive_substrings(records: Vec<LocationRecord>) {
        let matches = filter_locations(&records, "hIGH");
        assert_eq!(
            names(&matches),
            vec!["Bladensburg High School", "High Point High School"]
        );
    }

    #[rstest]
    fn empty_query_keeps_every_named_record_in_order(records: Vec<LocationRecord>) {
        let matches = filter_locations(&records, "");
        assert_eq!(
            names(&matches),
            vec![
                "Bladensburg High School",
                "Greenbelt Middle School",
                "High Point High School"
            ]
        );
        assert_eq!(matches.len(), 3);
    }

    #[rstest]
    #[case::prefix_only("bla", 1)]
    #[case::infix("belt", 1)]
    #[case::no_fuzzy_matching("hgh", 0)]
    #[case::no_tokenising("school high", 0)]
    fn matching_is_plain_containment(
        records: Vec<LocationRecord>,
        #[case] query: &str,
        #[case] expected: usize,
    ) {
        assert_eq!(filter_locations(&records, query).len(), expected);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter_locations(&[], "x").is_empty());
    }

    #[test]
    fn unnamed_records_never_match() {
        let unnamed: LocationRecord =
            serde_json::from_value(json!({ "city": "College Park" })).expect("record");
        assert!(filter_locations(&[unnamed.clone()], "").is_empty());
        assert!(filter_locations(&[unnamed], "college").is_empty());
    }

    #[test]
    fn extra_fields_survive_filtering() {
        let record: LocationRecord = serde_json::from_value(json!({
            "school_name": "Parkdale High",
            "zip": "20737",
        }))
        .expect("record");
        let matches = filter_locations(std::slice::from_ref(&record), "park");
        assert_eq!(matches, vec![record]);
        assert_eq!(
            matches.first().and_then(|m| m.extra.get("zip")),
            Some(&json!("20737"))
        );
    }
}
