//! DTOs for decoding the locations endpoint response.

use serde::Deserialize;

use crate::domain::LocationRecord;

#[derive(Debug, Deserialize)]
pub(super) struct LocationsResponseDto {
    #[serde(default)]
    pub(super) data: Vec<LocationRecord>,
}

impl LocationsResponseDto {
    pub(super) fn into_domain_records(self) -> Vec<LocationRecord> {
        self.data
    }
}
