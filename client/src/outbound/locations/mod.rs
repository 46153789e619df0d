//! Location source outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `LocationSource`
//! port.

mod dto;
mod http_source;

pub use http_source::{HttpLocationSource, LOCATIONS_PATH};
