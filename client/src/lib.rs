//! School location search and geo heat overlay for tile maps.
//!
//! The crate is split the hexagonal way: [`domain`] holds the location
//! filter, the search page service and the heat overlay adapter together
//! with the ports they drive; [`outbound`] implements those ports over HTTP,
//! an in-memory map and a text renderer; [`inbound`] turns console input
//! into page events.

pub mod domain;
pub mod heat_data;
pub mod inbound;
pub mod outbound;
pub mod settings;
