//! Outbound adapters implementing domain ports.
//!
//! Adapters are thin translators between domain types and their
//! infrastructure: HTTP for location records, an in-memory map viewport, a
//! text density renderer and a writer-backed list. They contain no page
//! logic.

pub mod list_view;
pub mod locations;
pub mod map;
pub mod renderer;

#[cfg(feature = "example-data")]
pub mod example_data;
