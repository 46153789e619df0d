//! Inbound adapters that translate external input into domain calls while
//! keeping transport details at the edge.
//!
//! The only transport today is a line-oriented console under [`console`].

pub mod console;
