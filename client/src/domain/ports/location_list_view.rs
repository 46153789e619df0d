//! Driven port for the list container showing search results.

use super::define_port_error;

define_port_error! {
    /// Errors raised while replacing the list contents.
    pub enum LocationListViewError {
        /// The underlying output rejected the write.
        Write { message: String } =>
            "location list write failed: {message}",
    }
}

/// A list container whose contents are replaced wholesale.
#[cfg_attr(test, mockall::automock)]
pub trait LocationListView: Send + Sync {
    /// Replace every entry with `entries`, in order.
    fn replace_entries(&self, entries: &[String]) -> Result<(), LocationListViewError>;
}
