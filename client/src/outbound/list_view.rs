//! Writer-backed location list view.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::domain::ports::{LocationListView, LocationListViewError};

/// Writes each full list replacement as a numbered block.
///
/// An empty replacement writes a single blank line so consecutive renders
/// stay visually separated.
#[derive(Debug)]
pub struct WriterListView<W> {
    out: Mutex<W>,
}

impl<W> WriterListView<W> {
    /// Wrap `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the wrapped writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> LocationListView for WriterListView<W>
where
    W: Write + Send,
{
    fn replace_entries(&self, entries: &[String]) -> Result<(), LocationListViewError> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let mut block = String::new();
        for (index, entry) in entries.iter().enumerate() {
            block.push_str(&format!("{}. {entry}\n", index + 1));
        }
        block.push('\n');
        out.write_all(block.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|error| LocationListViewError::write(error.to_string()))
    }
}
