//! Line-oriented console driver for the heat map page.
//!
//! Each input line is one UI event, handled to completion before the next
//! line is read. Search lines go to the location search page; map commands
//! move the map and forward the resulting move-end notification to the heat
//! overlay, so every view change causes exactly one redraw.

mod command;

use std::io;
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

pub use command::{COMMAND_PREFIX, ConsoleCommand, ConsoleParseError};

use crate::domain::ports::{
    HeatRendererFactory, LayerId, LocationListView, LocationListViewError, LocationSource,
    MapNavigator,
};
use crate::domain::{HeatmapOverlay, LocationSearchPage, OverlayError};

/// Failures that end a console session.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Reading the next input line failed.
    #[error("failed to read console input: {0}")]
    Read(#[from] io::Error),
    /// The result list could not be rendered.
    #[error(transparent)]
    List(#[from] LocationListViewError),
    /// The heat overlay failed to redraw.
    #[error(transparent)]
    Overlay(#[from] OverlayError),
}

/// Counts reported when the input stream ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleSummary {
    /// Search lines handled.
    pub searches: usize,
    /// Map commands applied.
    pub map_commands: usize,
    /// Lines rejected by the parser.
    pub rejected: usize,
}

/// The page as seen from a terminal: a search box, a result list and a map
/// carrying one heat overlay.
pub struct ConsolePage<F> {
    search: LocationSearchPage<dyn LocationSource, dyn LocationListView>,
    overlay: HeatmapOverlay<F>,
    navigator: Arc<dyn MapNavigator>,
}

impl<F> ConsolePage<F>
where
    F: HeatRendererFactory,
{
    /// Assemble a page from a loaded search service and an attached overlay.
    #[must_use]
    pub fn new(
        search: LocationSearchPage<dyn LocationSource, dyn LocationListView>,
        overlay: HeatmapOverlay<F>,
        navigator: Arc<dyn MapNavigator>,
    ) -> Self {
        Self {
            search,
            overlay,
            navigator,
        }
    }

    /// The heat overlay driven by map commands.
    #[must_use]
    pub const fn overlay(&self) -> &HeatmapOverlay<F> {
        &self.overlay
    }

    /// Read lines from `input` until it ends.
    ///
    /// Unparseable lines are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] when input cannot be read, the list cannot
    /// be rendered, or the overlay fails to redraw.
    pub async fn run<R>(&mut self, input: R) -> Result<ConsoleSummary, ConsoleError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut summary = ConsoleSummary::default();
        while let Some(line) = lines.next_line().await? {
            match ConsoleCommand::parse(&line) {
                Ok(command) => {
                    if matches!(command, ConsoleCommand::Search(_)) {
                        summary.searches += 1;
                    } else {
                        summary.map_commands += 1;
                    }
                    self.handle(command)?;
                }
                Err(error) => {
                    warn!(%error, "console line rejected");
                    summary.rejected += 1;
                }
            }
        }
        debug!(
            searches = summary.searches,
            map_commands = summary.map_commands,
            rejected = summary.rejected,
            "console input closed"
        );
        Ok(summary)
    }

    /// Apply one parsed event.
    ///
    /// # Errors
    ///
    /// See [`Self::run`].
    pub fn handle(&mut self, command: ConsoleCommand) -> Result<(), ConsoleError> {
        let notified = match command {
            ConsoleCommand::Search(query) => {
                self.search.on_input(&query)?;
                return Ok(());
            }
            ConsoleCommand::Pan(offset) => self.navigator.pan_by(offset),
            ConsoleCommand::Zoom(zoom) => self.navigator.set_zoom(zoom),
            ConsoleCommand::Resize(size) => self.navigator.resize(size),
        };
        self.dispatch_move_end(&notified)
    }

    fn dispatch_move_end(&mut self, listeners: &[LayerId]) -> Result<(), ConsoleError> {
        for layer in listeners {
            if *layer == self.overlay.id() {
                self.overlay.handle_move_end()?;
            }
        }
        Ok(())
    }
}
