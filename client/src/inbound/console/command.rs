//! Parsing of console input lines.

use thiserror::Error;

use crate::domain::{Point, Size};

/// Prefix that marks a line as a map command rather than a search query.
pub const COMMAND_PREFIX: char = ':';

/// One console input event.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// New contents of the search box.
    Search(String),
    /// Pan the map by a pixel offset.
    Pan(Point),
    /// Set the map zoom level.
    Zoom(f64),
    /// Resize the map viewport.
    Resize(Size),
}

/// Rejected console lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleParseError {
    /// The command name is not recognised.
    #[error("unknown command `:{name}`; expected :pan, :zoom or :resize")]
    UnknownCommand {
        /// Name as typed.
        name: String,
    },
    /// The command was recognised but its arguments were not.
    #[error("invalid arguments for `:{command}`; usage: {usage}")]
    InvalidArguments {
        /// Command name.
        command: &'static str,
        /// Expected form.
        usage: &'static str,
    },
}

impl ConsoleCommand {
    /// Parse one input line.
    ///
    /// Lines not starting with `:` are search queries and are kept verbatim,
    /// including an empty line, which clears the filter.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleParseError`] for unknown commands or malformed
    /// arguments.
    ///
    /// # Examples
    /// ```
    /// use client::domain::Point;
    /// use client::inbound::console::ConsoleCommand;
    ///
    /// assert_eq!(ConsoleCommand::parse(":pan 10 -4"), Ok(ConsoleCommand::Pan(Point::new(10.0, -4.0))));
    /// assert_eq!(ConsoleCommand::parse("wood"), Ok(ConsoleCommand::Search("wood".to_owned())));
    /// ```
    pub fn parse(line: &str) -> Result<Self, ConsoleParseError> {
        let Some(command) = line.strip_prefix(COMMAND_PREFIX) else {
            return Ok(Self::Search(line.to_owned()));
        };
        let mut words = command.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        match name {
            "pan" => parse_pair::<f64>(&args)
                .map(|(x, y)| Self::Pan(Point::new(x, y)))
                .ok_or(ConsoleParseError::InvalidArguments {
                    command: "pan",
                    usage: ":pan <dx> <dy>",
                }),
            "zoom" => parse_single::<f64>(&args)
                .filter(|zoom| zoom.is_finite())
                .map(Self::Zoom)
                .ok_or(ConsoleParseError::InvalidArguments {
                    command: "zoom",
                    usage: ":zoom <level>",
                }),
            "resize" => parse_pair::<u32>(&args)
                .map(|(width, height)| Self::Resize(Size::new(width, height)))
                .ok_or(ConsoleParseError::InvalidArguments {
                    command: "resize",
                    usage: ":resize <width> <height>",
                }),
            other => Err(ConsoleParseError::UnknownCommand {
                name: other.to_owned(),
            }),
        }
    }
}

fn parse_single<T: std::str::FromStr>(args: &[&str]) -> Option<T> {
    match args {
        [only] => only.parse().ok(),
        _ => None,
    }
}

fn parse_pair<T: std::str::FromStr>(args: &[&str]) -> Option<(T, T)> {
    match args {
        [first, second] => Some((first.parse().ok()?, second.parse().ok()?)),
        _ => None,
    }
}
