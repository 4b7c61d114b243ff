//! Command parsing for the interactive session
//!
//! One input line is a command word followed by named flags. A flag is a
//! whitespace-delimited token of the form `key=value` where `key` is
//! lowercase ASCII; the value runs until the next flag token, so multi-word
//! values need no quoting:
//!
//! ```text
//! add_trip n=Japan d=Cherry blossoms l=Kyoto
//! ```
//!
//! Because `=` is structural here, the record codec escapes it in persisted
//! field values. Unrecognized flags are ignored; missing required flags are
//! a reported failure that aborts only that command. Index-taking commands
//! also accept a bare positional number (`select 1`).
//!
//! Parsing produces a closed set of tagged [`Command`] variants that the
//! dispatch loop matches exhaustively; there is no runtime command lookup.

use crate::codec;
use crate::error::TrailbookError;
use crate::session::CommandCategory;
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Reference to a trip, as typed by the user
///
/// A numeric argument is a 1-based position (stored zero-based); anything
/// else is a trip name, resolved against the diary at apply time so the
/// reference can never dangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripRef {
    /// Zero-based diary index
    Index(usize),
    /// Trip name, first match wins
    Name(String),
}

/// A parsed, validated command ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the available commands for the current state
    Menu,
    /// End the session (final save, farewell, exit)
    Exit,
    /// Create a trip; name is required, description and location may be empty
    AddTrip {
        name: String,
        description: String,
        location: String,
    },
    /// List trips at the top level, photos inside a trip
    List,
    /// Delete the trip at this zero-based index
    DeleteTrip { index: usize },
    /// Select a trip by index or by name
    SelectTrip { target: TripRef },
    /// Add a photo to the selected trip
    AddPhoto {
        file_path: String,
        name: String,
        caption: String,
        location: String,
        taken_at: Option<NaiveDateTime>,
    },
    /// Remove the photo at this zero-based index from the selected trip
    DeletePhoto { index: usize },
    /// Replace the caption of the photo at this zero-based index
    CaptionPhoto { index: usize, caption: String },
    /// Deselect the current trip and return to the top level
    Close,
}

impl Command {
    /// The legality category used for session-state gating
    ///
    /// `List` is the one dual-category word: it is legal in either state
    /// and resolves to listing trips or photos by the current state.
    pub fn category(&self) -> CommandCategory {
        match self {
            Command::Menu | Command::Exit | Command::List => CommandCategory::Global,
            Command::AddTrip { .. } | Command::DeleteTrip { .. } | Command::SelectTrip { .. } => {
                CommandCategory::TripManagement
            }
            Command::AddPhoto { .. }
            | Command::DeletePhoto { .. }
            | Command::CaptionPhoto { .. }
            | Command::Close => CommandCategory::PhotoManagement,
        }
    }
}

/// Raw tokenization result: command word, optional positional token, flags
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedInput {
    word: String,
    positional: Option<String>,
    flags: HashMap<String, String>,
}

/// Whether a token opens a new `key=value` flag
fn is_flag_token(token: &str) -> bool {
    match token.split_once('=') {
        Some((key, _)) => !key.is_empty() && key.chars().all(|c| c.is_ascii_lowercase()),
        None => false,
    }
}

/// Tokenize one input line into word, positional argument, and flag map
fn tokenize(line: &str) -> ParsedInput {
    let mut tokens = line.split_whitespace();
    let word = tokens.next().unwrap_or_default().to_lowercase();

    let mut positional_parts: Vec<String> = Vec::new();
    let mut flags: HashMap<String, String> = HashMap::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for token in tokens {
        if is_flag_token(token) {
            if let Some((key, parts)) = current.take() {
                flags.insert(key, parts.join(" "));
            }
            let (key, first) = token.split_once('=').unwrap_or((token, ""));
            let mut parts = Vec::new();
            if !first.is_empty() {
                parts.push(first.to_string());
            }
            current = Some((key.to_string(), parts));
        } else if let Some((_, parts)) = current.as_mut() {
            parts.push(token.to_string());
        } else {
            // Bare tokens before the first flag form the positional
            // argument, so multi-word trip names need no quoting.
            positional_parts.push(token.to_string());
        }
    }
    if let Some((key, parts)) = current.take() {
        flags.insert(key, parts.join(" "));
    }

    let positional = if positional_parts.is_empty() {
        None
    } else {
        Some(positional_parts.join(" "))
    };

    ParsedInput {
        word,
        positional,
        flags,
    }
}

impl ParsedInput {
    fn flag(&self, key: &str) -> Option<&str> {
        self.flags.get(key).map(String::as_str)
    }

    fn flag_or_empty(&self, key: &str) -> String {
        self.flag(key).unwrap_or_default().to_string()
    }

    fn required_flag(&self, key: &str, label: &str) -> Result<String, TrailbookError> {
        match self.flag(key) {
            Some(v) if !v.is_empty() => Ok(v.to_string()),
            _ => Err(TrailbookError::MissingParameter(format!(
                "{} ({})",
                key, label
            ))),
        }
    }

    /// Resolve a 1-based index argument (positional or `i=` flag) to 0-based
    fn required_index(&self) -> Result<usize, TrailbookError> {
        let raw = self
            .flag("i")
            .or(self.positional.as_deref())
            .ok_or_else(|| TrailbookError::MissingParameter("index".to_string()))?;
        let n: usize = raw
            .parse()
            .map_err(|_| TrailbookError::InvalidNumber(raw.to_string()))?;
        if n == 0 {
            return Err(TrailbookError::InvalidNumber(raw.to_string()));
        }
        Ok(n - 1)
    }

    /// Resolve a trip reference: a numeric argument is a 1-based index,
    /// anything else is a trip name (also accepted via `n=`)
    fn required_trip_ref(&self) -> Result<TripRef, TrailbookError> {
        if let Some(name) = self.flag("n") {
            if !name.is_empty() {
                return Ok(TripRef::Name(name.to_string()));
            }
        }
        let raw = self
            .positional
            .as_deref()
            .or(self.flag("i"))
            .ok_or_else(|| TrailbookError::MissingParameter("trip name or index".to_string()))?;
        if raw.chars().all(|c| c.is_ascii_digit()) {
            let n: usize = raw
                .parse()
                .map_err(|_| TrailbookError::InvalidNumber(raw.to_string()))?;
            if n == 0 {
                return Err(TrailbookError::InvalidNumber(raw.to_string()));
            }
            Ok(TripRef::Index(n - 1))
        } else {
            Ok(TripRef::Name(raw.to_string()))
        }
    }
}

/// Parse one non-empty input line into a [`Command`]
///
/// # Errors
///
/// Returns [`TrailbookError::UnknownCommand`] for a word outside the command
/// set, [`TrailbookError::MissingParameter`] for an absent required flag,
/// [`TrailbookError::InvalidNumber`] for a malformed index, and
/// [`TrailbookError::InvalidTimestamp`] for a malformed `t=` value.
pub fn parse_command(line: &str) -> Result<Command, TrailbookError> {
    let input = tokenize(line);

    match input.word.as_str() {
        "menu" => Ok(Command::Menu),
        "bye" | "exit" | "quit" => Ok(Command::Exit),
        "add_trip" => Ok(Command::AddTrip {
            name: input.required_flag("n", "trip name")?,
            description: input.flag_or_empty("d"),
            location: input.flag_or_empty("l"),
        }),
        "list" => Ok(Command::List),
        "delete" => Ok(Command::DeleteTrip {
            index: input.required_index()?,
        }),
        "select" => Ok(Command::SelectTrip {
            target: input.required_trip_ref()?,
        }),
        "add_photo" => {
            let taken_at = match input.flag("t") {
                Some(raw) => Some(codec::parse_timestamp_strict(raw)?),
                None => None,
            };
            Ok(Command::AddPhoto {
                file_path: input.required_flag("f", "photo file path")?,
                name: input.required_flag("n", "photo name")?,
                caption: input.flag_or_empty("c"),
                location: input.flag_or_empty("l"),
                taken_at,
            })
        }
        "delete_photo" => Ok(Command::DeletePhoto {
            index: input.required_index()?,
        }),
        "caption" => Ok(Command::CaptionPhoto {
            index: input.required_index()?,
            caption: input.required_flag("c", "new caption")?,
        }),
        "close" => Ok(Command::Close),
        other => Err(TrailbookError::UnknownCommand(other.to_string())),
    }
}
