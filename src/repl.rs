//! Interactive session: the command dispatch loop
//!
//! Each iteration reads one line, parses it into a [`Command`], gates it
//! against the current [`SessionState`], applies it to the in-memory
//! [`Diary`], and persists the whole collection after every successful
//! mutation. Failures are reported as a single line and the loop continues;
//! only `bye`, end of input, or Ctrl-C end the session, each with a final
//! save.
//!
//! The loop is single-threaded and synchronous: one blocking read per
//! iteration, no background tasks, no timers.

use crate::command::{parse_command, Command, TripRef};
use crate::config::Config;
use crate::error::{Result, TrailbookError};
use crate::model::{Diary, Photo, Trip};
use crate::session::SessionState;
use crate::store::DiaryStore;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt::Write as _;

/// Result of applying one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// One user-visible confirmation or listing
    pub message: String,
    /// Whether the diary was mutated (triggers a save)
    pub mutated: bool,
    /// Whether the session should end after this command
    pub exit: bool,
}

impl Applied {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            mutated: false,
            exit: false,
        }
    }

    fn mutation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            mutated: true,
            exit: false,
        }
    }
}

/// Apply one command to the diary and session state
///
/// Pure with respect to IO: no reading, no printing, no saving. The caller
/// owns persistence and presentation, which keeps every state transition
/// testable without a terminal.
///
/// # Errors
///
/// Returns [`TrailbookError::StateMismatch`] for a command issued in the
/// wrong session state, and the relevant validation error for bad indexes.
/// None of these mutate the diary or the state.
pub fn apply(
    command: Command,
    diary: &mut Diary,
    state: &mut SessionState,
) -> std::result::Result<Applied, TrailbookError> {
    if !state.permits(command.category()) {
        let guidance = if state.is_trip_selected() {
            "Close the current trip first (type 'close') to manage trips."
        } else {
            "Please select a trip first to add photos or perform other actions related to the trip."
        };
        return Err(TrailbookError::StateMismatch(guidance.to_string()));
    }

    match command {
        Command::Menu => Ok(Applied::info(menu_text(state))),
        Command::Exit => Ok(Applied {
            message: String::new(),
            mutated: false,
            exit: true,
        }),
        Command::AddTrip {
            name,
            description,
            location,
        } => {
            let trip = Trip::new(name, description, location);
            let message = format!("Added trip: {}", trip.name);
            diary.add_trip(trip);
            Ok(Applied::mutation(message))
        }
        Command::List => {
            if let Some(index) = state.selected() {
                let trip = diary
                    .get(index)
                    .ok_or_else(|| TrailbookError::TripNotFound((index + 1).to_string()))?;
                Ok(Applied::info(photo_listing(trip)))
            } else {
                Ok(Applied::info(trip_listing(diary)))
            }
        }
        Command::DeleteTrip { index } => {
            let trip = diary
                .remove_trip(index)
                .ok_or_else(|| TrailbookError::TripNotFound((index + 1).to_string()))?;
            state.on_trip_deleted(index);
            Ok(Applied::mutation(format!("Deleted trip: {}", trip.name)))
        }
        Command::SelectTrip { target } => {
            let index = match target {
                TripRef::Index(i) => i,
                TripRef::Name(name) => diary
                    .find_by_name(&name)
                    .ok_or(TrailbookError::TripNotFound(name))?,
            };
            let trip = diary
                .get(index)
                .ok_or_else(|| TrailbookError::TripNotFound((index + 1).to_string()))?;
            let message = format!("Selected trip: {}", trip.name);
            state.select(index);
            Ok(Applied::info(message))
        }
        Command::AddPhoto {
            file_path,
            name,
            caption,
            location,
            taken_at,
        } => {
            let index = selected_index(state)?;
            let trip = diary
                .get_mut(index)
                .ok_or_else(|| TrailbookError::TripNotFound((index + 1).to_string()))?;
            let message = format!("Added photo: {}", name);
            trip.photos.push(Photo {
                file_path,
                name,
                caption,
                location,
                taken_at,
            });
            Ok(Applied::mutation(message))
        }
        Command::DeletePhoto { index } => {
            let trip_index = selected_index(state)?;
            let trip = diary
                .get_mut(trip_index)
                .ok_or_else(|| TrailbookError::TripNotFound((trip_index + 1).to_string()))?;
            if index >= trip.photos.len() {
                return Err(TrailbookError::PhotoNotFound((index + 1).to_string()));
            }
            let photo = trip.photos.remove(index);
            Ok(Applied::mutation(format!("Deleted photo: {}", photo.name)))
        }
        Command::CaptionPhoto { index, caption } => {
            let trip_index = selected_index(state)?;
            let trip = diary
                .get_mut(trip_index)
                .ok_or_else(|| TrailbookError::TripNotFound((trip_index + 1).to_string()))?;
            let photo = trip
                .photos
                .get_mut(index)
                .ok_or_else(|| TrailbookError::PhotoNotFound((index + 1).to_string()))?;
            photo.caption = caption;
            Ok(Applied::mutation(format!(
                "Updated caption of photo: {}",
                photo.name
            )))
        }
        Command::Close => {
            state.deselect();
            Ok(Applied::info("Closed trip. Back at the top level."))
        }
    }
}

fn selected_index(state: &SessionState) -> std::result::Result<usize, TrailbookError> {
    state.selected().ok_or_else(|| {
        TrailbookError::StateMismatch(
            "Please select a trip first to add photos or perform other actions related to the trip."
                .to_string(),
        )
    })
}

/// State-aware command menu
///
/// Photo commands are only listed once a trip is selected, mirroring how
/// the top level only offers trip management.
fn menu_text(state: &SessionState) -> String {
    let commands: &[&str] = if state.is_trip_selected() {
        &["menu", "bye", "add_photo", "list", "delete_photo", "caption", "close"]
    } else {
        &["menu", "bye", "add_trip", "list", "delete", "select"]
    };
    let mut out = String::from("Available commands for you:");
    for command in commands {
        let _ = write!(out, "\n    - {}", command);
    }
    out
}

fn trip_listing(diary: &Diary) -> String {
    if diary.is_empty() {
        return "No trips yet. Create one with 'add_trip n=NAME d=DESCRIPTION l=LOCATION'."
            .to_string();
    }
    let mut out = String::from("Your trips:");
    for (i, trip) in diary.iter().enumerate() {
        let _ = write!(out, "\n{}. {}", i + 1, trip.name);
        if !trip.description.is_empty() {
            let _ = write!(out, " - {}", trip.description);
        }
        if !trip.location.is_empty() {
            let _ = write!(out, " ({})", trip.location);
        }
    }
    out
}

fn photo_listing(trip: &Trip) -> String {
    if trip.photos.is_empty() {
        return format!(
            "No photos in '{}' yet. Add one with 'add_photo f=PATH n=NAME'.",
            trip.name
        );
    }
    let mut out = format!("Photos in '{}':", trip.name);
    for (i, photo) in trip.photos.iter().enumerate() {
        let _ = write!(out, "\n{}. {} ({})", i + 1, photo.name, photo.file_path);
        if !photo.caption.is_empty() {
            let _ = write!(out, " - {}", photo.caption);
        }
        if !photo.location.is_empty() {
            let _ = write!(out, " @ {}", photo.location);
        }
        if let Some(t) = photo.taken_at {
            let _ = write!(out, " [{}]", t.format("%Y-%m-%d %H:%M:%S"));
        }
    }
    out
}

fn prompt_for(state: &SessionState, diary: &Diary) -> String {
    match state.selected().and_then(|i| diary.get(i)) {
        Some(trip) => format!("[{}:{}] >> ", "trailbook".green(), trip.name.cyan()),
        None => format!("[{}] >> ", "trailbook".green()),
    }
}

fn print_welcome(state: &SessionState) {
    println!("\nWelcome to your travel diary!");
    println!("One command per line; type 'menu' anytime to see what is available.\n");
    println!("{}\n", menu_text(state));
}

/// Run the interactive session until an exit command or end of input
///
/// Loads the diary at startup, saves after every successful mutation, and
/// saves once more on the way out. Every failure prints one line and the
/// session remains usable; nothing short of end of input ends the loop
/// besides 'bye'.
pub fn run_session(config: Config) -> Result<()> {
    if !config.ui.color {
        colored::control::set_override(false);
    }

    let store = DiaryStore::new(&config.storage.path);
    let mut diary = store.load_all()?;
    let mut state = SessionState::default();

    tracing::info!(
        "Session started with {} trips from {}",
        diary.trip_count(),
        store.path().display()
    );

    print_welcome(&state);

    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline(&prompt_for(&state, &diary)) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;

                let command = match parse_command(trimmed) {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{}", e.to_string().red());
                        continue;
                    }
                };

                match apply(command, &mut diary, &mut state) {
                    Ok(applied) => {
                        if !applied.message.is_empty() {
                            println!("{}", applied.message);
                        }
                        if applied.mutated {
                            if let Err(e) = store.save_all(&diary) {
                                eprintln!("{}", e.to_string().red());
                            }
                        }
                        if applied.exit {
                            break;
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", e.to_string().yellow());
                    }
                }
            }
            // End of input is an implicit exit request, not an error.
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                break;
            }
        }
    }

    if let Err(e) = store.save_all(&diary) {
        eprintln!("{}", e.to_string().red());
    }
    println!("Alvida! Till we meet next time :)");
    Ok(())
}
