//! Trailbook - travel diary CLI library
//!
//! This library provides the core functionality for the Trailbook travel
//! diary: the record codec, the diary store, the session state machine,
//! and the interactive dispatch loop.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `model`: Trip, Photo, and the in-memory Diary collection
//! - `codec`: line-oriented record encoding with reversible escaping
//! - `store`: full-snapshot persistence over the diary file
//! - `session`: session state machine gating command categories
//! - `command`: input parsing into a closed command set
//! - `repl`: the interactive dispatch loop
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition

pub mod cli;
pub mod codec;
pub mod command;
pub mod config;
pub mod error;
pub mod model;
pub mod repl;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use command::{parse_command, Command, TripRef};
pub use config::Config;
pub use error::{Result, TrailbookError};
pub use model::{Diary, Photo, Trip};
pub use session::{CommandCategory, SessionState};
pub use store::DiaryStore;
