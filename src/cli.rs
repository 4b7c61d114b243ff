//! Command-line interface definition for Trailbook
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for the interactive session, one-shot listing,
//! and printing the resolved storage path.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Trailbook - travel diary CLI
///
/// Keep trips and their photo entries in a plain-text diary file,
/// managed through an interactive command session.
#[derive(Parser, Debug, Clone)]
#[command(name = "trailbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the diary file path from config
    #[arg(long, env = "TRAILBOOK_DATA")]
    pub data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Trailbook
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the interactive diary session
    Session,

    /// Print all trips and their photos, then exit
    List,

    /// Print the resolved diary file path, then exit
    Path,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
