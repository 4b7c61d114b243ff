//! Trailbook - travel diary CLI
//!
//! Main entry point for the Trailbook application.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trailbook::cli::{Cli, Commands};
use trailbook::config::Config;
use trailbook::repl;
use trailbook::store::DiaryStore;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/trailbook.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Session => {
            tracing::info!("Starting interactive diary session");
            repl::run_session(config)
        }
        Commands::List => print_diary(&config),
        Commands::Path => {
            println!("{}", config.storage.path);
            Ok(())
        }
    }
}

/// One-shot listing of every trip and its photos
fn print_diary(config: &Config) -> Result<()> {
    let store = DiaryStore::new(&config.storage.path);
    let diary = store.load_all()?;

    if diary.is_empty() {
        println!("No trips recorded.");
        return Ok(());
    }

    for (i, trip) in diary.iter().enumerate() {
        println!("{}. {}", i + 1, trip.name);
        if !trip.description.is_empty() {
            println!("   {}", trip.description);
        }
        for (j, photo) in trip.photos.iter().enumerate() {
            match photo.taken_at {
                Some(t) => println!(
                    "   {}. {} ({}) [{}]",
                    j + 1,
                    photo.name,
                    photo.file_path,
                    t.format("%Y-%m-%d %H:%M:%S")
                ),
                None => println!("   {}. {} ({})", j + 1, photo.name, photo.file_path),
            }
        }
    }
    Ok(())
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "trailbook=debug"
    } else {
        "trailbook=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
