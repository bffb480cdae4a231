//! # Hearth CLI Module
//!
//! This module implements the CLI interface for Hearth.
//!
//! ## Available Commands
//!
//! - `events` - List events (display order, or creation order with `--created`)
//! - `add-event` - Create an event
//! - `request-support` - Create a technical-support request
//! - `supports` - List support requests
//! - `status` - Show counters and collection sizes
//! - `init` - Create the data file (seeding it if enabled)

mod commands;

use crate::config::load_config;
use clap::{Parser, Subcommand};
use hearth_core::{HearthError, RecordStore};
use std::io::Write;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Hearth - community record keeper
///
/// Tracks scheduled events and technical-support requests in a single
/// JSON data file.
#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the data file (overrides config and HEARTH_DATA_FILE)
    #[arg(short = 'd', long, global = true)]
    pub data: Option<PathBuf>,

    /// Do not insert the sample event into an empty dataset
    #[arg(long, global = true)]
    pub no_seed: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List events
    Events {
        /// Show creation order instead of display order
        #[arg(long)]
        created: bool,
    },

    /// Create an event
    AddEvent {
        /// Event title
        #[arg(short, long)]
        title: String,

        /// Event date (YYYY-MM-DD)
        #[arg(short = 'D', long)]
        date: String,

        /// Stream link (optional)
        #[arg(short, long, default_value = "")]
        stream_link: String,
    },

    /// Create a technical-support request
    RequestSupport {
        /// Name of the member asking for help
        #[arg(short, long)]
        name: String,

        /// How to reach the member
        #[arg(short, long)]
        contact: String,

        /// What the problem is
        #[arg(short = 'D', long)]
        description: String,
    },

    /// List support requests
    Supports,

    /// Show counters and collection sizes
    Status,

    /// Create the data file if it does not exist
    Init,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Open the store for this process and seed it once.
pub fn open_store(cli: &Cli) -> Result<RecordStore, HearthError> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(data) = &cli.data {
        config.data_file = data.clone();
    }
    if cli.no_seed {
        config.seed.enabled = false;
    }

    tracing::debug!(data_file = %config.data_file.display(), "opening record store");
    let store = RecordStore::open(config);
    store.seed_if_empty()?;
    Ok(store)
}

/// Execute the CLI with parsed arguments, writing results to `out`.
pub fn execute(cli: Cli, out: &mut dyn Write) -> Result<(), HearthError> {
    let store = open_store(&cli)?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Events { created }) => cmd_events(&store, out, json_mode, created),
        Some(Commands::AddEvent {
            title,
            date,
            stream_link,
        }) => cmd_add_event(&store, out, json_mode, &title, &date, &stream_link),
        Some(Commands::RequestSupport {
            name,
            contact,
            description,
        }) => cmd_request_support(&store, out, json_mode, &name, &contact, &description),
        Some(Commands::Supports) => cmd_supports(&store, out, json_mode),
        Some(Commands::Status) => cmd_status(&store, out, json_mode),
        Some(Commands::Init) => cmd_init(&store, out, json_mode),
        None => {
            // No subcommand - show events by default
            cmd_events(&store, out, json_mode, false)
        }
    }
}
