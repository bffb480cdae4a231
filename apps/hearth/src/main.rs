//! # Hearth - Community Record Keeper
//!
//! The main binary for Hearth.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             apps/hearth (THE BINARY)        │
//! │                                             │
//! │   ┌─────────────┐      ┌───────────────┐    │
//! │   │    CLI      │      │    Config     │    │
//! │   │   (clap)    │      │    (toml)     │    │
//! │   └──────┬──────┘      └───────┬───────┘    │
//! │          └──────────┬──────────┘            │
//! │                     ▼                       │
//! │             ┌───────────────┐               │
//! │             │  hearth-core  │               │
//! │             │ (RecordStore) │               │
//! │             └───────────────┘               │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! hearth add-event -t "Repair cafe" -D 2024-12-01 -s https://stream.example/rc
//! hearth request-support -n Lin -c lin@example.org -D "Phone backup"
//! hearth events
//! hearth --json-mode status
//! ```

use clap::Parser;
use hearth::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        eprintln!("Hearth v{}", env!("CARGO_PKG_VERSION"));
    }

    // Execute command
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = cli::execute(cli, &mut out) {
        tracing::error!("Error: {}", e);
        std::process::exit(hearth::exit_code(&e));
    }
}

/// Initialize tracing — HEARTH_LOG_FORMAT=json enables machine-parseable output.
///
/// Logs go to stderr; stdout carries command output only.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("HEARTH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose {
        "hearth=debug,hearth_core=debug"
    } else {
        "hearth=info,hearth_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
