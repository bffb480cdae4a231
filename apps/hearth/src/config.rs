//! # Configuration Loading
//!
//! Builds the [`StoreConfig`] for this process.
//!
//! Precedence, lowest to highest:
//! 1. Built-in defaults
//! 2. TOML file (`--config`, else `HEARTH_CONFIG`, else `./hearth.toml` if present)
//! 3. `HEARTH_DATA_FILE` environment variable
//! 4. `--data` command-line flag (applied by the CLI)
//!
//! ## Example `hearth.toml`
//!
//! ```toml
//! data_file = "/var/lib/hearth/data.json"
//! quarantine_corrupt = true
//!
//! [seed]
//! enabled = true
//! title = "Community Welcome Meetup"
//! stream_link = "https://meet.jit.si/hearth-community"
//! ```

use hearth_core::{HearthError, StoreConfig};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "HEARTH_CONFIG";

/// Environment variable overriding the data file location.
pub const DATA_FILE_ENV: &str = "HEARTH_DATA_FILE";

/// Config file picked up from the working directory when nothing else is set.
pub const DEFAULT_CONFIG_FILE: &str = "hearth.toml";

/// Parse a TOML config document. Missing keys keep their defaults.
pub fn parse_config(text: &str) -> Result<StoreConfig, HearthError> {
    toml::from_str(text).map_err(|e| HearthError::Config(e.to_string()))
}

/// Read and parse a config file.
pub fn read_config_file(path: &Path) -> Result<StoreConfig, HearthError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| HearthError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    toml::from_str(&text).map_err(|e| HearthError::Config(format!("{}: {}", path.display(), e)))
}

/// Resolve the configuration using `env` for environment lookups.
///
/// An explicitly named file must exist; the implicit `./hearth.toml` is
/// optional.
pub fn resolve_config(
    explicit: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<StoreConfig, HearthError> {
    let named = explicit
        .map(Path::to_path_buf)
        .or_else(|| env(CONFIG_ENV).map(PathBuf::from));

    let mut config = match named {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config file");
            read_config_file(&path)?
        }
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            read_config_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => StoreConfig::default(),
    };

    if let Some(data_file) = env(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
        config.data_file = PathBuf::from(data_file);
    }

    Ok(config)
}

/// Resolve the configuration from the process environment.
pub fn load_config(explicit: Option<&Path>) -> Result<StoreConfig, HearthError> {
    resolve_config(explicit, |key| std::env::var(key).ok())
}
