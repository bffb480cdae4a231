//! # Store Configuration
//!
//! Settings the record store reads at construction time. Parsing from a file
//! is the application's job; this module only defines the shape and the
//! defaults.

use crate::primitives::{DEFAULT_DATA_FILE, SEED_EVENT_TITLE, SEED_STREAM_LINK};
use crate::seeding::SeedPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration of a [`crate::RecordStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Location of the data file.
    pub data_file: PathBuf,
    /// Copy a corrupt data file aside before it is overwritten.
    pub quarantine_corrupt: bool,
    /// Bootstrap seeding policy.
    pub seed: SeedPolicy,
}

impl StoreConfig {
    /// Default configuration for the given data file.
    #[must_use]
    pub fn with_data_file(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            quarantine_corrupt: true,
            seed: SeedPolicy::default(),
        }
    }
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            title: SEED_EVENT_TITLE.to_string(),
            stream_link: SEED_STREAM_LINK.to_string(),
        }
    }
}
