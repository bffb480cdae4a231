//! # Fixed Primitives
//!
//! Hardcoded constants for the Hearth record store.
//!
//! These values are compiled into the binary and are immutable at runtime.
//! Anything an operator may want to change lives in [`crate::config`] instead.

/// First identifier handed out by every collection counter.
pub const FIRST_ID: u64 = 1;

/// Initial status of every support request.
pub const PENDING_STATUS: &str = "Pending";

/// Calendar date format used for event and support request dates (ISO 8601).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Far-future date substituted for a missing or unparseable event date.
///
/// Only used for comparison inside the ordering component. It is never
/// written back to storage.
pub const SENTINEL_DATE: &str = "9999-12-31";

/// Default location of the data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "hearth_data.json";

// =============================================================================
// INPUT LIMITS
// =============================================================================

/// Maximum accepted size of a data file (64 MB).
///
/// Validated before parsing. Anything larger is treated as corrupt.
pub const MAX_DOCUMENT_SIZE: usize = 64 * 1024 * 1024;

// =============================================================================
// BOOTSTRAP SEED
// =============================================================================

/// Title of the canonical event inserted into an empty dataset.
pub const SEED_EVENT_TITLE: &str = "Community Welcome Meetup";

/// Stream link of the canonical seed event.
pub const SEED_STREAM_LINK: &str = "https://meet.jit.si/hearth-community";
