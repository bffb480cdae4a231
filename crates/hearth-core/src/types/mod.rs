//! # Core Type Definitions
//!
//! This module contains the typed schema of the Hearth dataset:
//! - Record identifiers (`EventId`, `SupportId`)
//! - Records (`Event`, `SupportRequest`, `SupportStatus`)
//! - The persisted aggregate (`Dataset`)
//! - Error types (`HearthError`, `ValidationError`)
//!
//! Required and optional fields are declared once, here. No other module
//! applies default values to stored records.

use crate::primitives::{FIRST_ID, PENDING_STATUS};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// RECORD IDENTIFIERS
// =============================================================================

/// Identifier of an event, unique within the events collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub u64);

/// Identifier of a support request, unique within the supports collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SupportId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SupportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// EVENT
// =============================================================================

/// A scheduled community event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Assigned from `Dataset::next_event_id` at creation.
    pub id: EventId,
    pub title: String,
    /// ISO `YYYY-MM-DD` text. Kept as text so that a hand-edited or legacy
    /// value survives a load/save cycle untouched; an empty string means the
    /// date is missing.
    #[serde(default)]
    pub date: String,
    /// Link to the event stream. Absent when the event has none.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub stream_link: Option<String>,
}

impl Event {
    /// Create a new event record. An empty `stream_link` is stored as absent.
    #[must_use]
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        date: impl Into<String>,
        stream_link: Option<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            date: date.into(),
            stream_link: stream_link.filter(|link| !link.is_empty()),
        }
    }
}

/// Storage writes `""` for a missing link in older files.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

// =============================================================================
// SUPPORT REQUEST
// =============================================================================

/// Workflow status of a support request.
///
/// Only `Pending` is produced by the store today; any other text found in
/// storage is carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SupportStatus(pub String);

impl SupportStatus {
    /// The initial status of every new request.
    #[must_use]
    pub fn pending() -> Self {
        Self(PENDING_STATUS.to_string())
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.0 == PENDING_STATUS
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SupportStatus {
    fn default() -> Self {
        Self::pending()
    }
}

/// A technical-support request raised by a community member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportRequest {
    /// Assigned from `Dataset::next_support_id` at creation.
    pub id: SupportId,
    /// Creation date.
    pub date: NaiveDate,
    pub member_name: String,
    pub contact: String,
    pub description: String,
    #[serde(default)]
    pub status: SupportStatus,
    /// Volunteer handling the request, once one is assigned.
    #[serde(default)]
    pub assigned_volunteer_id: Option<u64>,
}

// =============================================================================
// DATASET
// =============================================================================

/// The complete persisted aggregate.
///
/// The dataset is the sole unit of persistence: every save writes all of it.
/// Field order here is the field order of the on-disk document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub next_support_id: u64,
    pub next_event_id: u64,
    /// Creation order.
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub supports: Vec<SupportRequest>,
    /// Opaque records. Not read by any operation; preserved byte-for-byte
    /// in structure and key order.
    #[serde(default)]
    pub volunteers: Vec<serde_json::Value>,
}

impl Dataset {
    /// The initial structure: both counters at 1, all collections empty.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            next_support_id: FIRST_ID,
            next_event_id: FIRST_ID,
            events: Vec::new(),
            supports: Vec::new(),
            volunteers: Vec::new(),
        }
    }

    /// Largest event id present, if any.
    #[must_use]
    pub fn max_event_id(&self) -> Option<EventId> {
        self.events.iter().map(|e| e.id).max()
    }

    /// Largest support request id present, if any.
    #[must_use]
    pub fn max_support_id(&self) -> Option<SupportId> {
        self.supports.iter().map(|s| s.id).max()
    }

    /// Check that ids are unique within each collection.
    pub fn check_unique_ids(&self) -> Result<(), String> {
        let mut seen = std::collections::BTreeSet::new();
        for event in &self.events {
            if !seen.insert(event.id) {
                return Err(format!("duplicate event id {}", event.id));
            }
        }
        let mut seen = std::collections::BTreeSet::new();
        for support in &self.supports {
            if !seen.insert(support.id) {
                return Err(format!("duplicate support request id {}", support.id));
            }
        }
        Ok(())
    }

    /// The first collection whose counter has no id left to hand out.
    ///
    /// A counter at `u64::MAX` cannot be followed by a larger one, so the
    /// next creation could never advance it.
    #[must_use]
    pub fn exhausted_counter(&self) -> Option<&'static str> {
        if self.next_event_id == u64::MAX {
            Some("event")
        } else if self.next_support_id == u64::MAX {
            Some("support request")
        } else {
            None
        }
    }

    /// Raise any counter that is not strictly greater than its collection's
    /// largest id. Returns `true` if a counter was changed.
    pub fn repair_counters(&mut self) -> bool {
        let mut repaired = false;

        let min_event = self.max_event_id().map_or(FIRST_ID, |id| id.0.saturating_add(1));
        if self.next_event_id < min_event {
            self.next_event_id = min_event;
            repaired = true;
        }

        let min_support = self
            .max_support_id()
            .map_or(FIRST_ID, |id| id.0.saturating_add(1));
        if self.next_support_id < min_support {
            self.next_support_id = min_support;
            repaired = true;
        }

        repaired
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::initial()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// A create operation received input it cannot accept.
///
/// Returned before any mutation: the dataset and the data file are untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field was empty or whitespace only.
    #[error("Required field '{field}' is empty")]
    EmptyField { field: &'static str },

    /// The date could not be parsed as a `YYYY-MM-DD` calendar date.
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },
}

/// Errors that can occur in the Hearth system.
///
/// - Validation failures mean "fix your input"
/// - Storage and serialization failures mean "try again later"
/// - Load-time corruption is never reported here; it is recovered locally
#[derive(Debug, Error)]
pub enum HearthError {
    /// Caller input was rejected.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Reading or writing durable storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The dataset could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No further id can be allocated in a collection.
    #[error("No ids left for new {collection} records")]
    IdSpaceExhausted { collection: &'static str },

    /// Command output could not be written. The data file is not involved.
    #[error("Output error: {0}")]
    Output(String),
}

impl HearthError {
    /// True for errors caused by caller input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True for errors caused by durable storage.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Serialization(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================
