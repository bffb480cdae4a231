//! # Bootstrap Seeding
//!
//! Guarantees a non-empty events collection on first use by inserting one
//! canonical sample event.

use crate::primitives::DATE_FORMAT;
use crate::store::{RecordStore, append_event};
use crate::{Event, HearthError};
use serde::{Deserialize, Serialize};

/// What the canonical seed event looks like, and whether to insert it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedPolicy {
    pub enabled: bool,
    pub title: String,
    /// Empty means the seed event has no stream link.
    pub stream_link: String,
}

impl RecordStore {
    /// Insert the canonical event if the events collection is empty.
    ///
    /// Returns the inserted event, or `None` when events already exist or
    /// seeding is disabled. The check and the insert happen under one lock,
    /// so concurrent callers seed at most once.
    pub fn seed_if_empty(&self) -> Result<Option<Event>, HearthError> {
        let policy = &self.config().seed;
        if !policy.enabled {
            return Ok(None);
        }

        let today = self.today().format(DATE_FORMAT).to_string();
        let seeded = self.mutate(|dataset| {
            if !dataset.events.is_empty() {
                return Ok(None);
            }
            append_event(dataset, &policy.title, &today, &policy.stream_link).map(Some)
        })?;

        if let Some(event) = &seeded {
            tracing::info!(id = %event.id, title = %event.title, "seeded empty dataset");
        }
        Ok(seeded)
    }
}
