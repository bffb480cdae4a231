//! # Record Store
//!
//! The single owner of the Hearth dataset.
//!
//! A `RecordStore` is constructed once per process, loads the data file, and
//! is then shared (by reference or `Arc`) with every caller. It is the only
//! mutator of the dataset:
//! - Every mutation runs under the store mutex, so concurrent creations can
//!   never observe the same counter value
//! - Every mutation is applied to a copy, written to disk in full, and only
//!   then made visible in memory
//! - A failed validation or a failed write leaves memory and disk unchanged
//!
//! ## Durability
//!
//! Saves are atomic at the file level: the document is written to a sibling
//! temp file, fsynced, then renamed over the data file.

use crate::clock::{Clock, SystemClock};
use crate::formats::{DecodeOutcome, decode, encode};
use crate::ordering::ordered_for_display;
use crate::primitives::DATE_FORMAT;
use crate::{
    Dataset, Event, EventId, HearthError, StoreConfig, SupportId, SupportRequest, SupportStatus,
    ValidationError,
};
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

// =============================================================================
// LOAD SOURCE
// =============================================================================

/// Where the in-memory dataset came from on the last `load()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// A well-formed data file was read.
    Existing,
    /// No data file exists; the initial structure is in use.
    Fresh,
    /// The data file was corrupt or unreadable; the initial structure is in
    /// use and the next save will overwrite the file.
    Recovered { reason: String },
}

// =============================================================================
// RECORD STORE
// =============================================================================

/// The persistent record store.
pub struct RecordStore {
    config: StoreConfig,
    clock: Box<dyn Clock>,
    dataset: Mutex<Dataset>,
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RecordStore {
    /// Open the store described by `config` and load its data file.
    ///
    /// Never fails: a missing, unreadable or corrupt data file yields the
    /// initial structure.
    #[must_use]
    pub fn open(config: StoreConfig) -> Self {
        Self::open_with_clock(config, Box::new(SystemClock))
    }

    /// Open the store with an explicit clock.
    #[must_use]
    pub fn open_with_clock(config: StoreConfig, clock: Box<dyn Clock>) -> Self {
        let store = Self {
            config,
            clock,
            dataset: Mutex::new(Dataset::initial()),
        };
        store.load();
        store
    }

    /// Location of the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.data_file
    }

    /// The configuration the store was opened with.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // =========================================================================
    // LOAD / SAVE
    // =========================================================================

    /// Replace the in-memory dataset with the durable copy.
    pub fn load(&self) -> LoadSource {
        let mut dataset = self.dataset.lock();
        let path = self.path();

        let raw = match std::fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                let reason = format!("cannot read {}: {}", path.display(), e);
                tracing::warn!(path = %path.display(), error = %e, "data file unreadable, starting from initial structure");
                *dataset = Dataset::initial();
                return LoadSource::Recovered { reason };
            }
        };

        match decode(raw.as_deref()) {
            DecodeOutcome::Loaded(loaded) => {
                tracing::debug!(
                    path = %path.display(),
                    events = loaded.events.len(),
                    supports = loaded.supports.len(),
                    "dataset loaded"
                );
                *dataset = loaded;
                LoadSource::Existing
            }
            DecodeOutcome::Missing => {
                tracing::debug!(path = %path.display(), "no data file, starting fresh");
                *dataset = Dataset::initial();
                LoadSource::Fresh
            }
            DecodeOutcome::CorruptionDetected { reason } => {
                tracing::warn!(path = %path.display(), %reason, "data file corrupt, starting from initial structure");
                if self.config.quarantine_corrupt {
                    quarantine(path);
                }
                *dataset = Dataset::initial();
                LoadSource::Recovered { reason }
            }
        }
    }

    /// Write the complete in-memory dataset to durable storage.
    pub fn save(&self) -> Result<(), HearthError> {
        let dataset = self.dataset.lock();
        write_document(self.path(), &dataset)
    }

    /// Run a read-modify-persist sequence under the store lock.
    ///
    /// `apply` works on a copy. If it fails, nothing changes. If it leaves
    /// the copy identical, nothing is written. Otherwise the copy is saved
    /// and then replaces the in-memory dataset.
    pub(crate) fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut Dataset) -> Result<T, HearthError>,
    ) -> Result<T, HearthError> {
        let mut dataset = self.dataset.lock();
        let mut candidate = dataset.clone();
        let value = apply(&mut candidate)?;

        if candidate != *dataset {
            write_document(self.path(), &candidate)?;
            *dataset = candidate;
        }
        Ok(value)
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Create and persist a new event.
    ///
    /// `title` and `date` are required; `date` must be `YYYY-MM-DD`. An empty
    /// `stream_link` means the event has none.
    pub fn create_event(
        &self,
        title: &str,
        date: &str,
        stream_link: &str,
    ) -> Result<Event, HearthError> {
        let event = self.mutate(|dataset| append_event(dataset, title, date, stream_link))?;
        tracing::info!(id = %event.id, date = %event.date, "event created");
        Ok(event)
    }

    /// Create and persist a new support request, dated today with status
    /// Pending and no assigned volunteer.
    pub fn create_support_request(
        &self,
        member_name: &str,
        contact: &str,
        description: &str,
    ) -> Result<SupportRequest, HearthError> {
        let member_name = required("member_name", member_name)?;
        let contact = required("contact", contact)?;
        let description = required("description", description)?;
        let today = self.today();

        let request = self.mutate(|dataset| {
            let id = SupportId(dataset.next_support_id);
            let next = next_counter(dataset.next_support_id, "support request")?;

            let request = SupportRequest {
                id,
                date: today,
                member_name: member_name.to_string(),
                contact: contact.to_string(),
                description: description.to_string(),
                status: SupportStatus::pending(),
                assigned_volunteer_id: None,
            };
            dataset.supports.push(request.clone());
            dataset.next_support_id = next;
            Ok(request)
        })?;

        tracing::info!(id = %request.id, "support request created");
        Ok(request)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Events in creation order.
    #[must_use]
    pub fn list_events(&self) -> Vec<Event> {
        self.dataset.lock().events.clone()
    }

    /// Events in display order.
    #[must_use]
    pub fn ordered_events(&self) -> Vec<Event> {
        let dataset = self.dataset.lock();
        ordered_for_display(&dataset.events)
    }

    /// Support requests in creation order.
    #[must_use]
    pub fn list_support_requests(&self) -> Vec<SupportRequest> {
        self.dataset.lock().supports.clone()
    }

    /// A copy of the complete dataset.
    #[must_use]
    pub fn snapshot(&self) -> Dataset {
        self.dataset.lock().clone()
    }
}

// =============================================================================
// RECORD CONSTRUCTION
// =============================================================================

/// Trim `value` and reject it if nothing is left.
fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(trimmed)
}

/// The counter value after `current`. A counter never reaches `u64::MAX`.
fn next_counter(current: u64, collection: &'static str) -> Result<u64, HearthError> {
    current
        .checked_add(1)
        .filter(|next| *next < u64::MAX)
        .ok_or(HearthError::IdSpaceExhausted { collection })
}

/// Validate an event and append it to `dataset`, advancing the counter.
pub(crate) fn append_event(
    dataset: &mut Dataset,
    title: &str,
    date: &str,
    stream_link: &str,
) -> Result<Event, HearthError> {
    let title = required("title", title)?;
    let date = required("date", date)?;
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            value: date.to_string(),
        }
    })?;
    let stream_link = Some(stream_link.trim())
        .filter(|link| !link.is_empty())
        .map(str::to_string);

    let id = EventId(dataset.next_event_id);
    let next = next_counter(dataset.next_event_id, "event")?;

    let event = Event::new(id, title, parsed.format(DATE_FORMAT).to_string(), stream_link);
    dataset.events.push(event.clone());
    dataset.next_event_id = next;
    Ok(event)
}

// =============================================================================
// FILE I/O
// =============================================================================

/// `<path><suffix>`, keeping the full original file name.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Write the dataset atomically (temp + fsync + rename).
fn write_document(path: &Path, dataset: &Dataset) -> Result<(), HearthError> {
    let bytes = encode(dataset)?;
    let storage_err =
        |e: std::io::Error| HearthError::Storage(format!("write {}: {}", path.display(), e));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(storage_err)?;
    }

    let tmp_path = sibling(path, ".tmp");
    if let Err(e) = write_then_rename(&tmp_path, path, &bytes) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(storage_err(e));
    }
    Ok(())
}

fn write_then_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(tmp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    std::fs::rename(tmp_path, path)
}

/// Copy a corrupt data file aside so the next save does not destroy it.
///
/// Best effort: failures are logged and otherwise ignored.
fn quarantine(path: &Path) {
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
    let target = sibling(path, &format!(".corrupt-{}", stamp));
    match std::fs::copy(path, &target) {
        Ok(_) => {
            tracing::warn!(copy = %target.display(), "corrupt data file preserved");
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not preserve corrupt data file");
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
