//! # Dataset Codec
//!
//! Textual serialization for the Hearth dataset.
//!
//! The data file is a single pretty-printed JSON document. This module is a
//! pure transformation; reading and writing the file is done by
//! [`crate::store::RecordStore`].
//!
//! ## Corruption
//!
//! Decoding never fails outward. A document that is too large, is not valid
//! JSON, does not match the schema, or holds duplicate ids is reported as
//! [`DecodeOutcome::CorruptionDetected`], and the caller falls back to the
//! initial structure.

use crate::primitives::MAX_DOCUMENT_SIZE;
use crate::{Dataset, HearthError};

// =============================================================================
// DECODE OUTCOME
// =============================================================================

/// Result of decoding the durable copy of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// A well-formed document was decoded.
    Loaded(Dataset),
    /// No durable copy exists yet.
    Missing,
    /// A durable copy exists but is not well-formed.
    CorruptionDetected { reason: String },
}

impl DecodeOutcome {
    /// The decoded dataset, or the initial structure for a missing or
    /// corrupt document.
    #[must_use]
    pub fn into_dataset(self) -> Dataset {
        match self {
            Self::Loaded(dataset) => dataset,
            Self::Missing | Self::CorruptionDetected { .. } => Dataset::initial(),
        }
    }

    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptionDetected { .. })
    }
}

// =============================================================================
// ENCODE / DECODE
// =============================================================================

/// Serialize a dataset to the on-disk document.
///
/// Output is pretty-printed with a trailing newline so the file diffs
/// cleanly between saves.
pub fn encode(dataset: &Dataset) -> Result<Vec<u8>, HearthError> {
    let mut bytes = serde_json::to_vec_pretty(dataset)
        .map_err(|e| HearthError::Serialization(e.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode the durable copy of the dataset.
///
/// `None` means no durable copy exists. Counters lagging behind the ids
/// they guard are raised; duplicate ids cannot be repaired and are reported
/// as corruption, as is a counter left at `u64::MAX`.
pub fn decode(raw: Option<&[u8]>) -> DecodeOutcome {
    let Some(bytes) = raw else {
        return DecodeOutcome::Missing;
    };

    // Validate size BEFORE parsing
    if bytes.len() > MAX_DOCUMENT_SIZE {
        return DecodeOutcome::CorruptionDetected {
            reason: format!(
                "document size {} bytes exceeds maximum allowed {} bytes",
                bytes.len(),
                MAX_DOCUMENT_SIZE
            ),
        };
    }

    let mut dataset: Dataset = match serde_json::from_slice(bytes) {
        Ok(dataset) => dataset,
        Err(e) => {
            return DecodeOutcome::CorruptionDetected {
                reason: format!("malformed document: {}", e),
            };
        }
    };

    if let Err(reason) = dataset.check_unique_ids() {
        return DecodeOutcome::CorruptionDetected { reason };
    }

    let repaired = dataset.repair_counters();
    if let Some(collection) = dataset.exhausted_counter() {
        return DecodeOutcome::CorruptionDetected {
            reason: format!("{} id counter has no ids left", collection),
        };
    }
    if repaired {
        tracing::warn!(
            next_event_id = dataset.next_event_id,
            next_support_id = dataset.next_support_id,
            "id counters were behind stored records and have been raised"
        );
    }

    DecodeOutcome::Loaded(dataset)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Event, EventId};

    #[test]
    fn missing_document_yields_initial_structure() {
        let outcome = decode(None);
        assert_eq!(outcome, DecodeOutcome::Missing);
        assert_eq!(outcome.into_dataset(), Dataset::initial());
    }

    #[test]
    fn malformed_document_is_corrupt() {
        let outcome = decode(Some(b"{ \"next_event_id\": "));
        assert!(outcome.is_corrupt());
        assert_eq!(outcome.into_dataset(), Dataset::initial());
    }

    #[test]
    fn wrong_shape_is_corrupt() {
        let outcome = decode(Some(br#"{"next_event_id": "one", "next_support_id": 1}"#));
        assert!(outcome.is_corrupt());
    }

    #[test]
    fn oversized_document_is_corrupt() {
        let bytes = vec![b' '; MAX_DOCUMENT_SIZE + 1];
        let outcome = decode(Some(&bytes));
        assert!(
            matches!(&outcome, DecodeOutcome::CorruptionDetected { reason } if reason.contains("exceeds maximum")),
            "{:?}",
            outcome
        );
    }

    #[test]
    fn max_id_is_corrupt() {
        let doc = br#"{
            "next_support_id": 1,
            "next_event_id": 1,
            "events": [{"id": 18446744073709551615, "title": "A", "date": "2024-01-01"}]
        }"#;
        let outcome = decode(Some(doc));
        assert!(
            matches!(&outcome, DecodeOutcome::CorruptionDetected { reason } if reason.contains("event id counter")),
            "{:?}",
            outcome
        );
    }

    #[test]
    fn max_counter_is_corrupt() {
        let doc = br#"{"next_support_id": 18446744073709551615, "next_event_id": 1}"#;
        assert!(decode(Some(doc)).is_corrupt());
    }

    #[test]
    fn empty_link_from_constructor_roundtrips() {
        let mut dataset = Dataset::initial();
        dataset
            .events
            .push(Event::new(EventId(1), "A", "2024-01-01", Some(String::new())));
        dataset.next_event_id = 2;

        let bytes = encode(&dataset).expect("encode");
        assert_eq!(decode(Some(&bytes)), DecodeOutcome::Loaded(dataset));
    }

    #[test]
    fn duplicate_ids_are_corrupt() {
        let doc = br#"{
            "next_support_id": 1,
            "next_event_id": 3,
            "events": [
                {"id": 1, "title": "A", "date": "2024-01-01"},
                {"id": 1, "title": "B", "date": "2024-01-02"}
            ]
        }"#;
        assert!(decode(Some(doc)).is_corrupt());
    }

    #[test]
    fn empty_stream_link_reads_as_absent() {
        let doc = br#"{
            "next_support_id": 1,
            "next_event_id": 2,
            "events": [{"id": 1, "title": "A", "date": "2024-01-01", "stream_link": ""}],
            "supports": [],
            "volunteers": []
        }"#;
        let dataset = decode(Some(doc)).into_dataset();
        assert_eq!(dataset.events[0].stream_link, None);
    }

    #[test]
    fn lagging_counter_is_repaired_on_load() {
        let doc = br#"{
            "next_support_id": 1,
            "next_event_id": 1,
            "events": [{"id": 5, "title": "A", "date": "2024-01-01"}]
        }"#;
        let dataset = decode(Some(doc)).into_dataset();
        assert_eq!(dataset.next_event_id, 6);
        assert_eq!(dataset.events.len(), 1);
    }

    #[test]
    fn encode_preserves_field_order() {
        let mut dataset = Dataset::initial();
        dataset.events.push(Event::new(EventId(1), "A", "2024-01-01", None));
        dataset.next_event_id = 2;

        let text = String::from_utf8(encode(&dataset).expect("encode")).expect("utf8");
        let support_pos = text.find("next_support_id").expect("field");
        let event_pos = text.find("next_event_id").expect("field");
        let volunteers_pos = text.find("volunteers").expect("field");
        assert!(support_pos < event_pos);
        assert!(event_pos < volunteers_pos);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn bytes_roundtrip_bit_exact() {
        let mut dataset = Dataset::initial();
        dataset.events.push(Event::new(
            EventId(1),
            "Repair cafe",
            "2024-02-10",
            Some("https://stream.example/1".to_string()),
        ));
        dataset.next_event_id = 2;

        // save -> load -> save must produce identical bytes
        let bytes1 = encode(&dataset).expect("first encode");
        let restored = decode(Some(&bytes1)).into_dataset();
        let bytes2 = encode(&restored).expect("second encode");
        assert_eq!(bytes1, bytes2);
    }
}
