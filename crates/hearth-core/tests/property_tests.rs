//! # Property-Based Tests
//!
//! Invariants of the codec, the id counters and the display order, checked
//! with proptest.

use hearth_core::{
    Dataset, DecodeOutcome, Event, EventId, FixedClock, RecordStore, StoreConfig, SupportId,
    SupportRequest, SupportStatus, decode, encode, ordered_for_display,
};
use chrono::NaiveDate;
use proptest::collection::vec;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn iso_date() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
}

/// Valid ISO text, empty text, or free text that does not parse.
fn event_date_text() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => iso_date().prop_map(|d| d.format("%Y-%m-%d").to_string()),
        1 => Just(String::new()),
        1 => "[a-z]{3,10}",
    ]
}

fn event_fields() -> impl Strategy<Value = (String, String, Option<String>)> {
    (
        "[A-Za-z][A-Za-z ]{0,30}",
        event_date_text(),
        proptest::option::of("https://[a-z]{1,12}\\.example/[a-z0-9]{0,8}"),
    )
}

fn support_fields() -> impl Strategy<Value = (NaiveDate, String, String, String, Option<u64>)> {
    (
        iso_date(),
        "[A-Za-z]{1,16}",
        "[a-z]{1,8}@[a-z]{1,8}\\.org",
        ".{1,60}",
        proptest::option::of(1u64..500),
    )
}

fn volunteer() -> impl Strategy<Value = serde_json::Value> {
    ("[A-Za-z]{1,12}", vec("[a-z]{1,8}", 0..4), any::<bool>()).prop_map(
        |(name, skills, active)| serde_json::json!({ "name": name, "skills": skills, "active": active }),
    )
}

/// Any dataset satisfying the id and counter invariants.
fn valid_dataset() -> impl Strategy<Value = Dataset> {
    (
        vec(event_fields(), 0..12),
        vec(support_fields(), 0..12),
        vec(volunteer(), 0..4),
        0u64..5,
        0u64..5,
    )
        .prop_map(|(events, supports, volunteers, event_gap, support_gap)| {
            let events: Vec<Event> = events
                .into_iter()
                .enumerate()
                .map(|(i, (title, date, link))| Event::new(EventId(i as u64 + 1), title, date, link))
                .collect();
            let supports: Vec<SupportRequest> = supports
                .into_iter()
                .enumerate()
                .map(|(i, (date, member_name, contact, description, volunteer))| SupportRequest {
                    id: SupportId(i as u64 + 1),
                    date,
                    member_name,
                    contact,
                    description,
                    status: SupportStatus::pending(),
                    assigned_volunteer_id: volunteer,
                })
                .collect();

            Dataset {
                next_support_id: supports.len() as u64 + 1 + support_gap,
                next_event_id: events.len() as u64 + 1 + event_gap,
                events,
                supports,
                volunteers,
            }
        })
}

fn open_store(dir: &tempfile::TempDir) -> RecordStore {
    let today = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap_or_default();
    RecordStore::open_with_clock(
        StoreConfig::with_data_file(dir.path().join("data.json")),
        Box::new(FixedClock(today)),
    )
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// decode(encode(d)) == d for every valid dataset.
    #[test]
    fn codec_roundtrip(dataset in valid_dataset()) {
        let bytes = encode(&dataset).expect("encode");
        prop_assert_eq!(decode(Some(&bytes)), DecodeOutcome::Loaded(dataset));
    }

    /// N event creations yield ids 1..=N and a counter of N + 1.
    #[test]
    fn event_ids_are_contiguous(dates in vec(iso_date(), 0..15)) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_store(&dir);

        for (i, date) in dates.iter().enumerate() {
            let title = format!("Event {}", i);
            store.create_event(&title, &date.format("%Y-%m-%d").to_string(), "").expect("create");
        }

        let snapshot = store.snapshot();
        let ids: Vec<u64> = snapshot.events.iter().map(|e| e.id.0).collect();
        let expected: Vec<u64> = (1..=dates.len() as u64).collect();
        prop_assert_eq!(ids, expected);
        prop_assert_eq!(snapshot.next_event_id, dates.len() as u64 + 1);
    }

    /// N support creations yield ids 1..=N, all Pending and unassigned.
    #[test]
    fn support_ids_are_contiguous(names in vec("[A-Za-z]{1,10}", 0..15)) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open_store(&dir);

        for name in &names {
            store.create_support_request(name, "help@example.org", "Needs help").expect("create");
        }

        let snapshot = store.snapshot();
        prop_assert_eq!(snapshot.supports.len(), names.len());
        for (i, request) in snapshot.supports.iter().enumerate() {
            prop_assert_eq!(request.id.0, i as u64 + 1);
            prop_assert!(request.status.is_pending());
            prop_assert_eq!(request.assigned_volunteer_id, None);
        }
        prop_assert_eq!(snapshot.next_support_id, names.len() as u64 + 1);
    }

    /// Display order is a permutation of its input.
    #[test]
    fn ordering_is_a_permutation(dataset in valid_dataset()) {
        let ordered = ordered_for_display(&dataset.events);
        let mut before: Vec<u64> = dataset.events.iter().map(|e| e.id.0).collect();
        let mut after: Vec<u64> = ordered.iter().map(|e| e.id.0).collect();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    /// Valid dates come first, ascending; everything else follows in input order.
    #[test]
    fn valid_dates_sort_ascending_before_invalid(
        dates in vec(iso_date(), 1..10),
        junk in vec(prop_oneof![Just(String::new()), "[a-z]{3,8}"], 0..5),
    ) {
        let mut events: Vec<Event> = Vec::new();
        for date in &dates {
            let id = EventId(events.len() as u64 + 1);
            events.push(Event::new(id, "valid", date.format("%Y-%m-%d").to_string(), None));
        }
        for text in &junk {
            let id = EventId(events.len() as u64 + 1);
            events.push(Event::new(id, "junk", text.clone(), None));
        }
        // Interleave by reversing so invalid entries start at the front
        events.reverse();

        let ordered = ordered_for_display(&events);
        let (valid, rest) = ordered.split_at(dates.len());

        prop_assert!(valid.iter().all(|e| e.title == "valid"));
        prop_assert!(valid.windows(2).all(|w| w[0].date <= w[1].date));
        prop_assert!(rest.iter().all(|e| e.title == "junk"));
        // Stable: invalid entries keep their relative input order
        prop_assert!(rest.windows(2).all(|w| w[0].id > w[1].id));
    }
}
