//! # Event Ordering
//!
//! Display order for the events collection.
//!
//! Two policies exist:
//! - `ByDate`: ascending by calendar date. Missing or unparseable dates
//!   compare as [`SENTINEL_DATE`] and therefore sort last.
//! - `RawTextDescending`: descending lexicographic by the raw date text.
//!   Chosen when no non-empty date in the collection parses, since the
//!   sentinel would otherwise collapse every event onto one key.
//!
//! Both sorts are stable. Ordering never fails and never touches the
//! stored records.

use crate::Event;
use crate::primitives::{DATE_FORMAT, SENTINEL_DATE};
use chrono::NaiveDate;

/// Policy used to order a collection for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingPolicy {
    /// Ascending by parsed date, invalid dates last.
    ByDate,
    /// Descending by raw date text (degraded).
    RawTextDescending,
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn sentinel() -> NaiveDate {
    parse_date(SENTINEL_DATE).unwrap_or(NaiveDate::MAX)
}

/// Pick the policy for a collection.
///
/// The date policy applies unless the collection carries date text and none
/// of it parses.
#[must_use]
pub fn select_policy(events: &[Event]) -> OrderingPolicy {
    let mut has_text = false;
    for event in events {
        if event.date.trim().is_empty() {
            continue;
        }
        has_text = true;
        if parse_date(&event.date).is_some() {
            return OrderingPolicy::ByDate;
        }
    }

    if has_text {
        OrderingPolicy::RawTextDescending
    } else {
        OrderingPolicy::ByDate
    }
}

/// Order events for display.
///
/// Returns a permutation of `events`; equal keys keep their input order.
#[must_use]
pub fn ordered_for_display(events: &[Event]) -> Vec<Event> {
    let mut ordered = events.to_vec();

    match select_policy(events) {
        OrderingPolicy::ByDate => {
            let sentinel = sentinel();
            ordered.sort_by_cached_key(|event| parse_date(&event.date).unwrap_or(sentinel));
        }
        OrderingPolicy::RawTextDescending => {
            tracing::warn!(
                count = events.len(),
                "ordering degraded: no event date parses, sorting by raw date text descending"
            );
            ordered.sort_by(|a, b| b.date.cmp(&a.date));
        }
    }

    ordered
}

// =============================================================================
// TESTS
// =============================================================================
